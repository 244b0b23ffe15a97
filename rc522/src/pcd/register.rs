// rc522/src/pcd/register.rs

//! MFRC522 register map and PCD command codes (datasheet section 9).

/// Register addresses. Reserved addresses are omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    Command = 0x01,
    ComIEn = 0x02,
    DivIEn = 0x03,
    ComIrq = 0x04,
    DivIrq = 0x05,
    Error = 0x06,
    Status1 = 0x07,
    Status2 = 0x08,
    FifoData = 0x09,
    FifoLevel = 0x0A,
    WaterLevel = 0x0B,
    Control = 0x0C,
    BitFraming = 0x0D,
    Coll = 0x0E,
    Mode = 0x11,
    TxMode = 0x12,
    RxMode = 0x13,
    TxControl = 0x14,
    TxAsk = 0x15,
    TxSel = 0x16,
    RxSel = 0x17,
    RxThreshold = 0x18,
    Demod = 0x19,
    MfTx = 0x1C,
    MfRx = 0x1D,
    SerialSpeed = 0x1F,
    CrcResultMsb = 0x21,
    CrcResultLsb = 0x22,
    ModWidth = 0x24,
    RfCfg = 0x26,
    GsN = 0x27,
    CwGsP = 0x28,
    ModGsP = 0x29,
    TMode = 0x2A,
    TPrescaler = 0x2B,
    TReloadHigh = 0x2C,
    TReloadLow = 0x2D,
    TCounterValHigh = 0x2E,
    TCounterValLow = 0x2F,
    TestSel1 = 0x31,
    TestSel2 = 0x32,
    TestPinEn = 0x33,
    TestPinValue = 0x34,
    TestBus = 0x35,
    AutoTest = 0x36,
    Version = 0x37,
    AnalogTest = 0x38,
    TestDac1 = 0x39,
    TestDac2 = 0x3A,
    TestAdc = 0x3B,
}

impl Register {
    /// Every addressable register, in address order.
    pub const ALL: [Register; 50] = [
        Register::Command,
        Register::ComIEn,
        Register::DivIEn,
        Register::ComIrq,
        Register::DivIrq,
        Register::Error,
        Register::Status1,
        Register::Status2,
        Register::FifoData,
        Register::FifoLevel,
        Register::WaterLevel,
        Register::Control,
        Register::BitFraming,
        Register::Coll,
        Register::Mode,
        Register::TxMode,
        Register::RxMode,
        Register::TxControl,
        Register::TxAsk,
        Register::TxSel,
        Register::RxSel,
        Register::RxThreshold,
        Register::Demod,
        Register::MfTx,
        Register::MfRx,
        Register::SerialSpeed,
        Register::CrcResultMsb,
        Register::CrcResultLsb,
        Register::ModWidth,
        Register::RfCfg,
        Register::GsN,
        Register::CwGsP,
        Register::ModGsP,
        Register::TMode,
        Register::TPrescaler,
        Register::TReloadHigh,
        Register::TReloadLow,
        Register::TCounterValHigh,
        Register::TCounterValLow,
        Register::TestSel1,
        Register::TestSel2,
        Register::TestPinEn,
        Register::TestPinValue,
        Register::TestBus,
        Register::AutoTest,
        Register::Version,
        Register::AnalogTest,
        Register::TestDac1,
        Register::TestDac2,
        Register::TestAdc,
    ];

    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// SPI address byte for a read: MSB set, address in bits 6..1, LSB clear.
    pub const fn read_address(self) -> u8 {
        0x80 | ((self.addr() << 1) & 0x7E)
    }

    /// SPI address byte for a write: MSB clear, address in bits 6..1, LSB clear.
    pub const fn write_address(self) -> u8 {
        (self.addr() << 1) & 0x7E
    }

    pub fn from_addr(addr: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.addr() == addr)
    }
}

/// Commands written to the low nibble of `CommandReg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PcdCommand {
    Idle = 0b0000,
    Mem = 0b0001,
    GenerateRandomId = 0b0010,
    CalcCrc = 0b0011,
    Transmit = 0b0100,
    NoCmdChange = 0b0111,
    Receive = 0b1000,
    Transceive = 0b1100,
    MfAuthent = 0b1110,
    SoftReset = 0b1111,
}

impl PcdCommand {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x0F {
            0b0000 => Some(Self::Idle),
            0b0001 => Some(Self::Mem),
            0b0010 => Some(Self::GenerateRandomId),
            0b0011 => Some(Self::CalcCrc),
            0b0100 => Some(Self::Transmit),
            0b0111 => Some(Self::NoCmdChange),
            0b1000 => Some(Self::Receive),
            0b1100 => Some(Self::Transceive),
            0b1110 => Some(Self::MfAuthent),
            0b1111 => Some(Self::SoftReset),
            _ => None,
        }
    }
}

/// Bit masks used by the driver and the simulator.
pub mod bits {
    /// CommandReg: analog part of the receiver switched off / soft power-down.
    pub const COMMAND_POWER_DOWN: u8 = 0x10;

    /// ComIrqReg bits.
    pub const IRQ_SET1: u8 = 0x80;
    pub const IRQ_TX: u8 = 0x40;
    pub const IRQ_RX: u8 = 0x20;
    pub const IRQ_IDLE: u8 = 0x10;
    pub const IRQ_TIMER: u8 = 0x01;
    pub const IRQ_ALL: u8 = 0x7F;

    /// DivIrqReg: CRC coprocessor finished.
    pub const DIV_IRQ_CRC: u8 = 0x04;

    /// ErrorReg bits.
    pub const ERR_PROTOCOL: u8 = 0x01;
    pub const ERR_PARITY: u8 = 0x02;
    pub const ERR_CRC: u8 = 0x04;
    pub const ERR_COLL: u8 = 0x08;
    pub const ERR_BUFFER_OVFL: u8 = 0x10;
    /// Errors that abort a transceive (collisions are handled by the caller).
    pub const ERR_FATAL: u8 = ERR_BUFFER_OVFL | ERR_PARITY | ERR_PROTOCOL;

    /// FIFOLevelReg: flush the FIFO.
    pub const FIFO_FLUSH: u8 = 0x80;

    /// ControlReg: number of valid bits in the last received byte (0 = all 8).
    pub const CONTROL_RX_LAST_BITS: u8 = 0x07;

    /// BitFramingReg fields.
    pub const FRAMING_START_SEND: u8 = 0x80;
    pub const FRAMING_TX_LAST_BITS: u8 = 0x07;

    /// CollReg fields.
    pub const COLL_VALUES_AFTER_COLL: u8 = 0x80;
    pub const COLL_POS_NOT_VALID: u8 = 0x20;
    pub const COLL_POS: u8 = 0x1F;

    /// TxControlReg: drive TX1 and TX2 with the 13.56 MHz carrier.
    pub const TX_ANTENNA_ON: u8 = 0x03;
}
