// rc522/src/pcd/handle.rs

use std::marker::PhantomData;

use log::{debug, info, trace, warn};

use crate::config::{ProtocolConfig, TimingConfig};
use crate::constants::{FIFO_SIZE, KNOWN_VERSIONS};
use crate::pcd::config::init_sequence;
use crate::pcd::frame::{Framing, RxFrame};
use crate::pcd::register::{bits, PcdCommand, Register};
use crate::picc::CardIdentification;
use crate::protocol::anticollision::Collision;
use crate::protocol::commands::PiccCommand;
use crate::transport::RegisterBus;
use crate::utils::{bytes_to_hex_spaced, ms, Deadline};
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// Reader chip handle. Card operations exist only on `Pcd<Initialized>`,
/// so the configuration sequence always runs before the first command.
pub struct Pcd<State = Uninitialized> {
    bus: Box<dyn RegisterBus>,
    timing: TimingConfig,
    version: u8,
    _state: PhantomData<State>,
}

impl<State> Pcd<State> {
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Hand the register bus back, e.g. to reuse an SPI transport.
    pub fn into_bus(self) -> Box<dyn RegisterBus> {
        self.bus
    }
}

impl Pcd<Uninitialized> {
    /// Wrap a register bus. Nothing is sent until [`Pcd::initialize`].
    pub fn new(bus: Box<dyn RegisterBus>) -> Self {
        Self {
            bus,
            timing: TimingConfig::default(),
            version: 0,
            _state: PhantomData,
        }
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Soft reset, check the chip version, write the Type A configuration
    /// with read-back verification and switch the antenna on. Every failure
    /// past timing validation is reported with [`ErrorKind::Init`](crate::ErrorKind::Init).
    pub fn initialize(self) -> Result<Pcd<Initialized>> {
        let mut this = self;
        this.timing.validate()?;
        let version = configure(&mut *this.bus, &this.timing).map_err(Error::into_init)?;
        info!("MFRC522 initialized (version {:#04x})", version);

        Ok(Pcd {
            bus: this.bus,
            timing: this.timing,
            version,
            _state: PhantomData,
        })
    }
}

impl Pcd<Initialized> {
    /// Run the full configuration sequence again. Safe to repeat.
    pub fn reinitialize(&mut self) -> Result<()> {
        self.version = configure(&mut *self.bus, &self.timing).map_err(Error::into_init)?;
        debug!("MFRC522 reinitialized");
        Ok(())
    }

    /// VersionReg value read during initialization.
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn antenna_on(&mut self) -> Result<()> {
        let v = self.bus.read_register(Register::TxControl)?;
        if v & bits::TX_ANTENNA_ON != bits::TX_ANTENNA_ON {
            self.bus
                .write_register(Register::TxControl, v | bits::TX_ANTENNA_ON)?;
        }
        Ok(())
    }

    /// Switching the field off resets every card in it.
    pub fn antenna_off(&mut self) -> Result<()> {
        self.bus
            .clear_bits(Register::TxControl, bits::TX_ANTENNA_ON)
    }

    /// CRC_A of `data` computed by the chip's coprocessor, low byte first.
    pub fn calculate_crc(&mut self, data: &[u8]) -> Result<[u8; 2]> {
        self.bus
            .write_register(Register::Command, PcdCommand::Idle as u8)?;
        self.bus
            .write_register(Register::DivIrq, bits::DIV_IRQ_CRC)?;
        self.bus
            .write_register(Register::FifoLevel, bits::FIFO_FLUSH)?;
        self.bus.write_fifo(data)?;
        self.bus
            .write_register(Register::Command, PcdCommand::CalcCrc as u8)?;

        let deadline = Deadline::after_ms(self.timing.safety_timeout_ms);
        loop {
            let irq = self.bus.read_register(Register::DivIrq)?;
            if irq & bits::DIV_IRQ_CRC != 0 {
                break;
            }
            if deadline.expired() {
                return Err(Error::Timeout {
                    timeout_ms: deadline.budget_ms(),
                });
            }
        }
        self.bus
            .write_register(Register::Command, PcdCommand::Idle as u8)?;

        let lsb = self.bus.read_register(Register::CrcResultLsb)?;
        let msb = self.bus.read_register(Register::CrcResultMsb)?;
        Ok([lsb, msb])
    }

    /// Send `tx` and collect the card's answer.
    ///
    /// Returns [`Error::NoResponse`] when the chip timer expires without an
    /// answer and [`Error::Timeout`] when the chip never signals at all.
    /// Bit collisions are not errors here; they are reported in
    /// [`RxFrame::collision`].
    pub fn transceive(&mut self, tx: &[u8], framing: Framing) -> Result<RxFrame> {
        if tx.is_empty() || tx.len() > FIFO_SIZE {
            return Err(Error::InvalidLength {
                expected: FIFO_SIZE,
                actual: tx.len(),
            });
        }
        trace!(
            "PCD >> {} (last bits {}, align {})",
            bytes_to_hex_spaced(tx),
            framing.tx_last_bits,
            framing.rx_align
        );

        self.bus
            .write_register(Register::Command, PcdCommand::Idle as u8)?;
        self.bus.write_register(Register::ComIrq, bits::IRQ_ALL)?;
        self.bus
            .write_register(Register::FifoLevel, bits::FIFO_FLUSH)?;
        self.bus.write_fifo(tx)?;
        self.bus
            .write_register(Register::BitFraming, framing.bit_framing_reg())?;
        self.bus
            .write_register(Register::Command, PcdCommand::Transceive as u8)?;
        self.bus
            .set_bits(Register::BitFraming, bits::FRAMING_START_SEND)?;

        let waited = self.wait_for_answer();
        let stopped = self.stop_transceive();
        waited?;
        stopped?;

        let error = self.bus.read_register(Register::Error)?;
        if error & bits::ERR_FATAL != 0 {
            return Err(Error::Communication { error_reg: error });
        }

        let level = (self.bus.read_register(Register::FifoLevel)? & 0x7F) as usize;
        let data = self.bus.read_fifo(level)?;
        let valid_bits =
            self.bus.read_register(Register::Control)? & bits::CONTROL_RX_LAST_BITS;
        let collision = if error & bits::ERR_COLL != 0 {
            Some(Collision::from_coll_reg(
                self.bus.read_register(Register::Coll)?,
            ))
        } else {
            None
        };

        trace!(
            "PCD << {} (last bits {}, collision {:?})",
            bytes_to_hex_spaced(&data),
            valid_bits,
            collision
        );
        Ok(RxFrame {
            data,
            valid_bits,
            collision,
        })
    }

    /// Encode `cmd`, append CRC_A from the coprocessor when the command
    /// carries one, and transceive it with the command's framing.
    pub fn execute(&mut self, cmd: &PiccCommand) -> Result<RxFrame> {
        let mut frame = cmd.encode();
        if cmd.appends_crc() {
            let crc = self.calculate_crc(&frame)?;
            frame.extend_from_slice(&crc);
        }
        trace!("sending {}", cmd.name());
        self.transceive(&frame, Framing::for_command(cmd))
    }

    /// Start an identification session on this reader. Rejects a
    /// `config` that fails [`ProtocolConfig::validate`].
    pub fn identification(&mut self, config: &ProtocolConfig) -> Result<CardIdentification<'_>> {
        CardIdentification::new(self, config.clone())
    }

    /// Snapshot of every register except FIFODataReg, whose reads consume data.
    #[cfg(feature = "diagnostics")]
    pub fn dump_registers(&mut self) -> Result<Vec<(Register, u8)>> {
        Register::ALL
            .iter()
            .filter(|r| **r != Register::FifoData)
            .map(|&r| self.bus.read_register(r).map(|v| (r, v)))
            .collect()
    }

    fn wait_for_answer(&mut self) -> Result<()> {
        let deadline = Deadline::after_ms(self.timing.safety_timeout_ms);
        loop {
            let irq = self.bus.read_register(Register::ComIrq)?;
            if irq & (bits::IRQ_RX | bits::IRQ_IDLE) != 0 {
                return Ok(());
            }
            if irq & bits::IRQ_TIMER != 0 {
                return Err(Error::NoResponse);
            }
            if deadline.expired() {
                return Err(Error::Timeout {
                    timeout_ms: deadline.budget_ms(),
                });
            }
        }
    }

    fn stop_transceive(&mut self) -> Result<()> {
        self.bus
            .clear_bits(Register::BitFraming, bits::FRAMING_START_SEND)?;
        self.bus
            .write_register(Register::Command, PcdCommand::Idle as u8)
    }
}

fn soft_reset(bus: &mut dyn RegisterBus, timing: &TimingConfig) -> Result<()> {
    bus.write_register(Register::Command, PcdCommand::SoftReset as u8)?;
    for _ in 0..timing.reset_polls {
        std::thread::sleep(ms(timing.reset_settle_ms));
        if bus.read_register(Register::Command)? & bits::COMMAND_POWER_DOWN == 0 {
            return Ok(());
        }
    }
    Err(Error::ResetTimeout)
}

fn write_verified(bus: &mut dyn RegisterBus, reg: Register, value: u8) -> Result<()> {
    bus.write_register(reg, value)?;
    let read = bus.read_register(reg)?;
    if read != value {
        return Err(Error::InitReadback {
            register: reg,
            wrote: value,
            read,
        });
    }
    Ok(())
}

/// Full configuration sequence; returns the chip version.
fn configure(bus: &mut dyn RegisterBus, timing: &TimingConfig) -> Result<u8> {
    soft_reset(bus, timing)?;

    let version = bus.read_register(Register::Version)?;
    if version == 0x00 || version == 0xFF {
        return Err(Error::NoDevice { version });
    }
    if !KNOWN_VERSIONS.contains(&version) {
        warn!("unknown MFRC522 version {:#04x}, continuing", version);
    }

    for (reg, value) in init_sequence(timing)? {
        write_verified(bus, reg, value)?;
    }

    bus.set_bits(Register::TxControl, bits::TX_ANTENNA_ON)?;
    let tx = bus.read_register(Register::TxControl)?;
    if tx & bits::TX_ANTENNA_ON != bits::TX_ANTENNA_ON {
        return Err(Error::InitReadback {
            register: Register::TxControl,
            wrote: tx | bits::TX_ANTENNA_ON,
            read: tx,
        });
    }
    Ok(version)
}
