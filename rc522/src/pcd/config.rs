//! ISO/IEC 14443 Type A register configuration written during initialization

use crate::config::TimingConfig;
use crate::pcd::register::Register;
use crate::Result;

/// 106 kBd, no CRC on transmit
pub const TX_MODE: u8 = 0x00;

/// 106 kBd, no CRC check on receive
pub const RX_MODE: u8 = 0x00;

/// Modulation width reset value
pub const MOD_WIDTH: u8 = 0x26;

/// TAuto: timer starts at the end of every transmission
pub const T_MODE: u8 = 0x80;

/// 13.56 MHz / (2 * 0xA9 + 1) ≈ 40 kHz
pub const T_PRESCALER: u8 = 0xA9;

/// Force 100 % ASK modulation
pub const TX_ASK: u8 = 0x40;

/// TxWaitRF, MFIN active high, CRC preset 0x6363
pub const MODE: u8 = 0x3D;

/// Registers written (and read back) to bring the chip into Type A mode.
pub fn init_sequence(timing: &TimingConfig) -> Result<Vec<(Register, u8)>> {
    let reload = timing.timer_reload()?;
    Ok(vec![
        (Register::TxMode, TX_MODE),
        (Register::RxMode, RX_MODE),
        (Register::ModWidth, MOD_WIDTH),
        (Register::TMode, T_MODE),
        (Register::TPrescaler, T_PRESCALER),
        (Register::TReloadHigh, (reload >> 8) as u8),
        (Register::TReloadLow, (reload & 0xFF) as u8),
        (Register::TxAsk, TX_ASK),
        (Register::Mode, MODE),
    ])
}
