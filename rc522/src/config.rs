// rc522/src/config.rs

//! Reader configuration. Defaults follow the reference wiring: SPI0 at
//! 1 MHz with CS on GPIO17, SCK 18, MOSI 19, MISO 16.

use crate::constants::TIMER_TICKS_PER_MS;
use crate::protocol::anticollision::TieBreak;
use crate::{Error, Result};

/// Upper bound for the MFRC522 SPI clock.
pub const MAX_SPI_CLOCK_HZ: u32 = 10_000_000;

/// Descriptive pin map. The transport does not drive pins by number; the
/// HAL objects handed to it already own them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinMap {
    pub cs: u8,
    pub sck: u8,
    pub mosi: u8,
    pub miso: u8,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            cs: 17,
            sck: 18,
            mosi: 19,
            miso: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusConfig {
    pub spi_clock_hz: u32,
    /// Chip select is asserted by driving the line low.
    pub cs_active_low: bool,
    pub pins: PinMap,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            spi_clock_hz: 1_000_000,
            cs_active_low: true,
            pins: PinMap::default(),
        }
    }
}

impl BusConfig {
    pub fn validate(&self) -> Result<()> {
        if self.spi_clock_hz == 0 || self.spi_clock_hz > MAX_SPI_CLOCK_HZ {
            return Err(Error::Config(format!(
                "spi clock {} Hz outside 1..={}",
                self.spi_clock_hz, MAX_SPI_CLOCK_HZ
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Card response window programmed into the chip timer.
    pub response_timeout_ms: u32,
    /// Host-side bound on one chip command, in case the chip never raises an IRQ.
    pub safety_timeout_ms: u64,
    /// CommandReg polls after a soft reset before giving up.
    pub reset_polls: u32,
    /// Delay before each of those polls.
    pub reset_settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            response_timeout_ms: 25,
            safety_timeout_ms: crate::utils::DEFAULT_SAFETY_TIMEOUT_MS,
            reset_polls: 3,
            reset_settle_ms: 50,
        }
    }
}

impl TimingConfig {
    /// TReload value for the 40 kHz timer.
    pub fn timer_reload(&self) -> Result<u16> {
        let ticks = self.response_timeout_ms.saturating_mul(TIMER_TICKS_PER_MS);
        u16::try_from(ticks).map_err(|_| {
            Error::Config(format!(
                "response timeout {} ms does not fit the reader timer",
                self.response_timeout_ms
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.response_timeout_ms == 0 {
            return Err(Error::Config("response timeout must be non-zero".into()));
        }
        self.timer_reload()?;
        if self.safety_timeout_ms <= u64::from(self.response_timeout_ms) {
            return Err(Error::Config(format!(
                "safety timeout {} ms must exceed response timeout {} ms",
                self.safety_timeout_ms, self.response_timeout_ms
            )));
        }
        if self.reset_polls == 0 {
            return Err(Error::Config("reset_polls must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProtocolConfig {
    /// Anticollision rounds allowed per cascade level.
    pub max_rounds: usize,
    pub tie_break: TieBreak,
    /// Reject identifiers whose length disagrees with the ATQA size code.
    pub check_uid_size: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_rounds: 32,
            tie_break: TieBreak::PreferOne,
            check_uid_size: true,
        }
    }
}

impl ProtocolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(Error::Config("max_rounds must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PollConfig {
    pub interval_ms: u64,
    /// Pause after a reported card so it is not reported again right away.
    pub cooldown_ms: u64,
    /// Printed on the `Type:` line.
    pub card_label: String,
    /// Send HLTA after reporting a card.
    pub halt_after_report: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            cooldown_ms: 1500,
            card_label: "MIFARE Classic".to_string(),
            halt_after_report: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    pub bus: BusConfig,
    pub timing: TimingConfig,
    pub protocol: ProtocolConfig,
    pub poll: PollConfig,
}

impl ReaderConfig {
    pub fn validate(&self) -> Result<()> {
        self.bus.validate()?;
        self.timing.validate()?;
        self.protocol.validate()?;
        Ok(())
    }
}
