// rc522/src/pcd/builder.rs

use crate::config::{ReaderConfig, TimingConfig};
use crate::pcd::handle::{Initialized, Pcd, Uninitialized};
use crate::transport::RegisterBus;
use crate::{Error, Result};

/// Helper to construct a Pcd with optional configuration.
#[derive(Default)]
pub struct PcdBuilder {
    bus: Option<Box<dyn RegisterBus>>,
    timing: TimingConfig,
}

impl PcdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created bus (SPI transport, simulator, mock)
    pub fn with_bus(mut self, bus: Box<dyn RegisterBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_config(self, config: &ReaderConfig) -> Self {
        self.with_timing(config.timing.clone())
    }

    /// Build an SPI-backed reader from HAL objects and the bus section of `config`.
    #[cfg(feature = "hal")]
    pub fn spi<SPI, CS, E>(spi: SPI, cs: CS, config: &ReaderConfig) -> Result<Self>
    where
        SPI: embedded_hal::blocking::spi::Transfer<u8, Error = E>
            + embedded_hal::blocking::spi::Write<u8, Error = E>
            + 'static,
        E: std::fmt::Debug,
        CS: embedded_hal::digital::v2::OutputPin + 'static,
        CS::Error: std::fmt::Debug,
    {
        let transport = crate::transport::SpiTransport::new(spi, cs, config.bus.clone())?;
        Ok(Self::new().with_bus(Box::new(transport)).with_config(config))
    }

    /// Consume the builder and return an uninitialized Pcd.
    pub fn build_uninitialized(self) -> Result<Pcd<Uninitialized>> {
        match self.bus {
            Some(bus) => {
                self.timing.validate()?;
                Ok(Pcd::new(bus).with_timing(self.timing))
            }
            None => Err(Error::Config("no register bus provided".to_string())),
        }
    }

    /// Build and run the initialization sequence.
    pub fn build(self) -> Result<Pcd<Initialized>> {
        self.build_uninitialized()?.initialize()
    }
}
