// rc522/src/transport/spi.rs

//! SPI register access over `embedded-hal` 0.2 blocking traits.
//!
//! Frame layout (MFRC522 datasheet 8.1.2): the first byte is the address
//! byte, followed by one data byte per register access. Reads clock out a
//! trailing 0x00 to receive the last value.

use std::fmt::Debug;

use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::OutputPin;
use log::debug;

use crate::config::BusConfig;
use crate::constants::FIFO_SIZE;
use crate::pcd::Register;
use crate::transport::traits::RegisterBus;
use crate::{Error, Result};

fn bus_err<E: Debug>(e: E) -> Error {
    Error::Bus(format!("{:?}", e))
}

/// Scoped chip-select assertion. Asserted on acquire; released explicitly
/// with [`ChipSelect::release`] or, on any early return, by `Drop`.
pub struct ChipSelect<'a, CS: OutputPin> {
    pin: &'a mut CS,
    active_low: bool,
    released: bool,
}

impl<'a, CS> ChipSelect<'a, CS>
where
    CS: OutputPin,
    CS::Error: Debug,
{
    pub fn acquire(pin: &'a mut CS, active_low: bool) -> Result<Self> {
        drive(pin, active_low, true)?;
        Ok(Self {
            pin,
            active_low,
            released: false,
        })
    }

    /// Deassert and report pin errors, which `Drop` has to swallow.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        drive(self.pin, self.active_low, false)
    }
}

impl<CS: OutputPin> Drop for ChipSelect<'_, CS> {
    fn drop(&mut self) {
        if !self.released {
            let _ = if self.active_low {
                self.pin.set_high()
            } else {
                self.pin.set_low()
            };
        }
    }
}

fn drive<CS>(pin: &mut CS, active_low: bool, assert: bool) -> Result<()>
where
    CS: OutputPin,
    CS::Error: Debug,
{
    if assert == active_low {
        pin.set_low().map_err(bus_err)
    } else {
        pin.set_high().map_err(bus_err)
    }
}

/// MFRC522 register bus over SPI with a dedicated chip-select pin.
pub struct SpiTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
    config: BusConfig,
}

impl<SPI, CS, E> SpiTransport<SPI, CS>
where
    SPI: Transfer<u8, Error = E> + Write<u8, Error = E>,
    E: Debug,
    CS: OutputPin,
    CS::Error: Debug,
{
    /// Take ownership of a configured SPI bus and CS pin. The line is
    /// driven to its idle level before returning.
    pub fn new(spi: SPI, mut cs: CS, config: BusConfig) -> Result<Self> {
        config.validate()?;
        drive(&mut cs, config.cs_active_low, false)?;
        debug!(
            "spi transport: {} Hz, CS pin {} ({})",
            config.spi_clock_hz,
            config.pins.cs,
            if config.cs_active_low {
                "active low"
            } else {
                "active high"
            }
        );
        Ok(Self { spi, cs, config })
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Give the SPI bus and CS pin back.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS, E> RegisterBus for SpiTransport<SPI, CS>
where
    SPI: Transfer<u8, Error = E> + Write<u8, Error = E>,
    E: Debug,
    CS: OutputPin,
    CS::Error: Debug,
{
    fn read_register(&mut self, reg: Register) -> Result<u8> {
        let guard = ChipSelect::acquire(&mut self.cs, self.config.cs_active_low)?;
        let mut buf = [reg.read_address(), 0x00];
        let value = self.spi.transfer(&mut buf).map_err(bus_err)?[1];
        guard.release()?;
        Ok(value)
    }

    fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        let guard = ChipSelect::acquire(&mut self.cs, self.config.cs_active_low)?;
        self.spi
            .write(&[reg.write_address(), value])
            .map_err(bus_err)?;
        guard.release()
    }

    /// One CS assertion for the whole burst: address byte, then every data byte.
    fn write_fifo(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        if data.len() > FIFO_SIZE {
            return Err(Error::InvalidLength {
                expected: FIFO_SIZE,
                actual: data.len(),
            });
        }
        let mut frame = Vec::with_capacity(data.len() + 1);
        frame.push(Register::FifoData.write_address());
        frame.extend_from_slice(data);

        let guard = ChipSelect::acquire(&mut self.cs, self.config.cs_active_low)?;
        self.spi.write(&frame).map_err(bus_err)?;
        guard.release()
    }

    /// Repeated read address `len` times, then 0x00; byte i+1 of the answer
    /// is FIFO byte i.
    fn read_fifo(&mut self, len: usize) -> Result<Vec<u8>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![Register::FifoData.read_address(); len];
        buf.push(0x00);

        let guard = ChipSelect::acquire(&mut self.cs, self.config.cs_active_low)?;
        let out = self.spi.transfer(&mut buf).map_err(bus_err)?[1..].to_vec();
        guard.release()?;
        Ok(out)
    }
}
