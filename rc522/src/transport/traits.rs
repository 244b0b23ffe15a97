// rc522/src/transport/traits.rs

use std::cell::RefCell;
use std::rc::Rc;

use crate::pcd::Register;
use crate::Result;

/// Register access to the reader chip. Keeps bus I/O away from the
/// protocol and session logic; every call is one complete transfer.
pub trait RegisterBus {
    /// Read one register
    fn read_register(&mut self, reg: Register) -> Result<u8>;

    /// Write one register
    fn write_register(&mut self, reg: Register, value: u8) -> Result<()>;

    /// Read-modify-write setting `mask`.
    fn set_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        let v = self.read_register(reg)?;
        self.write_register(reg, v | mask)
    }

    /// Read-modify-write clearing `mask`.
    fn clear_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        let v = self.read_register(reg)?;
        self.write_register(reg, v & !mask)
    }

    /// Push bytes into the FIFO. Transports that support burst access
    /// override this; the default issues one write per byte.
    fn write_fifo(&mut self, data: &[u8]) -> Result<()> {
        for &b in data {
            self.write_register(Register::FifoData, b)?;
        }
        Ok(())
    }

    /// Pop `len` bytes from the FIFO.
    fn read_fifo(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.read_register(Register::FifoData)?);
        }
        Ok(out)
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    fn read_register(&mut self, reg: Register) -> Result<u8> {
        (**self).read_register(reg)
    }
    fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        (**self).write_register(reg, value)
    }
    fn write_fifo(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_fifo(data)
    }
    fn read_fifo(&mut self, len: usize) -> Result<Vec<u8>> {
        (**self).read_fifo(len)
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for Box<T> {
    fn read_register(&mut self, reg: Register) -> Result<u8> {
        (**self).read_register(reg)
    }
    fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        (**self).write_register(reg, value)
    }
    fn write_fifo(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_fifo(data)
    }
    fn read_fifo(&mut self, len: usize) -> Result<Vec<u8>> {
        (**self).read_fifo(len)
    }
}

/// Shared handle so tests can keep inspecting a bus after a reader owns it.
impl<T: RegisterBus> RegisterBus for Rc<RefCell<T>> {
    fn read_register(&mut self, reg: Register) -> Result<u8> {
        self.borrow_mut().read_register(reg)
    }
    fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        self.borrow_mut().write_register(reg, value)
    }
    fn write_fifo(&mut self, data: &[u8]) -> Result<()> {
        self.borrow_mut().write_fifo(data)
    }
    fn read_fifo(&mut self, len: usize) -> Result<Vec<u8>> {
        self.borrow_mut().read_fifo(len)
    }
}
