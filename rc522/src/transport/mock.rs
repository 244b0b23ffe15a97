// rc522/src/transport/mock.rs

use std::collections::{HashMap, VecDeque};

use crate::pcd::Register;
use crate::transport::traits::RegisterBus;
use crate::{Error, Result};

/// One recorded register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Read(Register, u8),
    Write(Register, u8),
}

/// Register-map double for unit tests. Writes land in a plain register
/// array; reads return scripted values first, then the array contents.
#[derive(Debug)]
pub struct MockBus {
    pub registers: [u8; 64],
    pub ops: Vec<BusOp>,
    pub scripted: HashMap<Register, VecDeque<u8>>,
    /// Testing hook: number of subsequent operations that fail with a bus error
    pub failures: usize,
    /// Testing hook: every access to this register fails
    pub fail_on: Option<Register>,
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            registers: [0; 64],
            ops: Vec::new(),
            scripted: HashMap::new(),
            failures: 0,
            fail_on: None,
        }
    }

    pub fn with_register(mut self, reg: Register, value: u8) -> Self {
        self.registers[reg.addr() as usize] = value;
        self
    }

    /// Queue a value returned by the next read of `reg`.
    pub fn push_read(&mut self, reg: Register, value: u8) {
        self.scripted.entry(reg).or_default().push_back(value);
    }

    pub fn set_failures(&mut self, n: usize) {
        self.failures = n;
    }

    pub fn register(&self, reg: Register) -> u8 {
        self.registers[reg.addr() as usize]
    }

    /// Values written to `reg`, in order.
    pub fn writes_to(&self, reg: Register) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Write(r, v) if *r == reg => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn reads_of(&self, reg: Register) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, BusOp::Read(r, _) if *r == reg))
            .count()
    }

    fn check_failure(&mut self, reg: Register) -> Result<()> {
        if self.fail_on == Some(reg) {
            return Err(Error::Bus(format!("injected failure on {:?}", reg)));
        }
        if self.failures > 0 {
            self.failures -= 1;
            return Err(Error::Bus("injected failure".to_string()));
        }
        Ok(())
    }
}

impl RegisterBus for MockBus {
    fn read_register(&mut self, reg: Register) -> Result<u8> {
        self.check_failure(reg)?;
        let value = match self.scripted.get_mut(&reg).and_then(|q| q.pop_front()) {
            Some(v) => v,
            None => self.registers[reg.addr() as usize],
        };
        self.ops.push(BusOp::Read(reg, value));
        Ok(value)
    }

    fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        self.check_failure(reg)?;
        self.registers[reg.addr() as usize] = value;
        self.ops.push(BusOp::Write(reg, value));
        Ok(())
    }
}
