// rc522/src/transport/sim.rs

//! Register-level MFRC522 simulation with an RF field of ISO/IEC 14443-3
//! Type A cards.
//!
//! Covers what the identification handshake touches: FIFO, CommandReg,
//! the IRQ registers, bit framing, the CRC coprocessor, CollReg, the
//! response timer (as an immediate TimerIRq when no card answers) and
//! soft reset. Cards answering the same frame are superposed bit by bit;
//! the first disagreement is reported as a collision and every later
//! bit reads as zero.

use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::constants::{
    CASCADE_LEVEL_BITS, FIFO_SIZE, NVB_SELECT, PICC_HLTA, PICC_REQA, PICC_WUPA, SAK_CASCADE_BIT,
};
use crate::pcd::register::{bits, PcdCommand, Register};
use crate::protocol::cascade::{self, CascadeLevel};
use crate::protocol::checksum::{crc_a, crc_a_u16, verify_crc_a};
use crate::protocol::commands::known_bits_from_nvb;
use crate::transport::traits::RegisterBus;
use crate::types::UidSize;
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// ISO/IEC 14443-3 card states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Idle,
    Ready(CascadeLevel),
    Active,
    Halt,
}

/// A simulated PICC.
#[derive(Debug, Clone)]
pub struct SimCard {
    uid: Vec<u8>,
    atqa: [u8; 2],
    sak: u8,
    state: CardState,
}

impl SimCard {
    /// Card with the ATQA matching its UID size and SAK 0x08 (MIFARE Classic 1K).
    pub fn new(uid: &[u8]) -> Result<Self> {
        let size = UidSize::from_len(uid.len()).ok_or(Error::InvalidLength {
            expected: 4,
            actual: uid.len(),
        })?;
        let atqa = match size {
            UidSize::Single => [0x04, 0x00],
            UidSize::Double => [0x44, 0x00],
            UidSize::Triple => [0x84, 0x00],
        };
        Ok(Self {
            uid: uid.to_vec(),
            atqa,
            sak: 0x08,
            state: CardState::Idle,
        })
    }

    /// SAK sent after the final cascade level.
    pub fn with_sak(mut self, sak: u8) -> Self {
        self.sak = sak;
        self
    }

    pub fn with_atqa(mut self, atqa: [u8; 2]) -> Self {
        self.atqa = atqa;
        self
    }

    pub fn uid(&self) -> &[u8] {
        &self.uid
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    fn last_level(&self) -> CascadeLevel {
        // length validated in new()
        CascadeLevel::last_for(UidSize::from_len(self.uid.len()).unwrap_or(UidSize::Single))
    }

    /// Losing the field powers the card down.
    fn field_reset(&mut self) {
        self.state = CardState::Idle;
    }

    /// Commands the card does not expect in READY/ACTIVE send it back to IDLE.
    fn unexpected(&mut self) -> Option<Vec<bool>> {
        if matches!(self.state, CardState::Ready(_) | CardState::Active) {
            self.state = CardState::Idle;
        }
        None
    }

    /// Process one frame of `nbits` bits; returns the answer bits, LSB first.
    fn answer(&mut self, frame: &[u8], nbits: usize) -> Option<Vec<bool>> {
        if nbits == 7 {
            let wake = match frame[0] & 0x7F {
                PICC_REQA => self.state == CardState::Idle,
                PICC_WUPA => matches!(self.state, CardState::Idle | CardState::Halt),
                _ => false,
            };
            if !wake {
                return self.unexpected();
            }
            self.state = CardState::Ready(CascadeLevel::One);
            return Some(to_bits(&self.atqa, 16));
        }
        if nbits < 16 || frame.len() < 2 {
            return self.unexpected();
        }

        if frame[0] == PICC_HLTA {
            let valid = nbits == 32 && frame[1] == 0x00 && verify_crc_a(frame);
            if valid && self.state == CardState::Active {
                self.state = CardState::Halt;
                return None;
            }
            return self.unexpected();
        }

        let level = match CascadeLevel::from_sel_code(frame[0]) {
            Some(level) => level,
            None => return self.unexpected(),
        };
        let current = match self.state {
            CardState::Ready(current) => current,
            _ => return self.unexpected(),
        };
        if current != level {
            return self.unexpected();
        }
        let field = cascade::level_field(&self.uid, level)?;

        if frame[1] == NVB_SELECT {
            if nbits != 72 || !verify_crc_a(frame) || frame[2..7] != field {
                return None;
            }
            let last = level == self.last_level();
            let sak = if last { self.sak } else { SAK_CASCADE_BIT };
            self.state = match level.next() {
                Some(next) if !last => CardState::Ready(next),
                _ => CardState::Active,
            };
            let mut resp = vec![sak];
            resp.extend_from_slice(&crc_a(&[sak]));
            return Some(to_bits(&resp, 24));
        }

        let known = known_bits_from_nvb(frame[1])? as usize;
        if nbits != 16 + known {
            return self.unexpected();
        }
        let prefix = &frame[2..];
        if (0..known).any(|i| bit(prefix, i) != bit(&field, i)) {
            return None;
        }
        Some((known..field.len() * 8).map(|i| bit(&field, i)).collect())
    }
}

fn bit(bytes: &[u8], i: usize) -> bool {
    (bytes[i / 8] >> (i % 8)) & 1 == 1
}

fn to_bits(bytes: &[u8], n: usize) -> Vec<bool> {
    (0..n).map(|i| bit(bytes, i)).collect()
}

/// One frame sent into the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimFrame {
    pub data: Vec<u8>,
    pub bits: usize,
}

/// Simulated reader chip. Implements [`RegisterBus`] so it can sit behind
/// a [`crate::pcd::Pcd`] exactly where an SPI transport would.
#[derive(Debug)]
pub struct SimulatedReader {
    regs: [u8; 64],
    fifo: VecDeque<u8>,
    cards: Vec<SimCard>,
    version: u8,
    frames: Vec<SimFrame>,
    stuck: HashMap<Register, u8>,
    reset_busy_reads: usize,
    reset_pending: usize,
    reset_hangs: bool,
    unresponsive: bool,
    corrupt_sak_crc: bool,
    collision_pos_invalid: bool,
}

impl Default for SimulatedReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedReader {
    /// Powered-on chip reporting version 2.0 (0x92), antenna off, empty field.
    pub fn new() -> Self {
        let mut sim = Self {
            regs: [0; 64],
            fifo: VecDeque::with_capacity(FIFO_SIZE),
            cards: Vec::new(),
            version: 0x92,
            frames: Vec::new(),
            stuck: HashMap::new(),
            reset_busy_reads: 1,
            reset_pending: 0,
            reset_hangs: false,
            unresponsive: false,
            corrupt_sak_crc: false,
            collision_pos_invalid: false,
        };
        sim.load_reset_values();
        sim
    }

    pub fn with_card(mut self, card: SimCard) -> Self {
        self.cards.push(card);
        self
    }

    pub fn insert_card(&mut self, card: SimCard) {
        self.cards.push(card);
    }

    /// Remove the card with `uid`; returns false if it was not in the field.
    pub fn remove_card(&mut self, uid: &[u8]) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.uid() != uid);
        before != self.cards.len()
    }

    pub fn clear_cards(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[SimCard] {
        &self.cards
    }

    /// Frames sent into the field since the last [`SimulatedReader::clear_frames`].
    pub fn frames(&self) -> &[SimFrame] {
        &self.frames
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    pub fn register(&self, reg: Register) -> u8 {
        self.regs[reg.addr() as usize]
    }

    pub fn antenna_on(&self) -> bool {
        self.register(Register::TxControl) & bits::TX_ANTENNA_ON == bits::TX_ANTENNA_ON
    }

    pub fn set_version(&mut self, version: u8) {
        self.version = version;
    }

    /// Number of CommandReg reads that still show PowerDown after a soft reset.
    pub fn set_reset_busy_reads(&mut self, n: usize) {
        self.reset_busy_reads = n;
    }

    /// Soft reset never completes.
    pub fn set_reset_hangs(&mut self, hangs: bool) {
        self.reset_hangs = hangs;
    }

    /// The chip stops raising IRQs for transceive commands.
    pub fn set_unresponsive(&mut self, unresponsive: bool) {
        self.unresponsive = unresponsive;
    }

    /// Flip one bit of the CRC_A following each SAK.
    pub fn set_corrupt_sak_crc(&mut self, corrupt: bool) {
        self.corrupt_sak_crc = corrupt;
    }

    /// Report collisions with CollPosNotValid set.
    pub fn set_collision_pos_invalid(&mut self, invalid: bool) {
        self.collision_pos_invalid = invalid;
    }

    /// Writes to `reg` are ignored and reads return `value`.
    pub fn stick_register(&mut self, reg: Register, value: u8) {
        self.stuck.insert(reg, value);
    }

    fn load_reset_values(&mut self) {
        self.regs = [0; 64];
        let defaults = [
            (Register::Command, 0x20),
            (Register::ComIEn, 0x80),
            (Register::ComIrq, 0x14),
            (Register::WaterLevel, 0x08),
            (Register::Control, 0x10),
            (Register::Coll, 0x80),
            (Register::Mode, 0x3F),
            (Register::TxControl, 0x80),
            (Register::TxSel, 0x10),
            (Register::RxSel, 0x84),
            (Register::RxThreshold, 0x84),
            (Register::Demod, 0x4D),
            (Register::ModWidth, 0x26),
            (Register::RfCfg, 0x48),
            (Register::GsN, 0x88),
            (Register::CwGsP, 0x20),
            (Register::ModGsP, 0x20),
        ];
        for (reg, value) in defaults {
            self.regs[reg.addr() as usize] = value;
        }
        self.fifo.clear();
    }

    fn set(&mut self, reg: Register, value: u8) {
        self.regs[reg.addr() as usize] = value;
    }

    fn or(&mut self, reg: Register, mask: u8) {
        self.regs[reg.addr() as usize] |= mask;
    }

    fn field_reset(&mut self) {
        for card in &mut self.cards {
            card.field_reset();
        }
    }

    fn soft_reset(&mut self) {
        self.load_reset_values();
        self.field_reset();
        self.reset_pending = self.reset_busy_reads;
    }

    fn run_command(&mut self, value: u8) {
        self.set(Register::Command, value & 0x3F);
        match PcdCommand::from_bits(value) {
            Some(PcdCommand::SoftReset) => self.soft_reset(),
            Some(PcdCommand::CalcCrc) => {
                let data: Vec<u8> = self.fifo.drain(..).collect();
                let crc = crc_a_u16(&data);
                self.set(Register::CrcResultMsb, (crc >> 8) as u8);
                self.set(Register::CrcResultLsb, (crc & 0xFF) as u8);
                self.or(Register::DivIrq, bits::DIV_IRQ_CRC);
            }
            _ => {}
        }
    }

    fn write_irq(&mut self, reg: Register, value: u8) {
        let mask = value & bits::IRQ_ALL;
        if value & bits::IRQ_SET1 != 0 {
            self.regs[reg.addr() as usize] |= mask;
        } else {
            self.regs[reg.addr() as usize] &= !mask;
        }
    }

    fn current_command(&self) -> Option<PcdCommand> {
        PcdCommand::from_bits(self.register(Register::Command))
    }

    fn transceive(&mut self) {
        let tx: Vec<u8> = self.fifo.drain(..).collect();
        let framing = self.register(Register::BitFraming);
        let tx_last = (framing & bits::FRAMING_TX_LAST_BITS) as usize;
        let rx_align = ((framing >> 4) & 0x07) as usize;
        let nbits = match tx.len() {
            0 => 0,
            n => (n - 1) * 8 + if tx_last == 0 { 8 } else { tx_last },
        };
        trace!("sim field << {} ({} bits)", bytes_to_hex_spaced(&tx), nbits);
        self.frames.push(SimFrame {
            data: tx.clone(),
            bits: nbits,
        });

        if self.unresponsive {
            return;
        }
        self.set(Register::Error, 0);
        let coll = self.register(Register::Coll) & bits::COLL_VALUES_AFTER_COLL;
        self.set(Register::Coll, coll);
        self.or(Register::ComIrq, bits::IRQ_TX);

        if !self.antenna_on() || nbits == 0 {
            self.or(Register::ComIrq, bits::IRQ_TIMER);
            return;
        }

        let answers: Vec<Vec<bool>> = self
            .cards
            .iter_mut()
            .filter_map(|c| c.answer(&tx, nbits))
            .collect();
        if answers.is_empty() {
            self.or(Register::ComIrq, bits::IRQ_TIMER);
            return;
        }

        let len = answers.iter().map(Vec::len).max().unwrap_or(0);
        let mut out = Vec::with_capacity(len);
        let mut collision = None;
        for i in 0..len {
            if collision.is_some() {
                out.push(false);
                continue;
            }
            let mut values = answers.iter().filter_map(|a| a.get(i).copied());
            let first = values.next().unwrap_or(false);
            if values.all(|v| v == first) {
                out.push(first);
            } else {
                collision = Some(i);
                out.push(true);
            }
        }

        if self.corrupt_sak_crc && nbits == 72 && tx.get(1) == Some(&NVB_SELECT) && out.len() == 24 {
            out[23] = !out[23];
        }

        let total = rx_align + out.len();
        let mut data = vec![0u8; total.div_ceil(8)];
        for (i, b) in out.iter().enumerate() {
            if *b {
                let p = rx_align + i;
                data[p / 8] |= 1 << (p % 8);
            }
        }
        trace!("sim field >> {} ({} bits)", bytes_to_hex_spaced(&data), out.len());
        self.fifo.extend(data);

        let control = self.register(Register::Control) & !bits::CONTROL_RX_LAST_BITS;
        self.set(Register::Control, control | (total % 8) as u8);

        if let Some(c) = collision {
            self.or(Register::Error, bits::ERR_COLL);
            let rel = rx_align + c + 1;
            let pos = if self.collision_pos_invalid || rel > CASCADE_LEVEL_BITS as usize {
                bits::COLL_POS_NOT_VALID
            } else {
                (rel % 32) as u8
            };
            self.or(Register::Coll, pos);
        }
        self.or(Register::ComIrq, bits::IRQ_RX);
    }
}

impl RegisterBus for SimulatedReader {
    fn read_register(&mut self, reg: Register) -> Result<u8> {
        if let Some(v) = self.stuck.get(&reg) {
            return Ok(*v);
        }
        let value = match reg {
            Register::FifoData => self.fifo.pop_front().unwrap_or(0),
            Register::FifoLevel => self.fifo.len() as u8,
            Register::Version => self.version,
            Register::Command => {
                let base = self.register(Register::Command);
                if self.reset_hangs {
                    base | bits::COMMAND_POWER_DOWN
                } else if self.reset_pending > 0 {
                    self.reset_pending -= 1;
                    base | bits::COMMAND_POWER_DOWN
                } else {
                    base
                }
            }
            _ => self.register(reg),
        };
        Ok(value)
    }

    fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        if self.stuck.contains_key(&reg) {
            return Ok(());
        }
        match reg {
            Register::Command => self.run_command(value),
            Register::ComIrq | Register::DivIrq => self.write_irq(reg, value),
            Register::FifoData => {
                if self.fifo.len() < FIFO_SIZE {
                    self.fifo.push_back(value);
                } else {
                    self.or(Register::Error, bits::ERR_BUFFER_OVFL);
                }
            }
            Register::FifoLevel => {
                if value & bits::FIFO_FLUSH != 0 {
                    self.fifo.clear();
                    let err = self.register(Register::Error) & !bits::ERR_BUFFER_OVFL;
                    self.set(Register::Error, err);
                }
            }
            Register::Coll => {
                let v = (self.register(Register::Coll) & !bits::COLL_VALUES_AFTER_COLL)
                    | (value & bits::COLL_VALUES_AFTER_COLL);
                self.set(Register::Coll, v);
            }
            Register::Error
            | Register::Status1
            | Register::Status2
            | Register::Version
            | Register::CrcResultMsb
            | Register::CrcResultLsb => {}
            Register::TxControl => {
                let was_on = self.antenna_on();
                self.set(Register::TxControl, value);
                if was_on && !self.antenna_on() {
                    self.field_reset();
                }
            }
            Register::BitFraming => {
                self.set(Register::BitFraming, value);
                if value & bits::FRAMING_START_SEND != 0
                    && self.current_command() == Some(PcdCommand::Transceive)
                {
                    self.transceive();
                }
            }
            _ => self.set(reg, value),
        }
        Ok(())
    }
}
