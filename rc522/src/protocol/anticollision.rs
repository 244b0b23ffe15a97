// rc522/src/protocol/anticollision.rs

//! Bit bookkeeping for one cascade level of the anticollision loop.
//!
//! The level field is the 4 UID/CT bytes plus BCC. `known_bits` counts the
//! leading bits of that field already fixed; each round sends those bits
//! and merges whatever the cards answered for the rest.

use crate::constants::CASCADE_LEVEL_BITS;
use crate::protocol::cascade::CascadeLevel;
use crate::protocol::checksum::bcc;
use crate::protocol::commands::PiccCommand;
use crate::{Error, Result};

/// Value given to a bit on which the cards disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Follow the card that answered with a 1 (stronger load modulation).
    #[default]
    PreferOne,
    PreferZero,
}

/// Collision reported by the reader for one received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// 1-based position of the first colliding bit, counted from bit 0 of
    /// the first FIFO byte (1..=32).
    At(u8),
    /// The reader saw a collision but could not locate it.
    PositionUnknown,
}

/// Result of merging one anticollision answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// All 32 bits known and BCC verified.
    Complete([u8; 4]),
    /// A collision fixed one more bit; `known_bits` is the new prefix length.
    Continue { known_bits: u8 },
}

#[derive(Debug, Clone)]
pub struct CollisionState {
    level: CascadeLevel,
    field: [u8; 5],
    known_bits: u8,
    rounds: usize,
    collisions: usize,
}

impl CollisionState {
    pub fn new(level: CascadeLevel) -> Self {
        Self {
            level,
            field: [0; 5],
            known_bits: 0,
            rounds: 0,
            collisions: 0,
        }
    }

    pub fn level(&self) -> CascadeLevel {
        self.level
    }

    pub fn known_bits(&self) -> u8 {
        self.known_bits
    }

    /// Answers merged so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// The ANTICOLLISION command for the current prefix.
    pub fn command(&self) -> PiccCommand {
        PiccCommand::Anticollision {
            level: self.level,
            known_bits: self.known_bits,
            prefix: [self.field[0], self.field[1], self.field[2], self.field[3]],
        }
    }

    /// Merge an answer to [`CollisionState::command`].
    ///
    /// `data` starts at byte `known_bits / 8` of the level field; bits of the
    /// first byte below `known_bits % 8` are ignored.
    pub fn merge(
        &mut self,
        data: &[u8],
        valid_bits: u8,
        collision: Option<Collision>,
        tie_break: TieBreak,
    ) -> Result<Progress> {
        self.rounds += 1;

        let start = (self.known_bits / 8) as usize;
        let align = self.known_bits % 8;
        let expected = self.field.len() - start;
        if data.is_empty() || data.len() > expected {
            return Err(Error::InvalidLength {
                expected,
                actual: data.len(),
            });
        }

        for (i, &b) in data.iter().enumerate() {
            let idx = start + i;
            if i == 0 {
                let mask = 0xFFu8 << align;
                self.field[idx] = (self.field[idx] & !mask) | (b & mask);
            } else {
                self.field[idx] = b;
            }
        }

        match collision {
            None => self.complete(data.len(), expected, valid_bits),
            Some(Collision::PositionUnknown) => Err(Error::CollisionUnresolvable {
                known_bits: self.known_bits,
            }),
            Some(Collision::At(rel)) => self.fix_collision(start as u8, rel, tie_break),
        }
    }

    fn complete(&mut self, len: usize, expected: usize, valid_bits: u8) -> Result<Progress> {
        if len != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: len,
            });
        }
        if valid_bits != 0 {
            return Err(Error::FrameFormat(format!(
                "anticollision answer ended with {} valid bits",
                valid_bits
            )));
        }
        let bytes = [self.field[0], self.field[1], self.field[2], self.field[3]];
        let expected_bcc = bcc(&bytes);
        if self.field[4] != expected_bcc {
            return Err(Error::BccMismatch {
                expected: expected_bcc,
                actual: self.field[4],
            });
        }
        self.known_bits = CASCADE_LEVEL_BITS;
        Ok(Progress::Complete(bytes))
    }

    fn fix_collision(&mut self, start_byte: u8, rel: u8, tie_break: TieBreak) -> Result<Progress> {
        let abs = 8 * start_byte + rel;
        if rel == 0 || abs <= self.known_bits || abs > CASCADE_LEVEL_BITS {
            return Err(Error::CollisionUnresolvable {
                known_bits: self.known_bits,
            });
        }

        let bit = abs - 1;
        let byte = (bit / 8) as usize;
        let pos = bit % 8;
        match tie_break {
            TieBreak::PreferOne => self.field[byte] |= 1 << pos,
            TieBreak::PreferZero => self.field[byte] &= !(1 << pos),
        }
        let keep = if pos == 7 { 0xFF } else { (1u8 << (pos + 1)) - 1 };
        self.field[byte] &= keep;
        for b in self.field[byte + 1..].iter_mut() {
            *b = 0;
        }

        self.known_bits = abs;
        self.collisions += 1;
        Ok(Progress::Continue { known_bits: abs })
    }
}

impl Collision {
    /// Decode the MFRC522 CollReg value (CollPos 0 means bit 32).
    pub fn from_coll_reg(raw: u8) -> Self {
        if raw & 0x20 != 0 {
            return Collision::PositionUnknown;
        }
        match raw & 0x1F {
            0 => Collision::At(32),
            p => Collision::At(p),
        }
    }
}
