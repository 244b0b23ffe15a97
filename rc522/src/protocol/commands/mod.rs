// rc522/src/protocol/commands/mod.rs

pub mod halt;
pub mod request;
pub mod select;

pub use halt::encode_hlta;
pub use request::{encode_reqa, encode_wupa};
pub use select::{encode_anticollision, encode_select, known_bits_from_nvb, nvb};

use crate::constants::SHORT_FRAME_BITS;
use crate::protocol::cascade::CascadeLevel;

/// ISO/IEC 14443-3 Type A commands sent by the reader. New commands should
/// be added here with their encoder in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PiccCommand {
    ReqA,
    WupA,
    Anticollision {
        level: CascadeLevel,
        known_bits: u8,
        prefix: [u8; 4],
    },
    Select {
        level: CascadeLevel,
        uid_cl: [u8; 4],
    },
    HltA,
}

impl PiccCommand {
    /// Encode the frame body. CRC_A is appended by the caller when
    /// [`PiccCommand::appends_crc`] is true.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::ReqA => encode_reqa(),
            Self::WupA => encode_wupa(),
            Self::Anticollision {
                level,
                known_bits,
                prefix,
            } => encode_anticollision(*level, prefix, *known_bits),
            Self::Select { level, uid_cl } => encode_select(*level, uid_cl),
            Self::HltA => encode_hlta(),
        }
    }

    pub fn appends_crc(&self) -> bool {
        matches!(self, Self::Select { .. } | Self::HltA)
    }

    /// Valid bits in the last transmitted byte (0 = all 8).
    pub fn tx_last_bits(&self) -> u8 {
        match self {
            Self::ReqA | Self::WupA => SHORT_FRAME_BITS,
            Self::Anticollision { known_bits, .. } => known_bits % 8,
            _ => 0,
        }
    }

    /// Bit position at which the first received bit lands in the first FIFO byte.
    pub fn rx_align(&self) -> u8 {
        match self {
            Self::Anticollision { known_bits, .. } => known_bits % 8,
            _ => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ReqA => "REQA",
            Self::WupA => "WUPA",
            Self::Anticollision { .. } => "ANTICOLLISION",
            Self::Select { .. } => "SELECT",
            Self::HltA => "HLTA",
        }
    }
}
