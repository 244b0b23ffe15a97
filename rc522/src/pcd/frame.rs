// rc522/src/pcd/frame.rs

use crate::protocol::anticollision::Collision;
use crate::protocol::commands::PiccCommand;

/// Bit-oriented framing for one transceive (BitFramingReg fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Framing {
    /// Valid bits in the last transmitted byte (0 = all 8).
    pub tx_last_bits: u8,
    /// Bit position of the first received bit in the first FIFO byte.
    pub rx_align: u8,
}

impl Framing {
    /// Whole bytes both ways.
    pub const BYTES: Framing = Framing {
        tx_last_bits: 0,
        rx_align: 0,
    };

    pub fn for_command(cmd: &PiccCommand) -> Self {
        Self {
            tx_last_bits: cmd.tx_last_bits(),
            rx_align: cmd.rx_align(),
        }
    }

    /// Value for BitFramingReg without StartSend.
    pub fn bit_framing_reg(&self) -> u8 {
        ((self.rx_align & 0x07) << 4) | (self.tx_last_bits & 0x07)
    }
}

/// Bytes read back from the FIFO after a transceive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxFrame {
    pub data: Vec<u8>,
    /// Valid bits in the last byte (ControlReg RxLastBits, 0 = all 8).
    pub valid_bits: u8,
    pub collision: Option<Collision>,
}

impl RxFrame {
    /// Received bits, counting the whole first byte even when it was aligned.
    pub fn bit_len(&self) -> usize {
        match (self.data.len(), self.valid_bits) {
            (0, _) => 0,
            (n, 0) => n * 8,
            (n, v) => (n - 1) * 8 + v as usize,
        }
    }
}
