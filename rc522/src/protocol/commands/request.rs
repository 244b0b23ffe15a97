// rc522/src/protocol/commands/request.rs

use crate::constants::{PICC_REQA, PICC_WUPA};

/// Encode REQA (short frame, 7 bits). Wakes cards in IDLE only.
pub fn encode_reqa() -> Vec<u8> {
    vec![PICC_REQA]
}

/// Encode WUPA (short frame, 7 bits). Wakes cards in IDLE and HALT.
pub fn encode_wupa() -> Vec<u8> {
    vec![PICC_WUPA]
}
