// rc522/src/protocol/commands/halt.rs

use crate::constants::PICC_HLTA;

/// Encode HLTA payload (without CRC_A).
pub fn encode_hlta() -> Vec<u8> {
    vec![PICC_HLTA, 0x00]
}
