// rc522/src/protocol/responses/mod.rs

//! Decoders for card answers. Inputs are the raw FIFO bytes plus the
//! number of valid bits in the last byte (0 = all 8).

use crate::types::{Atqa, Sak};
use crate::{Error, Result};

fn require_whole_bytes(expected: usize, data: &[u8], valid_bits: u8) -> Result<()> {
    if data.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: data.len(),
        });
    }
    if valid_bits != 0 {
        return Err(Error::FrameFormat(format!(
            "expected whole bytes, last byte has {} valid bits",
            valid_bits
        )));
    }
    Ok(())
}

/// Decode ATQA (answer to REQA/WUPA): exactly two whole bytes.
pub fn decode_atqa(data: &[u8], valid_bits: u8) -> Result<Atqa> {
    require_whole_bytes(2, data, valid_bits)?;
    Ok(Atqa::from_bytes([data[0], data[1]]))
}

/// Split a SELECT answer into SAK and the CRC_A the card sent with it.
pub fn decode_sak(data: &[u8], valid_bits: u8) -> Result<(Sak, [u8; 2])> {
    require_whole_bytes(3, data, valid_bits)?;
    Ok((Sak::new(data[0]), [data[1], data[2]]))
}
