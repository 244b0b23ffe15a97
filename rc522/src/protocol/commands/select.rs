// rc522/src/protocol/commands/select.rs

use crate::constants::{CASCADE_LEVEL_BITS, NVB_SELECT};
use crate::protocol::cascade::CascadeLevel;
use crate::protocol::checksum::bcc;

/// Number of valid bits: high nibble counts whole bytes (SEL and NVB
/// included), low nibble the extra bits of a partial byte.
pub fn nvb(known_bits: u8) -> u8 {
    ((2 + known_bits / 8) << 4) | (known_bits % 8)
}

/// Inverse of [`nvb`]; `None` when the value cannot describe an
/// anticollision prefix.
pub fn known_bits_from_nvb(nvb: u8) -> Option<u8> {
    let bytes = nvb >> 4;
    let bits = nvb & 0x0F;
    if !(2..=7).contains(&bytes) || bits > 7 {
        return None;
    }
    let known = (bytes - 2) * 8 + bits;
    (known <= CASCADE_LEVEL_BITS).then_some(known)
}

/// Encode an ANTICOLLISION frame carrying the first `known_bits` bits of `prefix`.
/// Only the bytes that hold known bits are sent; bits above `known_bits % 8`
/// in the last byte are masked off.
pub fn encode_anticollision(level: CascadeLevel, prefix: &[u8; 4], known_bits: u8) -> Vec<u8> {
    let known = known_bits.min(CASCADE_LEVEL_BITS);
    let whole = (known / 8) as usize;
    let extra = known % 8;

    let mut buf = Vec::with_capacity(2 + whole + 1);
    buf.push(level.sel_code());
    buf.push(nvb(known));
    buf.extend_from_slice(&prefix[..whole]);
    if extra > 0 {
        buf.push(prefix[whole] & ((1u8 << extra) - 1));
    }
    buf
}

/// Encode a full SELECT frame (without CRC_A): SEL, NVB=0x70, 4 bytes, BCC.
pub fn encode_select(level: CascadeLevel, uid_cl: &[u8; 4]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(7 + 2);
    buf.push(level.sel_code());
    buf.push(NVB_SELECT);
    buf.extend_from_slice(uid_cl);
    buf.push(bcc(uid_cl));
    buf
}
