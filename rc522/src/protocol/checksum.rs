// rc522/src/protocol/checksum.rs

use crate::constants::CRC_A_PRESET;

/// Compute CRC_A (ISO/IEC 14443-3 Annex B) over `data`.
/// Returned in transmission order: low byte first.
pub fn crc_a(data: &[u8]) -> [u8; 2] {
    crc_a_u16(data).to_le_bytes()
}

/// CRC_A as a register value (CRCResultReg MSB:LSB).
pub fn crc_a_u16(data: &[u8]) -> u16 {
    data.iter().fold(CRC_A_PRESET, |crc, &b| {
        let mut ch = b ^ (crc & 0x00FF) as u8;
        ch ^= ch << 4;
        let ch = ch as u16;
        (crc >> 8) ^ (ch << 8) ^ (ch << 3) ^ (ch >> 4)
    })
}

/// True if the last two bytes of `frame` are the CRC_A of the bytes before them.
pub fn verify_crc_a(frame: &[u8]) -> bool {
    if frame.len() < 2 {
        return false;
    }
    let (body, crc) = frame.split_at(frame.len() - 2);
    crc_a(body) == [crc[0], crc[1]]
}

/// Block check character: XOR of the cascade level's four UID/CT bytes.
pub fn bcc(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc ^ b)
}
