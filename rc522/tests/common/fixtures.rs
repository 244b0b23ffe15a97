// fixtures.rs: card identifiers and frames shared by the integration tests

pub fn hex_bytes(s: &str) -> Vec<u8> {
    hex::decode(s).expect("fixture hex")
}

/// Single-size UID used throughout the examples in the docs.
pub fn uid4() -> Vec<u8> {
    hex_bytes("041A2B3C")
}

/// Double-size UID (NXP manufacturer byte 0x04, typical of Ultralight).
pub fn uid7() -> Vec<u8> {
    hex_bytes("04A1B2C3D4E5F6")
}

pub fn uid10() -> Vec<u8> {
    hex_bytes("0411223344556677889A")
}

/// Two single-size UIDs differing only in bit 2 of the first byte.
pub fn one_bit_pair() -> (Vec<u8>, Vec<u8>) {
    (hex_bytes("00112233"), hex_bytes("04112233"))
}

/// Three single-size UIDs that need one anticollision round each to
/// separate when the tie-break prefers ones.
pub fn staircase_triple() -> [Vec<u8>; 3] {
    [
        hex_bytes("01AABBCC"),
        hex_bytes("03AABBCC"),
        hex_bytes("07AABBCC"),
    ]
}

/// HLTA frame including CRC_A.
pub fn hlta_frame() -> Vec<u8> {
    hex_bytes("500057CD")
}
