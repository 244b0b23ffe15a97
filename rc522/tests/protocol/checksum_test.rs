use rc522::protocol::checksum::{bcc, crc_a, crc_a_u16, verify_crc_a};

use crate::common::fixtures::{hex_bytes, hlta_frame};

#[test]
fn crc_a_reference_vectors() {
    assert_eq!(crc_a(&[0x00, 0x00]), [0xA0, 0x1E]);
    assert_eq!(crc_a(&[0x12, 0x34]), [0xCF, 0x26]);
    assert_eq!(crc_a(&[0x50, 0x00]), [0x57, 0xCD]);
}

#[test]
fn crc_a_u16_is_little_endian_of_bytes() {
    let crc = crc_a_u16(&[0x12, 0x34]);
    assert_eq!(crc.to_le_bytes(), crc_a(&[0x12, 0x34]));
}

#[test]
fn hlta_frame_verifies() {
    assert!(verify_crc_a(&hlta_frame()));
    let mut bad = hlta_frame();
    bad[3] ^= 0x01;
    assert!(!verify_crc_a(&bad));
}

#[test]
fn bcc_of_sample_uid() {
    assert_eq!(bcc(&hex_bytes("041A2B3C")), 0x04 ^ 0x1A ^ 0x2B ^ 0x3C);
    assert_eq!(bcc(&[0x88, 0x04, 0xA1, 0xB2]), 0x88 ^ 0x04 ^ 0xA1 ^ 0xB2);
}
