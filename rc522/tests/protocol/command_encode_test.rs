use rc522::protocol::commands::{
    encode_anticollision, encode_hlta, encode_reqa, encode_select, encode_wupa,
    known_bits_from_nvb, nvb, PiccCommand,
};
use rc522::protocol::CascadeLevel;

#[test]
fn short_frames() {
    assert_eq!(encode_reqa(), vec![0x26]);
    assert_eq!(encode_wupa(), vec![0x52]);
    assert_eq!(PiccCommand::WupA.tx_last_bits(), 7);
}

#[test]
fn nvb_values() {
    assert_eq!(nvb(0), 0x20);
    assert_eq!(nvb(13), 0x35);
    assert_eq!(nvb(32), 0x60);
    for k in 0..=32u8 {
        assert_eq!(known_bits_from_nvb(nvb(k)), Some(k));
    }
    assert_eq!(known_bits_from_nvb(0x70), None);
    assert_eq!(known_bits_from_nvb(0x18), None);
}

#[test]
fn anticollision_masks_partial_byte() {
    let frame = encode_anticollision(CascadeLevel::Two, &[0xFF, 0xFF, 0, 0], 11);
    assert_eq!(frame, vec![0x95, 0x33, 0xFF, 0x07]);
}

#[test]
fn select_frame_carries_bcc() {
    let frame = encode_select(CascadeLevel::One, &[0x04, 0x1A, 0x2B, 0x3C]);
    assert_eq!(frame, vec![0x93, 0x70, 0x04, 0x1A, 0x2B, 0x3C, 0x04 ^ 0x1A ^ 0x2B ^ 0x3C]);
}

#[test]
fn hlta_body() {
    assert_eq!(encode_hlta(), vec![0x50, 0x00]);
    assert!(PiccCommand::HltA.appends_crc());
    assert!(!PiccCommand::ReqA.appends_crc());
}
