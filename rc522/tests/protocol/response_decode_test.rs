use rc522::protocol::{decode_atqa, decode_sak};
use rc522::{Error, UidSize};

#[test]
fn atqa_size_codes() {
    assert_eq!(decode_atqa(&[0x04, 0x00], 0).unwrap().uid_size(), Some(UidSize::Single));
    assert_eq!(decode_atqa(&[0x44, 0x00], 0).unwrap().uid_size(), Some(UidSize::Double));
    assert_eq!(decode_atqa(&[0x84, 0x00], 0).unwrap().uid_size(), Some(UidSize::Triple));
    assert_eq!(decode_atqa(&[0xC4, 0x00], 0).unwrap().uid_size(), None);
}

#[test]
fn sak_with_crc() {
    let (sak, crc) = decode_sak(&[0x08, 0xB6, 0xDD], 0).unwrap();
    assert_eq!(sak.as_u8(), 0x08);
    assert!(!sak.is_uid_incomplete());
    assert_eq!(crc, [0xB6, 0xDD]);
}

#[test]
fn sak_without_crc_is_rejected() {
    match decode_sak(&[0x08], 0) {
        Err(Error::InvalidLength {
            expected: 3,
            actual: 1,
        }) => {}
        other => panic!("expected InvalidLength, got {:?}", other),
    }
}
