use rc522::picc::{Detection, SessionState};
use rc522::protocol::CascadeLevel;
use rc522::transport::CardState;
use rc522::{CardType, ProtocolConfig, SimCard, UidSize};

use crate::common::fixtures::{uid10, uid4, uid7};
use crate::common::{reader_with, reader_with_sim_cards};

#[test]
fn single_size_uid_end_to_end() {
    let uid = uid4();
    let (mut pcd, sim) = reader_with(&[&uid]);
    let verified = pcd
        .identification(&ProtocolConfig::default()).unwrap()
        .identify()
        .unwrap()
        .expect("card in field");

    assert_eq!(verified.uid.as_bytes(), &uid[..]);
    assert_eq!(verified.uid.to_hex(), "041A2B3C");
    assert_eq!(verified.card_type, CardType::MifareClassic1K);

    // REQA, one ANTICOLLISION, SELECT
    let frames = sim.borrow().frames().to_vec();
    let bits: Vec<usize> = frames.iter().map(|f| f.bits).collect();
    assert_eq!(bits, vec![7, 16, 72]);
    assert_eq!(frames[2].data[..7], [0x93, 0x70, 0x04, 0x1A, 0x2B, 0x3C, 0x04 ^ 0x1A ^ 0x2B ^ 0x3C]);
}

#[test]
fn double_size_uid_walks_two_levels() {
    let uid = uid7();
    let (mut pcd, sim) = reader_with_sim_cards(vec![SimCard::new(&uid).unwrap().with_sak(0x00)]);
    let mut session = pcd.identification(&ProtocolConfig::default()).unwrap();
    session.detect().unwrap();
    let id = session.resolve_identifier().unwrap();
    assert_eq!(id.uid().size(), UidSize::Double);
    assert_eq!(id.final_level(), CascadeLevel::Two);
    assert_eq!(id.rounds(), 2);

    let verified = session.select(&id).unwrap();
    assert_eq!(verified.uid.as_bytes(), &uid[..]);
    assert_eq!(verified.card_type, CardType::MifareUltralight);

    // CL1 select carries the cascade tag
    let frames = sim.borrow().frames().to_vec();
    let cl1_select = frames
        .iter()
        .find(|f| f.bits == 72 && f.data[0] == 0x93)
        .unwrap();
    assert_eq!(cl1_select.data[2], 0x88);
}

#[test]
fn triple_size_uid() {
    let uid = uid10();
    let (mut pcd, _sim) = reader_with(&[&uid]);
    let verified = pcd
        .identification(&ProtocolConfig::default()).unwrap()
        .identify()
        .unwrap()
        .unwrap();
    assert_eq!(verified.uid.size(), UidSize::Triple);
    assert_eq!(verified.uid.as_bytes(), &uid[..]);
}

#[test]
fn empty_field_is_no_card() {
    let (mut pcd, _sim) = reader_with(&[]);
    let mut session = pcd.identification(&ProtocolConfig::default()).unwrap();
    assert_eq!(session.detect().unwrap(), Detection::NoCard);
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.identify().unwrap().is_none());
}

#[test]
fn card_removed_between_steps() {
    let uid = uid4();
    let (mut pcd, sim) = reader_with(&[&uid]);
    let mut session = pcd.identification(&ProtocolConfig::default()).unwrap();
    assert!(matches!(session.detect().unwrap(), Detection::Present(_)));
    sim.borrow_mut().clear_cards();
    let err = session.resolve_identifier().unwrap_err();
    assert!(matches!(err, rc522::Error::NoResponse));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn antenna_off_resets_cards() {
    let uid = uid4();
    let (mut pcd, sim) = reader_with(&[&uid]);
    let cfg = ProtocolConfig::default();
    assert!(pcd.identification(&cfg).unwrap().identify().unwrap().is_some());
    assert_eq!(sim.borrow().cards()[0].state(), CardState::Active);
    pcd.antenna_off().unwrap();
    assert_eq!(sim.borrow().cards()[0].state(), CardState::Idle);
    pcd.antenna_on().unwrap();
    assert!(pcd.identification(&cfg).unwrap().identify().unwrap().is_some());
}
