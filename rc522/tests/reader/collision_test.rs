use rc522::picc::SessionState;
use rc522::{Error, ErrorKind, ProtocolConfig, TieBreak};

use crate::common::fixtures::{one_bit_pair, staircase_triple};
use crate::common::{protocol, reader_with};

#[test]
fn one_bit_difference_resolves_in_two_rounds() {
    let (a, b) = one_bit_pair();
    let (mut pcd, _sim) = reader_with(&[&a, &b]);
    let mut session = pcd.identification(&ProtocolConfig::default()).unwrap();
    session.detect().unwrap();
    let id = session.resolve_identifier().unwrap();
    assert_eq!(id.rounds(), 2);
    // PreferOne follows the card with bit 2 set
    assert_eq!(id.uid().as_bytes(), &b[..]);
    assert_eq!(session.select(&id).unwrap().uid.as_bytes(), &b[..]);
}

#[test]
fn both_cards_identified_one_after_another() {
    let (a, b) = one_bit_pair();
    let (mut pcd, _sim) = reader_with(&[&a, &b]);
    let cfg = ProtocolConfig::default();

    let mut session = pcd.identification(&cfg).unwrap();
    let first = session.identify().unwrap().unwrap();
    session.halt().unwrap();

    let second = pcd.identification(&cfg).unwrap().identify().unwrap().unwrap();
    assert_ne!(first.uid, second.uid);
    assert_eq!(second.uid.as_bytes(), &a[..]);
}

#[test]
fn round_limit_aborts_to_idle() {
    let cards = staircase_triple();
    let refs: Vec<&[u8]> = cards.iter().map(Vec::as_slice).collect();
    let (mut pcd, _sim) = reader_with(&refs);

    let mut session = pcd.identification(&protocol(2)).unwrap();
    session.detect().unwrap();
    let err = session.resolve_identifier().unwrap_err();
    assert!(matches!(err, Error::CollisionLimit { rounds: 2 }));
    assert_eq!(err.kind(), ErrorKind::Collision);
    assert!(!err.is_fatal());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn three_cards_within_budget() {
    let cards = staircase_triple();
    let refs: Vec<&[u8]> = cards.iter().map(Vec::as_slice).collect();
    let (mut pcd, _sim) = reader_with(&refs);

    let mut session = pcd.identification(&protocol(3)).unwrap();
    session.detect().unwrap();
    let id = session.resolve_identifier().unwrap();
    assert_eq!(id.rounds(), 3);
    assert_eq!(id.uid().as_bytes(), &cards[2][..]);
}

#[test]
fn prefer_zero_follows_the_cleared_bit() {
    let (a, b) = one_bit_pair();
    let (mut pcd, _sim) = reader_with(&[&a, &b]);
    let cfg = ProtocolConfig {
        tie_break: TieBreak::PreferZero,
        ..ProtocolConfig::default()
    };
    let v = pcd.identification(&cfg).unwrap().identify().unwrap().unwrap();
    assert_eq!(v.uid.as_bytes(), &a[..]);
}

#[test]
fn unlocatable_collision_is_reported() {
    let (a, b) = one_bit_pair();
    let (mut pcd, sim) = reader_with(&[&a, &b]);
    sim.borrow_mut().set_collision_pos_invalid(true);
    let mut session = pcd.identification(&ProtocolConfig::default()).unwrap();
    session.detect().unwrap();
    assert!(matches!(
        session.resolve_identifier(),
        Err(Error::CollisionUnresolvable { known_bits: 0 })
    ));
    assert_eq!(session.state(), SessionState::Idle);
}
