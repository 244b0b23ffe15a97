use rc522::picc::{Detection, SessionState};
use rc522::transport::CardState;
use rc522::ProtocolConfig;

use crate::common::fixtures::{hlta_frame, uid4};
use crate::common::reader_with;

#[test]
fn halted_card_answers_only_wupa() {
    let uid = uid4();
    let (mut pcd, sim) = reader_with(&[&uid]);
    let mut session = pcd.identification(&ProtocolConfig::default()).unwrap();
    session.identify().unwrap().unwrap();
    session.halt().unwrap();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(sim.borrow().cards()[0].state(), CardState::Halt);

    let last = sim.borrow().frames().last().cloned().unwrap();
    assert_eq!(last.data, hlta_frame());

    assert_eq!(session.detect().unwrap(), Detection::NoCard);
    match session.wake().unwrap() {
        Detection::Present(p) => assert!(!p.collided),
        Detection::NoCard => panic!("WUPA must wake a halted card"),
    }
    let id = session.resolve_identifier().unwrap();
    assert_eq!(session.select(&id).unwrap().uid.as_bytes(), &uid[..]);
}

#[test]
fn halt_without_selected_card_is_silent() {
    let (mut pcd, _sim) = reader_with(&[]);
    let mut session = pcd.identification(&ProtocolConfig::default()).unwrap();
    assert!(session.halt().is_ok());
}
