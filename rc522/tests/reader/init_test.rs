use rc522::pcd::Register;
use rc522::test_support::fast_timing;
use rc522::{Error, ErrorKind, Pcd, PcdBuilder, SimulatedReader};

use crate::common::{init_logging, SharedSim};

fn shared() -> SharedSim {
    std::rc::Rc::new(std::cell::RefCell::new(SimulatedReader::new()))
}

#[test]
fn initialization_programs_timer_and_antenna() {
    init_logging();
    let sim = shared();
    let pcd = PcdBuilder::new()
        .with_bus(Box::new(sim.clone()))
        .with_timing(fast_timing())
        .build()
        .unwrap();
    assert_eq!(pcd.version(), 0x92);

    let s = sim.borrow();
    assert_eq!(s.register(Register::TPrescaler), 0xA9);
    let reload = u16::from(s.register(Register::TReloadHigh)) << 8
        | u16::from(s.register(Register::TReloadLow));
    assert_eq!(reload, 25 * 40);
    assert!(s.antenna_on());
}

#[test]
fn unknown_version_still_initializes() {
    init_logging();
    let sim = shared();
    sim.borrow_mut().set_version(0xB2);
    let pcd = Pcd::new(Box::new(sim)).with_timing(fast_timing()).initialize();
    assert_eq!(pcd.unwrap().version(), 0xB2);
}

#[test]
fn absent_chip_is_fatal() {
    init_logging();
    let sim = shared();
    sim.borrow_mut().set_version(0x00);
    let err = Pcd::new(Box::new(sim))
        .with_timing(fast_timing())
        .initialize()
        .err()
        .unwrap();
    assert!(matches!(err, Error::NoDevice { version: 0x00 }));
    assert_eq!(err.kind(), ErrorKind::Init);
    assert!(err.is_fatal());
}

#[test]
fn slow_reset_within_poll_budget() {
    init_logging();
    let sim = shared();
    sim.borrow_mut().set_reset_busy_reads(2);
    let timing = fast_timing();
    assert!(timing.reset_polls > 2);
    assert!(Pcd::new(Box::new(sim)).with_timing(timing).initialize().is_ok());
}

#[test]
fn stuck_antenna_is_readback_error() {
    init_logging();
    let sim = shared();
    sim.borrow_mut().stick_register(Register::TxControl, 0x80);
    match Pcd::new(Box::new(sim)).with_timing(fast_timing()).initialize() {
        Err(Error::InitReadback {
            register: Register::TxControl,
            ..
        }) => {}
        other => panic!("expected InitReadback, got {:?}", other.err()),
    }
}
