use rc522::pcd::Register;
use rc522::test_support::fast_timing;
use rc522::transport::MockBus;
use rc522::{Error, ErrorKind, Pcd};

use crate::common::init_logging;

#[test]
fn bus_failure_during_init_propagates() {
    init_logging();
    let mut bus = MockBus::new();
    bus.set_failures(1);
    let err = Pcd::new(Box::new(bus))
        .with_timing(fast_timing())
        .initialize()
        .err()
        .unwrap();
    assert!(matches!(err, Error::Init { .. }));
    assert_eq!(err.kind(), ErrorKind::Init);
    assert!(err.is_fatal());
}

#[test]
fn failing_version_read() {
    init_logging();
    let mut bus = MockBus::new();
    bus.fail_on = Some(Register::Version);
    let err = Pcd::new(Box::new(bus))
        .with_timing(fast_timing())
        .initialize()
        .err()
        .unwrap();
    match err {
        Error::Init { source } => match *source {
            Error::Bus(msg) => assert!(msg.contains("Version")),
            other => panic!("expected bus error inside Init, got {:?}", other),
        },
        other => panic!("expected init error, got {:?}", other),
    }
}

#[test]
fn failing_configuration_write_is_fatal() {
    init_logging();
    let mut bus = MockBus::new().with_register(Register::Version, 0x92);
    bus.fail_on = Some(Register::TxAsk);
    let err = Pcd::new(Box::new(bus))
        .with_timing(fast_timing())
        .initialize()
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Init);
    assert!(err.is_fatal());
    assert!(err.to_string().contains("TxAsk"));
}

#[test]
fn mock_chip_never_leaving_reset() {
    init_logging();
    // PowerDown stays set in CommandReg
    let mut bus = MockBus::new();
    for _ in 0..3 {
        bus.push_read(Register::Command, 0x10);
    }
    let err = Pcd::new(Box::new(bus))
        .with_timing(fast_timing())
        .initialize()
        .err()
        .unwrap();
    assert!(matches!(err, Error::ResetTimeout));
}
