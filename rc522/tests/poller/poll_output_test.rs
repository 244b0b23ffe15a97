use std::io;
use std::thread;
use std::time::Duration;

use rc522::poller::{PollOutcome, PollStats, Poller};
use rc522::test_support::{fast_config, sim_with_cards};
use rc522::{CancellationToken, Error, ErrorKind, Pcd, ReaderConfig};

use crate::common::fixtures::uid4;
use crate::common::init_logging;

/// Writer that fails every write, standing in for a closed stdout.
struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn report_format() {
    init_logging();
    let sim = sim_with_cards(&[&uid4()]);
    let mut poller = Poller::start(Pcd::new(Box::new(sim)), &fast_config()).unwrap();
    let mut out = Vec::new();
    match poller.poll_once(&mut out).unwrap() {
        PollOutcome::Reported(v) => assert_eq!(v.uid.to_hex(), "041A2B3C"),
        other => panic!("expected a report, got {:?}", other),
    }
    assert_eq!(out, b"UID: 041A2B3C\nType: MIFARE Classic\n");
}

#[test]
fn custom_label_and_halt() {
    init_logging();
    let sim = sim_with_cards(&[&uid4()]);
    let mut config = fast_config();
    config.poll.card_label = "Transit pass".to_string();
    config.poll.halt_after_report = true;

    let mut poller = Poller::start(Pcd::new(Box::new(sim.clone())), &config).unwrap();
    let mut out = Vec::new();
    poller.poll_once(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "UID: 041A2B3C\nType: Transit pass\n");
    assert_eq!(
        sim.borrow().cards()[0].state(),
        rc522::transport::CardState::Halt
    );
}

#[test]
fn output_failure_is_fatal() {
    init_logging();
    let sim = sim_with_cards(&[&uid4()]);
    let mut poller = Poller::start(Pcd::new(Box::new(sim)), &fast_config()).unwrap();
    let err = poller.poll_once(&mut BrokenPipe).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.is_fatal());
}

#[test]
fn transient_timeout_is_skipped() {
    init_logging();
    let sim = sim_with_cards(&[&uid4()]);
    let mut poller = Poller::start(Pcd::new(Box::new(sim.clone())), &fast_config()).unwrap();
    sim.borrow_mut().set_unresponsive(true);
    assert_eq!(
        poller.poll_once(&mut Vec::new()).unwrap(),
        PollOutcome::Skipped(ErrorKind::Bus)
    );
    sim.borrow_mut().set_unresponsive(false);
    assert!(matches!(
        poller.poll_once(&mut Vec::new()).unwrap(),
        PollOutcome::Reported(_)
    ));
}

#[test]
fn start_fails_without_chip() {
    init_logging();
    let sim = sim_with_cards(&[]);
    sim.borrow_mut().set_version(0xFF);
    let err = Poller::start(Pcd::new(Box::new(sim)), &fast_config())
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Init);
}

#[test]
fn invalid_config_rejected_before_touching_the_bus() {
    init_logging();
    let sim = sim_with_cards(&[]);
    let mut config = ReaderConfig::default();
    config.protocol.max_rounds = 0;
    let err = Poller::start(Pcd::new(Box::new(sim.clone())), &config)
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Usage);
    assert!(sim.borrow().frames().is_empty());
    assert!(!sim.borrow().antenna_on());
}

#[test]
fn run_until_cancelled() {
    init_logging();
    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        stopper.cancel();
    });

    let sim = sim_with_cards(&[&uid4()]);
    let mut config = fast_config();
    config.poll.interval_ms = 5;
    config.poll.cooldown_ms = 5;
    let mut poller = Poller::start(Pcd::new(Box::new(sim)), &config).unwrap();
    let mut out = Vec::new();
    let stats: PollStats = poller.run(&mut out, &cancel).unwrap();
    handle.join().unwrap();

    assert!(stats.cycles >= 2);
    assert!(stats.reported >= 1);
    assert!(String::from_utf8(out).unwrap().starts_with("UID: 041A2B3C\n"));
}
