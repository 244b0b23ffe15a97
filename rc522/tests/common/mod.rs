// Shared helpers for the integration test crates under `tests/`.
#![allow(dead_code)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use rc522::test_support;
use rc522::{Pcd, ProtocolConfig, SimCard, SimulatedReader};
use rc522::pcd::Initialized;

pub type SharedSim = Rc<RefCell<SimulatedReader>>;

/// Route the crate's `log` output through the test harness. Safe to call
/// from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn reader_with(cards: &[&[u8]]) -> (Pcd<Initialized>, SharedSim) {
    init_logging();
    test_support::sim_pcd(cards)
}

pub fn reader_with_sim_cards(cards: Vec<SimCard>) -> (Pcd<Initialized>, SharedSim) {
    let (pcd, sim) = reader_with(&[]);
    for card in cards {
        sim.borrow_mut().insert_card(card);
    }
    (pcd, sim)
}

pub fn protocol(max_rounds: usize) -> ProtocolConfig {
    ProtocolConfig {
        max_rounds,
        ..ProtocolConfig::default()
    }
}
