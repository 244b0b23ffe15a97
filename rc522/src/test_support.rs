//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize simulator setup so tests across the crate and
//! the tests/ directory build readers the same way.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{PollConfig, ReaderConfig, TimingConfig};
use crate::pcd::{Initialized, Pcd};
use crate::transport::{SimCard, SimulatedReader};

/// Timing without reset settle delays. The simulator answers immediately,
/// so only the safety timeout matters.
#[doc(hidden)]
pub fn fast_timing() -> TimingConfig {
    TimingConfig {
        response_timeout_ms: 25,
        safety_timeout_ms: 30,
        reset_polls: 3,
        reset_settle_ms: 0,
    }
}

/// Default configuration with [`fast_timing`] and no poll delays.
#[doc(hidden)]
pub fn fast_config() -> ReaderConfig {
    ReaderConfig {
        timing: fast_timing(),
        poll: PollConfig {
            interval_ms: 0,
            cooldown_ms: 0,
            ..PollConfig::default()
        },
        ..ReaderConfig::default()
    }
}

/// Shared simulator with one default card per UID.
///
/// Panics on an invalid UID length; test-only.
#[doc(hidden)]
pub fn sim_with_cards(cards: &[&[u8]]) -> Rc<RefCell<SimulatedReader>> {
    let mut sim = SimulatedReader::new();
    for uid in cards {
        match SimCard::new(uid) {
            Ok(card) => sim.insert_card(card),
            Err(e) => panic!("invalid test UID {:02x?}: {}", uid, e),
        }
    }
    Rc::new(RefCell::new(sim))
}

/// Initialized reader over a shared simulator. The returned handle lets the
/// test move cards and inject faults while the reader owns the bus.
#[doc(hidden)]
pub fn sim_pcd(cards: &[&[u8]]) -> (Pcd<Initialized>, Rc<RefCell<SimulatedReader>>) {
    let sim = sim_with_cards(cards);
    let pcd = match Pcd::new(Box::new(sim.clone()))
        .with_timing(fast_timing())
        .initialize()
    {
        Ok(pcd) => pcd,
        Err(e) => panic!("simulated reader failed to initialize: {}", e),
    };
    (pcd, sim)
}
