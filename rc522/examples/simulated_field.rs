// Polling loop against the register-level simulator.
//
// Cards enter and leave the field from a scripted timeline while the
// poller prints every verified UID. Run with RUST_LOG=debug to follow the
// handshake.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use anyhow::Context;
use rc522::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sim = Rc::new(RefCell::new(SimulatedReader::new()));
    let mut config = ReaderConfig::default();
    config.poll.interval_ms = 50;
    config.poll.cooldown_ms = 200;
    config.poll.halt_after_report = true;

    let mut poller = Poller::start(Pcd::new(Box::new(sim.clone())), &config)
        .context("reader initialization failed")?;

    let timeline: [(&str, &[u8]); 3] = [
        ("MIFARE Classic 1K", &[0x04, 0x1A, 0x2B, 0x3C]),
        ("Ultralight", &[0x04, 0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0xF6]),
        ("triple-size", &[0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x9A]),
    ];

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (name, uid) in timeline {
        println!("-- {} enters the field", name);
        sim.borrow_mut().insert_card(SimCard::new(uid)?);
        for _ in 0..3 {
            match poller.poll_once(&mut out)? {
                PollOutcome::NoCard => println!("   (no card)"),
                PollOutcome::Reported(v) => println!("   -> {}", v.card_type),
                PollOutcome::Skipped(kind) => println!("   (cycle skipped: {:?})", kind),
            }
        }
        sim.borrow_mut().remove_card(uid);
    }
    Ok(())
}
