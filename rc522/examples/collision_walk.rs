// Step through anticollision with several cards in the field and print
// the bit prefix after each round.

use std::cell::RefCell;
use std::rc::Rc;

use rc522::picc::Detection;
use rc522::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sim = Rc::new(RefCell::new(SimulatedReader::new()));
    for uid in [
        [0x01, 0xAA, 0xBB, 0xCC],
        [0x03, 0xAA, 0xBB, 0xCC],
        [0x07, 0xAA, 0xBB, 0xCC],
        [0x07, 0xAA, 0xBB, 0xCD],
    ] {
        sim.borrow_mut().insert_card(SimCard::new(&uid)?);
    }

    let mut pcd = PcdBuilder::new().with_bus(Box::new(sim.clone())).build()?;

    for tie_break in [TieBreak::PreferOne, TieBreak::PreferZero] {
        println!("== {:?}", tie_break);
        let cfg = ProtocolConfig {
            tie_break,
            ..ProtocolConfig::default()
        };
        loop {
            let mut session = pcd.identification(&cfg)?;
            if session.detect()? == Detection::NoCard {
                break;
            }
            let id = session.resolve_identifier()?;
            let v = session.select(&id)?;
            println!("  {} after {} rounds", v.uid, id.rounds());
            session.halt()?;
        }
        // wake everything for the next policy
        pcd.antenna_off()?;
        pcd.antenna_on()?;
        sim.borrow_mut().clear_frames();
    }
    Ok(())
}
