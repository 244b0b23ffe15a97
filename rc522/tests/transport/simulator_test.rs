use rc522::pcd::{PcdCommand, Register};
use rc522::protocol::crc_a;
use rc522::transport::{CardState, SimCard, SimulatedReader};
use rc522::RegisterBus;

fn field_on(sim: &mut SimulatedReader) {
    sim.write_register(Register::TxControl, 0x83).unwrap();
}

fn send(sim: &mut SimulatedReader, frame: &[u8], last_bits: u8) -> Vec<u8> {
    sim.write_register(Register::Command, PcdCommand::Idle as u8).unwrap();
    sim.write_register(Register::ComIrq, 0x7F).unwrap();
    sim.write_register(Register::FifoLevel, 0x80).unwrap();
    sim.write_fifo(frame).unwrap();
    sim.write_register(Register::Command, PcdCommand::Transceive as u8)
        .unwrap();
    sim.write_register(Register::BitFraming, 0x80 | last_bits).unwrap();
    let n = sim.read_register(Register::FifoLevel).unwrap() as usize;
    sim.read_fifo(n).unwrap()
}

#[test]
fn crc_coprocessor() {
    let mut sim = SimulatedReader::new();
    sim.write_fifo(&[0x12, 0x34]).unwrap();
    sim.write_register(Register::Command, PcdCommand::CalcCrc as u8)
        .unwrap();
    assert_ne!(sim.read_register(Register::DivIrq).unwrap() & 0x04, 0);
    let crc = [
        sim.read_register(Register::CrcResultLsb).unwrap(),
        sim.read_register(Register::CrcResultMsb).unwrap(),
    ];
    assert_eq!(crc, crc_a(&[0x12, 0x34]));
}

#[test]
fn wupa_wakes_halted_card() {
    let mut sim = SimulatedReader::new().with_card(SimCard::new(&[1, 2, 3, 4]).unwrap());
    field_on(&mut sim);
    send(&mut sim, &[0x26], 7);
    let mut select = vec![0x93, 0x70, 1, 2, 3, 4, 1 ^ 2 ^ 3 ^ 4];
    select.extend_from_slice(&crc_a(&select));
    assert_eq!(send(&mut sim, &select, 0)[0], 0x08);

    send(&mut sim, &[0x50, 0x00, 0x57, 0xCD], 0);
    assert_eq!(sim.cards()[0].state(), CardState::Halt);
    assert!(send(&mut sim, &[0x26], 7).is_empty());
    assert_eq!(send(&mut sim, &[0x52], 7), vec![0x04, 0x00]);
}

#[test]
fn soft_reset_returns_cards_to_idle() {
    let mut sim = SimulatedReader::new().with_card(SimCard::new(&[1, 2, 3, 4]).unwrap());
    field_on(&mut sim);
    send(&mut sim, &[0x26], 7);
    assert!(matches!(sim.cards()[0].state(), CardState::Ready(_)));
    sim.write_register(Register::Command, PcdCommand::SoftReset as u8)
        .unwrap();
    assert_eq!(sim.cards()[0].state(), CardState::Idle);
    assert!(!sim.antenna_on());
}

#[test]
fn removed_card_stops_answering() {
    let mut sim = SimulatedReader::new().with_card(SimCard::new(&[1, 2, 3, 4]).unwrap());
    field_on(&mut sim);
    assert!(sim.remove_card(&[1, 2, 3, 4]));
    assert!(!sim.remove_card(&[1, 2, 3, 4]));
    assert!(send(&mut sim, &[0x26], 7).is_empty());
    assert_eq!(sim.frames().len(), 1);
}
