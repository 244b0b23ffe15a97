// rc522/src/protocol/mod.rs

//! Pure ISO/IEC 14443-3 Type A pieces: checksums, command encoders,
//! answer decoders and the anticollision bit bookkeeping. Nothing here
//! touches the bus.

pub mod anticollision;
pub mod cascade;
pub mod checksum;
pub mod commands;
pub mod responses;

pub use anticollision::{Collision, CollisionState, Progress, TieBreak};
pub use cascade::CascadeLevel;
pub use checksum::{bcc, crc_a, verify_crc_a};
pub use commands::PiccCommand;
pub use responses::{decode_atqa, decode_sak};
