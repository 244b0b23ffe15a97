// rc522/src/lib.rs

//! rc522
//!
//! Pure Rust driver for the NXP MFRC522 reader chip: ISO/IEC 14443-3
//! Type A card identification over SPI, with a register-level simulator
//! for host-side testing.
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod error;
pub mod pcd;
pub mod picc;
pub mod poller;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
