// rc522/src/picc/mod.rs

//! Card-side (PICC) view: the identification session and what it yields.

mod info;
pub mod session;

pub use info::{CardType, Verified};
pub use session::{CardIdentification, CardIdentifier, CardPresent, Detection, SessionState};
