// rc522/src/prelude.rs

pub use crate::config::{BusConfig, PinMap, PollConfig, ProtocolConfig, ReaderConfig, TimingConfig};
pub use crate::pcd::{Initialized, Pcd, PcdBuilder, Uninitialized};
pub use crate::picc::{CardIdentification, CardIdentifier, CardType, Detection, Verified};
pub use crate::poller::{PollOutcome, PollStats, Poller};
pub use crate::protocol::TieBreak;
pub use crate::transport::{RegisterBus, SimCard, SimulatedReader};
pub use crate::{Atqa, Error, ErrorKind, Result, Sak, Uid, UidSize};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex_spaced, bytes_to_hex_upper, ms, parse_hex, CancellationToken};
