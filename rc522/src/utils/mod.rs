//! Small helpers shared across the crate: hex formatting, timeouts and the
//! polling loop's cancellation token.

pub mod cancel;
pub mod hex;
pub mod timeout;

pub use cancel::CancellationToken;
pub use hex::*;
pub use timeout::*;
