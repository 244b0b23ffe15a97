// rc522/src/transport/mod.rs

pub mod mock;
pub mod sim;
#[cfg(feature = "hal")]
pub mod spi;
pub mod traits;

pub use mock::{BusOp, MockBus};
pub use sim::{CardState, SimCard, SimFrame, SimulatedReader};
#[cfg(feature = "hal")]
pub use spi::{ChipSelect, SpiTransport};
pub use traits::RegisterBus;
