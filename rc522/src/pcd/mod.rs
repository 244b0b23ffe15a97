// rc522/src/pcd/mod.rs

//! The reader chip (proximity coupling device): register map, framing,
//! configuration sequence and the type-state handle.

pub mod builder;
pub mod config;
pub mod frame;
pub mod handle;
pub mod register;

pub use builder::PcdBuilder;
pub use frame::{Framing, RxFrame};
pub use handle::{Initialized, Pcd, Uninitialized};
pub use register::{PcdCommand, Register};
