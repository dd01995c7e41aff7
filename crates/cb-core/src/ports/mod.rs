//! Port interfaces for the application layer.
//!
//! Ports define the contract between the use cases and infrastructure
//! implementations, keeping the domain independent of any concrete
//! backend SDK or database driver.

mod board_store;
mod clock;

pub use board_store::{BoardStorePort, PostChanges};
pub use clock::ClockPort;
