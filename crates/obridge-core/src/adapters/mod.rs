//! # Adapters
//!
//! In-memory implementations of the outbound ports, used by tests and by
//! the node simulation.

pub mod clock;
pub mod event_bus;
pub mod ledger;

pub use clock::{ManualClock, SystemClock};
pub use event_bus::BroadcastEventBus;
pub use ledger::InMemoryLedger;
