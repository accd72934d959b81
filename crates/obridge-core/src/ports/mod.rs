//! # Ports
//!
//! Inbound: what a chain instance offers to callers.
//! Outbound: what it needs from its host ledger.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
