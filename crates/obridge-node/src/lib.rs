//! # OBridge Node Library
//!
//! Hosts two independent OBridge instances and drives swaps between them.
//! The main entry point is the `main.rs` binary; the modules are exposed for
//! integration tests.
//!
//! - `config` - chain pair and scenario selection
//! - `chain` - one simulated chain (ledger, clock, bus, service)
//! - `simulation` - user and liquidity-provider choreography

#![warn(missing_docs)]

pub mod chain;
pub mod config;
pub mod simulation;

pub use chain::{ChainInstance, ChainService};
pub use config::{NodeConfig, NodeError, Scenario};
pub use simulation::{run_swap, SwapReport, SwapSimulation, BLOCK_TIME_SECS};
