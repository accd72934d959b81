//! # Domain Layer
//!
//! Entities, value objects, invariants and the lock registry for the
//! locked-transfer state machine.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod registry;
pub mod secure_secret;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use registry::*;
pub use secure_secret::*;
pub use value_objects::*;
