//! # Lock Registry
//!
//! Owned map from transfer id to record. One registry per chain instance;
//! records are never removed, so a reused id is always rejected.

use super::entities::LockedTransfer;
use super::errors::{ObridgeError, TransferId};
use super::value_objects::{Asset, TransferState};
use primitive_types::U256;
use std::collections::HashMap;

/// Single source of truth for transfer existence and state.
#[derive(Debug, Default)]
pub struct LockRegistry {
    transfers: HashMap<TransferId, LockedTransfer>,
}

impl LockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record. Never overwrites.
    pub fn insert(&mut self, transfer: LockedTransfer) -> Result<(), ObridgeError> {
        if self.transfers.contains_key(&transfer.id) {
            return Err(ObridgeError::DuplicateTransfer(transfer.id));
        }
        self.transfers.insert(transfer.id, transfer);
        Ok(())
    }

    /// Replace an existing record with its updated version.
    pub fn commit(&mut self, transfer: LockedTransfer) -> Result<(), ObridgeError> {
        match self.transfers.get_mut(&transfer.id) {
            Some(slot) => {
                *slot = transfer;
                Ok(())
            }
            None => Err(ObridgeError::NotFound(transfer.id)),
        }
    }

    /// Look up a record.
    pub fn get(&self, id: &TransferId) -> Option<&LockedTransfer> {
        self.transfers.get(id)
    }

    /// Whether a record exists for `id`.
    pub fn contains(&self, id: &TransferId) -> bool {
        self.transfers.contains_key(id)
    }

    /// Number of records ever created.
    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// Whether no record was ever created.
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Number of records currently in `state`.
    pub fn count_by_state(&self, state: TransferState) -> usize {
        self.transfers.values().filter(|t| t.state == state).count()
    }

    /// Funds the registry should hold in custody, per asset.
    ///
    /// Sums `amount` over `Locked` records, adding the native coin attached
    /// to token legs under `Asset::Native`.
    pub fn escrowed_totals(&self) -> HashMap<Asset, U256> {
        let mut totals: HashMap<Asset, U256> = HashMap::new();
        for transfer in self.transfers.values() {
            if transfer.state != TransferState::Locked {
                continue;
            }
            let terms = transfer.terms();
            let escrowed = totals.entry(terms.asset).or_default();
            *escrowed = escrowed.saturating_add(terms.amount);
            if !terms.native_amount.is_zero() {
                let native = totals.entry(Asset::Native).or_default();
                *native = native.saturating_add(terms.native_amount);
            }
        }
        totals
    }
}
