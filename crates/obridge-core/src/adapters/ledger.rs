//! In-memory ledger implementing the `AssetAdapter` port.
//!
//! Tracks native balances, token balances and allowances granted to one
//! custodian. Every operation computes all balance changes before writing
//! any of them, so a failed escrow or release leaves the ledger untouched.

use crate::domain::{Address, Asset, AssetError};
use crate::ports::outbound::{AssetAdapter, EscrowReceipt};
use parking_lot::RwLock;
use primitive_types::U256;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct LedgerState {
    native: HashMap<Address, U256>,
    /// (token, holder) -> balance.
    tokens: HashMap<(Address, Address), U256>,
    /// (token, owner) -> amount the custodian may pull.
    allowances: HashMap<(Address, Address), U256>,
}

impl LedgerState {
    fn native_of(&self, holder: &Address) -> U256 {
        self.native.get(holder).copied().unwrap_or_default()
    }

    fn token_of(&self, token: &Address, holder: &Address) -> U256 {
        self.tokens.get(&(*token, *holder)).copied().unwrap_or_default()
    }

    fn allowance_of(&self, token: &Address, owner: &Address) -> U256 {
        self.allowances
            .get(&(*token, *owner))
            .copied()
            .unwrap_or_default()
    }

    fn balance_of(&self, asset: &Asset, holder: &Address) -> U256 {
        match asset {
            Asset::Native => self.native_of(holder),
            Asset::Token(token) => self.token_of(token, holder),
        }
    }
}

fn overflow() -> AssetError {
    AssetError::TransferFailed("balance overflow".to_string())
}

/// In-memory ledger for one chain.
pub struct InMemoryLedger {
    custodian: Address,
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Create an empty ledger whose escrow is held by `custodian`.
    pub fn new(custodian: Address) -> Self {
        Self {
            custodian,
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Credit native coin out of thin air.
    pub fn mint_native(&self, to: Address, amount: U256) {
        let mut state = self.state.write();
        let balance = state.native.entry(to).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Credit tokens out of thin air.
    pub fn mint(&self, token: Address, to: Address, amount: U256) {
        let mut state = self.state.write();
        let balance = state.tokens.entry((token, to)).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Set the allowance `owner` grants the custodian for `token`.
    pub fn approve(&self, token: Address, owner: Address, amount: U256) {
        self.state.write().allowances.insert((token, owner), amount);
    }

    /// Remaining allowance `owner` granted the custodian for `token`.
    pub fn allowance(&self, token: Address, owner: Address) -> U256 {
        self.state.read().allowance_of(&token, &owner)
    }

    /// Balance of `holder` in `asset`.
    pub fn balance_of(&self, asset: &Asset, holder: Address) -> U256 {
        self.state.read().balance_of(asset, &holder)
    }

    /// Native balance of `holder`.
    pub fn native_balance_of(&self, holder: Address) -> U256 {
        self.state.read().native_of(&holder)
    }

    /// Amount of `asset` currently held in custody.
    pub fn custody_balance(&self, asset: &Asset) -> U256 {
        self.state.read().balance_of(asset, &self.custodian)
    }
}

impl AssetAdapter for InMemoryLedger {
    fn custodian(&self) -> Address {
        self.custodian
    }

    fn escrow(
        &self,
        asset: &Asset,
        from: Address,
        amount: U256,
        attached_native: U256,
    ) -> Result<EscrowReceipt, AssetError> {
        if from == self.custodian {
            return Err(AssetError::TransferFailed(
                "custodian cannot fund escrow".to_string(),
            ));
        }
        let mut state = self.state.write();

        let native_moved = match asset {
            Asset::Native => amount,
            Asset::Token(_) => attached_native,
        };
        let native_available = state.native_of(&from);
        if native_available < native_moved {
            return Err(AssetError::InsufficientFunds {
                asset: Asset::Native,
                required: native_moved,
                available: native_available,
            });
        }
        let custody_native = state
            .native_of(&self.custodian)
            .checked_add(native_moved)
            .ok_or_else(overflow)?;

        let token_update = match asset {
            Asset::Native => None,
            Asset::Token(token) => {
                let approved = state.allowance_of(token, &from);
                if approved < amount {
                    return Err(AssetError::InsufficientAllowance {
                        token: *token,
                        required: amount,
                        approved,
                    });
                }
                let available = state.token_of(token, &from);
                if available < amount {
                    return Err(AssetError::InsufficientFunds {
                        asset: *asset,
                        required: amount,
                        available,
                    });
                }
                let custody = state
                    .token_of(token, &self.custodian)
                    .checked_add(amount)
                    .ok_or_else(overflow)?;
                Some((*token, approved - amount, available - amount, custody))
            }
        };

        state.native.insert(from, native_available - native_moved);
        state.native.insert(self.custodian, custody_native);
        if let Some((token, allowance, balance, custody)) = token_update {
            state.allowances.insert((token, from), allowance);
            state.tokens.insert((token, from), balance);
            state.tokens.insert((token, self.custodian), custody);
        }

        debug!(asset = %asset, from = ?from, amount = %amount, native = %native_moved, "Escrowed funds");

        Ok(EscrowReceipt {
            asset: *asset,
            from,
            amount,
            native_amount: if asset.is_native() { U256::zero() } else { attached_native },
        })
    }

    fn release(
        &self,
        asset: &Asset,
        to: Address,
        amount: U256,
        native_amount: U256,
    ) -> Result<(), AssetError> {
        if to == self.custodian {
            return Err(AssetError::TransferFailed(
                "cannot release to custodian".to_string(),
            ));
        }
        let mut state = self.state.write();

        let native_moved = match asset {
            Asset::Native => amount.checked_add(native_amount).ok_or_else(overflow)?,
            Asset::Token(_) => native_amount,
        };
        let custody_native = state.native_of(&self.custodian);
        if custody_native < native_moved {
            return Err(AssetError::TransferFailed(format!(
                "custody holds {custody_native} native, release needs {native_moved}"
            )));
        }
        let receiver_native = state
            .native_of(&to)
            .checked_add(native_moved)
            .ok_or_else(overflow)?;

        let token_update = match asset {
            Asset::Native => None,
            Asset::Token(token) => {
                let custody = state.token_of(token, &self.custodian);
                if custody < amount {
                    return Err(AssetError::TransferFailed(format!(
                        "custody holds {custody} of token {token:#x}, release needs {amount}"
                    )));
                }
                let receiver = state
                    .token_of(token, &to)
                    .checked_add(amount)
                    .ok_or_else(overflow)?;
                Some((*token, custody - amount, receiver))
            }
        };

        state.native.insert(self.custodian, custody_native - native_moved);
        state.native.insert(to, receiver_native);
        if let Some((token, custody, receiver)) = token_update {
            state.tokens.insert((token, self.custodian), custody);
            state.tokens.insert((token, to), receiver);
        }

        debug!(asset = %asset, to = ?to, amount = %amount, native = %native_moved, "Released funds");
        Ok(())
    }
}
