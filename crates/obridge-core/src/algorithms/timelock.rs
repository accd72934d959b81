//! # Timelock Planning
//!
//! Expiries for the two legs of a swap. The inbound leg expires first so the
//! liquidity provider always has at least the margin left on the outbound
//! leg after the secret goes public.

use crate::config::ObridgeConfig;
use crate::domain::invariant_timelock_ordering;

/// Expiries for both legs of one swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapTimelocks {
    /// Expiry of the user's source-chain leg.
    pub outbound: u64,
    /// Expiry of the liquidity provider's destination-chain leg.
    pub inbound: u64,
}

/// Expiries for a swap starting at `now`.
pub fn recommended_timelocks(now: u64, config: &ObridgeConfig) -> SwapTimelocks {
    let inbound = now.saturating_add(config.default_lock_duration_secs);
    // One second past the margin: the ordering rule is strict.
    let outbound = inbound
        .saturating_add(config.min_timelock_margin_secs)
        .saturating_add(1);
    SwapTimelocks { outbound, inbound }
}

impl SwapTimelocks {
    /// Whether these expiries satisfy the ordering rule for `margin_secs`.
    pub fn is_safe(&self, margin_secs: u64) -> bool {
        invariant_timelock_ordering(self.outbound, self.inbound, margin_secs).is_ok()
    }
}
