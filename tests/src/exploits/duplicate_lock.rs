//! # Duplicate Locks
//!
//! Locking the same parameters twice, before or after settlement. Ids map
//! to at most one record, and records are never deleted, so an id can never
//! be reused.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use obridge_core::{BidId, ObridgeApi, ObridgeError, TransferState};
    use primitive_types::U256;

    fn double_fund(swap: &SwapFixture) {
        swap.source.ledger.mint(TOKEN_A, USER, one_e18());
        swap.source
            .ledger
            .approve(TOKEN_A, USER, one_e18() * U256::from(2u64));
    }

    #[test]
    fn test_duplicate_lock_rejected_without_escrow() {
        let mut swap = SwapFixture::token_to_token();
        double_fund(&swap);
        let first = swap.lock_outbound();
        swap.source.drain_events();

        let err = swap
            .source
            .service
            .lock_outbound(swap.outbound_terms(), swap.outbound_route(), U256::zero())
            .unwrap_err();
        assert!(matches!(err, ObridgeError::DuplicateTransfer(id) if id == first.id));

        assert_eq!(swap.source.ledger.custody_balance(&swap.src_asset), one_e18());
        assert_eq!(swap.source_balance(swap.src_asset, USER), one_e18());
        assert_eq!(swap.source.service.transfer_count(), 1);
        assert!(swap.source.drain_events().is_empty());
    }

    #[test]
    fn test_relock_after_settlement_rejected() {
        let swap = SwapFixture::token_to_token();
        double_fund(&swap);
        let first = swap.lock_outbound();
        swap.source
            .service
            .confirm(&first.params, swap.preimage())
            .unwrap();

        let err = swap
            .source
            .service
            .lock_outbound(swap.outbound_terms(), swap.outbound_route(), U256::zero())
            .unwrap_err();
        assert!(matches!(err, ObridgeError::DuplicateTransfer(_)));
        assert_eq!(
            swap.source.service.get_transfer(&first.id).unwrap().state,
            TransferState::Redeemed
        );
    }

    /// Any differing field gives a fresh id.
    #[test]
    fn test_distinct_quote_locks_separately() {
        let swap = SwapFixture::token_to_token();
        double_fund(&swap);
        let first = swap.lock_outbound();

        let mut route = swap.outbound_route();
        route.bid_id = BidId(route.bid_id.0 + 1);
        let second = swap
            .source
            .service
            .lock_outbound(swap.outbound_terms(), route, U256::zero())
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(swap.source.service.transfer_count(), 2);
        assert_eq!(
            swap.source.ledger.custody_balance(&swap.src_asset),
            one_e18() * U256::from(2u64)
        );
    }
}
