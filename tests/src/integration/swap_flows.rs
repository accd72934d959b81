//! # Swap Flows
//!
//! Both legs of a swap, each on its own chain instance, settled the way the
//! parties would settle them:
//!
//! 1. User locks the source leg (`transfer_out`)
//! 2. LP reads the announcement and locks the destination leg (`transfer_in`)
//! 3. User reveals the secret on one leg
//! 4. The other party reads the secret from `transfer_confirmed` and redeems
//!    the remaining leg
//!
//! Or, if nobody reveals, both legs expire and refund.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use obridge_core::{
        verify_counter_leg, Asset, Clock, ObridgeApi, ObridgeEvent, TransferState, TransferTerms,
    };
    use primitive_types::U256;

    // =============================================================================
    // TEST HELPERS
    // =============================================================================

    fn revealed_on(chain: &mut obridge_node::ChainInstance, id: &[u8; 32]) -> [u8; 32] {
        chain
            .drain_events()
            .into_iter()
            .find_map(|event| match event {
                ObridgeEvent::TransferConfirmed(data) if &data.transfer_id == id => {
                    Some(data.preimage)
                }
                _ => None,
            })
            .expect("transfer_confirmed published")
    }

    fn assert_custody_matches(chain: &obridge_node::ChainInstance, assets: &[Asset]) {
        let totals = chain.service.escrowed_totals();
        for asset in assets {
            let expected = totals.get(asset).copied().unwrap_or_default();
            assert_eq!(
                chain.ledger.custody_balance(asset),
                expected,
                "custody of {} on {} out of sync with Locked records",
                asset,
                chain.label
            );
        }
    }

    // =============================================================================
    // COMPLETED SWAPS
    // =============================================================================

    /// User reveals on the source leg; LP picks the secret up and redeems the
    /// destination leg.
    #[test]
    fn test_token_to_token_swap_reveal_on_source() {
        let mut swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        let inbound = swap.lock_inbound(&outbound);

        assert_eq!(swap.source_balance(swap.src_asset, USER), U256::zero());
        assert_eq!(swap.destination_balance(swap.dst_asset, LP), U256::zero());
        assert_eq!(swap.source.ledger.custody_balance(&swap.src_asset), one_e18());
        assert_eq!(swap.destination.ledger.custody_balance(&swap.dst_asset), one_e15());

        // User confirms the token-A leg: LP receives token A.
        let redeemed = swap
            .source
            .service
            .confirm(&outbound.params, swap.preimage())
            .unwrap();
        assert_eq!(redeemed.state, TransferState::Redeemed);
        assert_eq!(swap.source_balance(swap.src_asset, LP), one_e18());

        // Anyone holding the public preimage confirms the token-B leg.
        let preimage = revealed_on(&mut swap.source, &outbound.id);
        swap.destination
            .service
            .confirm(&inbound.params, preimage)
            .unwrap();
        assert_eq!(swap.destination_balance(swap.dst_asset, USER), one_e15());

        assert_custody_matches(&swap.source, &[swap.src_asset]);
        assert_custody_matches(&swap.destination, &[swap.dst_asset]);
        assert_eq!(swap.source.ledger.custody_balance(&swap.src_asset), U256::zero());
        assert_eq!(swap.destination.ledger.custody_balance(&swap.dst_asset), U256::zero());
    }

    /// User verifies the counter leg, reveals on the destination leg; LP
    /// redeems the source leg afterwards.
    #[test]
    fn test_token_to_token_swap_reveal_on_destination() {
        let mut swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        let inbound = swap.lock_inbound(&outbound);

        verify_counter_leg(
            &outbound,
            SOURCE_CHAIN,
            &inbound.params,
            swap.source.service.config().min_timelock_margin_secs,
        )
        .unwrap();

        swap.destination
            .service
            .confirm(&inbound.params, swap.preimage())
            .unwrap();
        let preimage = revealed_on(&mut swap.destination, &inbound.id);
        swap.source.service.confirm(&outbound.params, preimage).unwrap();

        assert_eq!(swap.destination_balance(swap.dst_asset, USER), one_e15());
        assert_eq!(swap.source_balance(swap.src_asset, LP), one_e18());
        assert_eq!(
            swap.source.service.get_transfer(&outbound.id).unwrap().preimage,
            Some(swap.preimage())
        );
    }

    #[test]
    fn test_native_to_token_swap() {
        let mut swap = SwapFixture::new(Asset::Native, one_e18(), Asset::Token(TOKEN_B), one_e15());
        let outbound = swap.lock_outbound();
        assert_eq!(swap.source.ledger.native_balance_of(USER), U256::zero());
        assert_eq!(swap.source.ledger.custody_balance(&Asset::Native), one_e18());

        let inbound = swap.lock_inbound(&outbound);
        swap.source
            .service
            .confirm(&outbound.params, swap.preimage())
            .unwrap();
        swap.destination
            .service
            .confirm(&inbound.params, swap.preimage())
            .unwrap();

        assert_eq!(swap.source.ledger.native_balance_of(LP), one_e18());
        assert_eq!(swap.destination_balance(Asset::Token(TOKEN_B), USER), one_e15());
    }

    #[test]
    fn test_token_to_native_swap() {
        let mut swap = SwapFixture::new(Asset::Token(TOKEN_A), one_e18(), Asset::Native, one_e15());
        let outbound = swap.lock_outbound();
        let inbound = swap.lock_inbound(&outbound);
        assert_eq!(inbound.terms().asset, Asset::Native);
        assert_eq!(swap.destination.ledger.native_balance_of(LP), U256::zero());

        swap.destination
            .service
            .confirm(&inbound.params, swap.preimage())
            .unwrap();
        swap.source
            .service
            .confirm(&outbound.params, swap.preimage())
            .unwrap();

        assert_eq!(swap.destination.ledger.native_balance_of(USER), one_e15());
        assert_eq!(swap.source_balance(Asset::Token(TOKEN_A), LP), one_e18());
    }

    /// A token leg carrying native coin releases both to the receiver.
    #[test]
    fn test_token_leg_with_native_attachment() {
        let swap = SwapFixture::token_to_token();
        let native = U256::from(5_000u64);
        swap.source.ledger.mint_native(USER, native);

        let terms = swap.outbound_terms().with_native_amount(native);
        let locked = swap
            .source
            .service
            .lock_outbound(terms, swap.outbound_route(), native)
            .unwrap();
        assert_eq!(swap.source.ledger.custody_balance(&Asset::Native), native);
        assert_custody_matches(&swap.source, &[Asset::Native, swap.src_asset]);

        swap.source
            .service
            .confirm(&locked.params, swap.preimage())
            .unwrap();
        assert_eq!(swap.source.ledger.native_balance_of(LP), native);
        assert_eq!(swap.source_balance(swap.src_asset, LP), one_e18());
        assert_custody_matches(&swap.source, &[Asset::Native, swap.src_asset]);
    }

    // =============================================================================
    // EXPIRED SWAPS
    // =============================================================================

    /// Nobody reveals: the LP refunds after the inbound timelock, the user
    /// after the (later) outbound timelock.
    #[test]
    fn test_expired_swap_refunds_both_legs() {
        let mut swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        let inbound = swap.lock_inbound(&outbound);

        swap.destination.clock.set_time(swap.timelocks.inbound);
        swap.destination.service.refund(&inbound.params).unwrap();
        assert_eq!(swap.destination_balance(swap.dst_asset, LP), one_e15());

        // Source leg is still inside its window.
        assert!(swap.source.service.refund(&outbound.params).is_err());

        swap.source.clock.set_time(swap.timelocks.outbound);
        let refunded = swap.source.service.refund(&outbound.params).unwrap();
        assert_eq!(refunded.state, TransferState::Refunded);
        assert_eq!(refunded.settled_at, Some(swap.timelocks.outbound));
        assert_eq!(swap.source_balance(swap.src_asset, USER), one_e18());
        assert_eq!(swap.source_balance(swap.src_asset, LP), U256::zero());
    }

    /// A native-coin source leg returns the full amount to the user.
    #[test]
    fn test_expired_native_leg_refunds_sender() {
        let swap = SwapFixture::new(Asset::Native, one_e18(), Asset::Token(TOKEN_B), one_e15());
        let outbound = swap.lock_outbound();
        assert_eq!(swap.source.ledger.native_balance_of(USER), U256::zero());
        assert_eq!(swap.source.ledger.custody_balance(&Asset::Native), one_e18());

        swap.source.clock.set_time(swap.timelocks.outbound);
        swap.source.service.refund(&outbound.params).unwrap();
        assert_eq!(swap.source.ledger.native_balance_of(USER), one_e18());
        assert_eq!(swap.source.ledger.native_balance_of(LP), U256::zero());
        assert!(swap.source.ledger.custody_balance(&Asset::Native).is_zero());
        assert_custody_matches(&swap.source, &[Asset::Native]);
    }

    /// Native coin attached to a token leg comes back with the tokens.
    #[test]
    fn test_expired_token_leg_refunds_attached_native() {
        let swap = SwapFixture::token_to_token();
        let token = Asset::Token(TOKEN_A);
        let fee = U256::from(5_000u64);
        swap.source.ledger.mint_native(USER, fee);

        let terms = swap.outbound_terms().with_native_amount(fee);
        let outbound = swap
            .source
            .service
            .lock_outbound(terms, swap.outbound_route(), fee)
            .unwrap();
        assert_eq!(swap.source.ledger.native_balance_of(USER), U256::zero());
        assert_eq!(swap.source.ledger.custody_balance(&Asset::Native), fee);

        swap.source.clock.set_time(swap.timelocks.outbound);
        swap.source.service.refund(&outbound.params).unwrap();
        assert_eq!(swap.source.ledger.native_balance_of(USER), fee);
        assert_eq!(swap.source_balance(token, USER), one_e18());
        assert!(swap.source.ledger.custody_balance(&Asset::Native).is_zero());
        assert!(swap.source.ledger.custody_balance(&token).is_zero());
        assert_custody_matches(&swap.source, &[token, Asset::Native]);
    }

    /// Refunded records stay queryable and keep their terms.
    #[test]
    fn test_settled_records_are_retained() {
        let swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        swap.source.clock.set_time(outbound.terms().timelock + 1);
        swap.source.service.refund(&outbound.params).unwrap();

        let stored = swap.source.service.get_transfer(&outbound.id).unwrap();
        assert_eq!(stored.state, TransferState::Refunded);
        assert_eq!(stored.params, outbound.params);
        assert_eq!(swap.source.service.transfer_count(), 1);
        assert_eq!(swap.source.service.count_by_state(TransferState::Locked), 0);
    }

    // =============================================================================
    // ESCROW ACCOUNTING
    // =============================================================================

    /// Custody always equals the sum of `Locked` records, across a mix of
    /// open, redeemed and refunded transfers.
    #[test]
    fn test_custody_tracks_locked_records() {
        let swap = SwapFixture::token_to_token();
        let token = Asset::Token(TOKEN_A);
        let amount = U256::from(1_000u64);
        swap.source.ledger.mint(TOKEN_A, USER, amount * U256::from(3u64));
        swap.source.ledger.approve(TOKEN_A, USER, one_e18() + amount * U256::from(3u64));

        let now = swap.source.clock.now();
        let mut legs = Vec::new();
        for (i, timelock) in [now + 100, now + 200, now + 300].into_iter().enumerate() {
            let terms = TransferTerms::new(USER, LP, token, amount, swap.hashlock, timelock);
            let mut route = swap.outbound_route();
            route.bid_id = obridge_core::BidId(100 + i as u64);
            legs.push(swap.source.service.lock_outbound(terms, route, U256::zero()).unwrap());
        }
        assert_custody_matches(&swap.source, &[token]);
        assert_eq!(swap.source.ledger.custody_balance(&token), amount * U256::from(3u64));

        swap.source
            .service
            .confirm(&legs[0].params, swap.preimage())
            .unwrap();
        assert_custody_matches(&swap.source, &[token]);

        swap.source.clock.set_time(now + 200);
        swap.source.service.refund(&legs[1].params).unwrap();
        assert_custody_matches(&swap.source, &[token]);
        assert_eq!(swap.source.ledger.custody_balance(&token), amount);
        assert_eq!(swap.source.service.count_by_state(TransferState::Locked), 1);
    }
}
