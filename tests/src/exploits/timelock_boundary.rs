//! # Timelock Boundary
//!
//! Redemption closes and refund opens at exactly the timelock, so there is
//! no instant where both are possible and none where neither is.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use primitive_types::U256;
    use obridge_core::{
        Clock, InvalidParameter, ObridgeApi, ObridgeError, StateViolation, TransferState,
    };

    #[test]
    fn test_redeem_one_second_before_timelock() {
        let swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        swap.source.clock.set_time(outbound.terms().timelock - 1);

        let err = swap.source.service.refund(&outbound.params).unwrap_err();
        assert!(matches!(
            err,
            ObridgeError::InvalidState {
                reason: StateViolation::RefundNotYetAvailable { .. },
                ..
            }
        ));

        let redeemed = swap
            .source
            .service
            .confirm(&outbound.params, swap.preimage())
            .unwrap();
        assert_eq!(redeemed.state, TransferState::Redeemed);
    }

    #[test]
    fn test_redeem_at_timelock_rejected() {
        let swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        let timelock = outbound.terms().timelock;
        swap.source.clock.set_time(timelock);

        let err = swap
            .source
            .service
            .confirm(&outbound.params, swap.preimage())
            .unwrap_err();
        match err {
            ObridgeError::InvalidState {
                reason: StateViolation::RedemptionClosed { timelock: t, now },
                ..
            } => {
                assert_eq!(t, timelock);
                assert_eq!(now, timelock);
            }
            other => panic!("expected RedemptionClosed, got {other:?}"),
        }

        let refunded = swap.source.service.refund(&outbound.params).unwrap();
        assert_eq!(refunded.state, TransferState::Refunded);
        assert_eq!(swap.source_balance(swap.src_asset, USER), one_e18());
    }

    /// A revealed preimage is useless once the leg has expired.
    #[test]
    fn test_late_reveal_cannot_redeem() {
        let swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        swap.source.clock.set_time(outbound.terms().timelock + 3600);

        assert!(swap
            .source
            .service
            .confirm(&outbound.params, swap.preimage())
            .is_err());
        assert_eq!(swap.source_balance(swap.src_asset, LP), U256::zero());
    }

    #[test]
    fn test_lock_with_expired_timelock_rejected() {
        let swap = SwapFixture::token_to_token();
        let now = swap.source.clock.now();

        for timelock in [now, now - 1] {
            let mut terms = swap.outbound_terms();
            terms.timelock = timelock;
            let err = swap
                .source
                .service
                .lock_outbound(terms, swap.outbound_route(), U256::zero())
                .unwrap_err();
            assert!(matches!(
                err,
                ObridgeError::InvalidParameters(InvalidParameter::TimelockNotInFuture { .. })
            ));
        }
        assert_eq!(swap.source.service.transfer_count(), 0);
        assert_eq!(swap.source_balance(swap.src_asset, USER), one_e18());
    }
}
