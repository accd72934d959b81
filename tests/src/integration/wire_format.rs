//! # Event Wire Format
//!
//! Observers on the other chain only see serialized events. These tests
//! check that what a live instance emits is enough to rebuild the leg and
//! recompute its identifier.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use obridge_core::events::{EVENT_LOG_PREFIX, EVENT_STANDARD, EVENT_VERSION};
    use obridge_core::{derive_transfer_id, ObridgeApi, ObridgeEvent};
    use serde_json::Value;

    fn envelope(event: &ObridgeEvent) -> Value {
        serde_json::from_str(&event.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_transfer_out_envelope() {
        let mut swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        let events = swap.source.drain_events();
        assert_eq!(events.len(), 1);

        let json = envelope(&events[0]);
        assert_eq!(json["standard"], EVENT_STANDARD);
        assert_eq!(json["version"], EVENT_VERSION);
        assert_eq!(json["event"], "transfer_out");

        let data = &json["data"];
        assert_eq!(data["transfer_id"], hex::encode(outbound.id));
        assert_eq!(data["amount"], one_e18().to_string());
        assert_eq!(data["amount_dst"], one_e15().to_string());
        assert_eq!(data["dst_chain_id"], DESTINATION_CHAIN.0);
        assert_eq!(data["hashlock"], hex::encode(swap.hashlock));
        assert_eq!(data["timelock"], swap.timelocks.outbound);
        assert!(data["token_dst"].is_string());
    }

    /// An observer can recompute the id from a parsed `transfer_out`.
    #[test]
    fn test_observer_recomputes_outbound_id() {
        let mut swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        let line = swap.source.drain_events()[0].to_log_line().unwrap();

        let body = line.strip_prefix(EVENT_LOG_PREFIX).unwrap();
        let parsed: Value = serde_json::from_str(body).unwrap();
        let event: ObridgeEvent = serde_json::from_value(serde_json::json!({
            "event": parsed["event"],
            "data": parsed["data"],
        }))
        .unwrap();

        let ObridgeEvent::TransferOut(data) = event else {
            panic!("expected transfer_out");
        };
        assert_eq!(derive_transfer_id(&data.params()), outbound.id);
        assert_eq!(swap.source.service.transfer_id(&data.params()), outbound.id);
    }

    #[test]
    fn test_transfer_in_links_outbound() {
        let mut swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        let inbound = swap.lock_inbound(&outbound);

        let events = swap.destination.drain_events();
        let json = envelope(&events[0]);
        assert_eq!(json["event"], "transfer_in");
        assert_eq!(json["data"]["src_transfer_id"], hex::encode(outbound.id));
        assert_eq!(json["data"]["src_chain_id"], SOURCE_CHAIN.0);
        assert_eq!(json["data"]["token_amount"], one_e15().to_string());

        let ObridgeEvent::TransferIn(data) = &events[0] else {
            panic!("expected transfer_in");
        };
        assert_eq!(derive_transfer_id(&data.params()), inbound.id);
    }

    /// `transfer_confirmed` publishes the preimage; `transfer_refunded` only
    /// the id.
    #[test]
    fn test_settlement_events() {
        let mut swap = SwapFixture::token_to_token();
        let outbound = swap.lock_outbound();
        let inbound = swap.lock_inbound(&outbound);

        swap.destination
            .service
            .confirm(&inbound.params, swap.preimage())
            .unwrap();
        let confirmed = swap.destination.drain_events().pop().unwrap();
        let json = envelope(&confirmed);
        assert_eq!(json["event"], "transfer_confirmed");
        assert_eq!(json["data"]["preimage"], hex::encode(swap.preimage()));

        swap.source.clock.set_time(swap.timelocks.outbound);
        swap.source.service.refund(&outbound.params).unwrap();
        let refunded = swap.source.drain_events().pop().unwrap();
        let json = envelope(&refunded);
        assert_eq!(json["event"], "transfer_refunded");
        assert_eq!(json["data"]["transfer_id"], hex::encode(outbound.id));
        assert!(json["data"].get("preimage").is_none());
    }
}
