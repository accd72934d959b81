//! Event payloads and their log-line wire format.
//!
//! ```text
//! EVENT_JSON:{"standard":"obridge","version":"1.0.0","event":"transfer_out","data":{...}}
//! ```
//!
//! Ids, hashlocks and preimages are lowercase hex, amounts are decimal
//! strings, addresses are `0x`-prefixed hex and the native asset is the zero
//! address.

use crate::domain::{
    Address, Asset, BidId, ChainId, ForeignAddress, Hashlock, InboundRoute, LegRoute,
    LockedTransfer, OutboundRoute, Preimage, TransferId, TransferParams, TransferTerms,
};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Event standard name.
pub const EVENT_STANDARD: &str = "obridge";

/// Event standard version.
pub const EVENT_VERSION: &str = "1.0.0";

/// Prefix of a log line carrying an event.
pub const EVENT_LOG_PREFIX: &str = "EVENT_JSON:";

mod hex_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.trim_start_matches("0x")).map_err(de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| de::Error::custom("expected 32 bytes"))
    }
}

mod decimal {
    use primitive_types::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_dec_str(&s).map_err(|e| de::Error::custom(format!("{e:?}")))
    }
}

/// Payload of `transfer_out`: a user locked a source-chain leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutData {
    /// Derived identifier.
    #[serde(with = "hex_bytes")]
    pub transfer_id: TransferId,
    /// Funding user.
    pub sender: Address,
    /// Liquidity provider on this chain.
    pub receiver: Address,
    /// Escrowed asset.
    #[serde(rename = "token")]
    pub asset: Asset,
    /// Escrowed amount.
    #[serde(with = "decimal")]
    pub amount: U256,
    /// Native coin escrowed alongside a token.
    #[serde(with = "decimal")]
    pub native_amount: U256,
    /// Swap hashlock.
    #[serde(with = "hex_bytes")]
    pub hashlock: Hashlock,
    /// Expiry.
    pub timelock: u64,
    /// Destination chain.
    pub dst_chain_id: ChainId,
    /// Receiver on the destination chain.
    #[serde(rename = "dst_address")]
    pub dst_receiver: ForeignAddress,
    /// Liquidity-provider quote.
    pub bid_id: BidId,
    /// Requested destination asset.
    #[serde(rename = "token_dst")]
    pub dst_asset: ForeignAddress,
    /// Requested destination amount.
    #[serde(rename = "amount_dst", with = "decimal")]
    pub dst_amount: U256,
}

/// Payload of `transfer_in`: a liquidity provider locked a destination-chain leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInData {
    /// Derived identifier.
    #[serde(with = "hex_bytes")]
    pub transfer_id: TransferId,
    /// Funding liquidity provider.
    pub sender: Address,
    /// User on this chain.
    pub receiver: Address,
    /// Escrowed asset.
    #[serde(rename = "token")]
    pub asset: Asset,
    /// Escrowed amount.
    #[serde(rename = "token_amount", with = "decimal")]
    pub amount: U256,
    /// Native coin escrowed alongside a token.
    #[serde(with = "decimal")]
    pub native_amount: U256,
    /// Swap hashlock.
    #[serde(with = "hex_bytes")]
    pub hashlock: Hashlock,
    /// Expiry.
    pub timelock: u64,
    /// Chain hosting the outbound leg.
    pub src_chain_id: ChainId,
    /// Outbound leg identifier.
    #[serde(with = "hex_bytes")]
    pub src_transfer_id: TransferId,
}

/// Payload of `transfer_confirmed`. Publishes the preimage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferConfirmedData {
    /// Redeemed transfer.
    #[serde(with = "hex_bytes")]
    pub transfer_id: TransferId,
    /// Revealed secret.
    #[serde(with = "hex_bytes")]
    pub preimage: Preimage,
}

/// Payload of `transfer_refunded`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRefundedData {
    /// Refunded transfer.
    #[serde(with = "hex_bytes")]
    pub transfer_id: TransferId,
}

/// Notification emitted by a chain instance. Never mutated after emission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ObridgeEvent {
    /// Outbound leg created.
    TransferOut(TransferOutData),
    /// Inbound leg created.
    TransferIn(TransferInData),
    /// Transfer redeemed.
    TransferConfirmed(TransferConfirmedData),
    /// Transfer refunded.
    TransferRefunded(TransferRefundedData),
}

#[derive(Serialize)]
struct EventEnvelope<'a> {
    standard: &'static str,
    version: &'static str,
    #[serde(flatten)]
    event: &'a ObridgeEvent,
}

impl ObridgeEvent {
    /// Creation notification carrying the full record.
    pub fn created(transfer: &LockedTransfer) -> Self {
        let terms = transfer.terms();
        match &transfer.params.route {
            LegRoute::Outbound(route) => ObridgeEvent::TransferOut(TransferOutData {
                transfer_id: transfer.id,
                sender: terms.sender,
                receiver: terms.receiver,
                asset: terms.asset,
                amount: terms.amount,
                native_amount: terms.native_amount,
                hashlock: terms.hashlock,
                timelock: terms.timelock,
                dst_chain_id: route.dst_chain_id,
                dst_receiver: route.dst_receiver,
                bid_id: route.bid_id,
                dst_asset: route.dst_asset,
                dst_amount: route.dst_amount,
            }),
            LegRoute::Inbound(route) => ObridgeEvent::TransferIn(TransferInData {
                transfer_id: transfer.id,
                sender: terms.sender,
                receiver: terms.receiver,
                asset: terms.asset,
                amount: terms.amount,
                native_amount: terms.native_amount,
                hashlock: terms.hashlock,
                timelock: terms.timelock,
                src_chain_id: route.src_chain_id,
                src_transfer_id: route.src_transfer_id,
            }),
        }
    }

    /// Redemption notification.
    pub fn confirmed(id: TransferId, preimage: Preimage) -> Self {
        ObridgeEvent::TransferConfirmed(TransferConfirmedData {
            transfer_id: id,
            preimage,
        })
    }

    /// Refund notification.
    pub fn refunded(id: TransferId) -> Self {
        ObridgeEvent::TransferRefunded(TransferRefundedData { transfer_id: id })
    }

    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            ObridgeEvent::TransferOut(_) => "transfer_out",
            ObridgeEvent::TransferIn(_) => "transfer_in",
            ObridgeEvent::TransferConfirmed(_) => "transfer_confirmed",
            ObridgeEvent::TransferRefunded(_) => "transfer_refunded",
        }
    }

    /// Transfer the event is about.
    pub fn transfer_id(&self) -> &TransferId {
        match self {
            ObridgeEvent::TransferOut(data) => &data.transfer_id,
            ObridgeEvent::TransferIn(data) => &data.transfer_id,
            ObridgeEvent::TransferConfirmed(data) => &data.transfer_id,
            ObridgeEvent::TransferRefunded(data) => &data.transfer_id,
        }
    }

    /// Serialize with the standard envelope.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&EventEnvelope {
            standard: EVENT_STANDARD,
            version: EVENT_VERSION,
            event: self,
        })
    }

    /// Serialize as an `EVENT_JSON:` log line.
    pub fn to_log_line(&self) -> Result<String, serde_json::Error> {
        Ok(format!("{}{}", EVENT_LOG_PREFIX, self.to_json()?))
    }
}

impl TransferOutData {
    /// Rebuild the parameter tuple of the announced leg.
    pub fn params(&self) -> TransferParams {
        let terms = TransferTerms::new(
            self.sender,
            self.receiver,
            self.asset,
            self.amount,
            self.hashlock,
            self.timelock,
        )
        .with_native_amount(self.native_amount);
        TransferParams::outbound(
            terms,
            OutboundRoute {
                dst_chain_id: self.dst_chain_id,
                dst_receiver: self.dst_receiver,
                bid_id: self.bid_id,
                dst_asset: self.dst_asset,
                dst_amount: self.dst_amount,
            },
        )
    }
}

impl TransferInData {
    /// Rebuild the parameter tuple of the announced leg.
    pub fn params(&self) -> TransferParams {
        let terms = TransferTerms::new(
            self.sender,
            self.receiver,
            self.asset,
            self.amount,
            self.hashlock,
            self.timelock,
        )
        .with_native_amount(self.native_amount);
        TransferParams::inbound(
            terms,
            InboundRoute {
                src_chain_id: self.src_chain_id,
                src_transfer_id: self.src_transfer_id,
            },
        )
    }
}
