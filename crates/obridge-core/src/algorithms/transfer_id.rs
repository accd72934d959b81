//! # Transfer Identifier Derivation
//!
//! `id = SHA3-256(canonical_encoding(params))`.
//!
//! The encoding is fixed protocol-wide. Every field is written at a fixed
//! width, big-endian, in declaration order, behind a versioned domain tag.
//! Any change to the layout must bump the tag, otherwise identifiers stop
//! matching between chains.

use crate::domain::{Asset, LegRoute, TransferId, TransferParams};
use primitive_types::U256;
use sha3::{Digest, Sha3_256};

/// Domain tag prefixed to every encoding (layout version 1).
pub const TRANSFER_ID_DOMAIN: &[u8] = b"obridge/transfer/v1";

const LEG_OUTBOUND: u8 = 0x01;
const LEG_INBOUND: u8 = 0x02;
const ASSET_NATIVE: u8 = 0x00;
const ASSET_TOKEN: u8 = 0x01;

fn push_u256(buf: &mut Vec<u8>, value: &U256) {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    buf.extend_from_slice(&bytes);
}

/// Canonical byte encoding of a transfer's parameter tuple.
pub fn canonical_encoding(params: &TransferParams) -> Vec<u8> {
    let terms = &params.terms;
    let mut buf = Vec::with_capacity(320);
    buf.extend_from_slice(TRANSFER_ID_DOMAIN);
    buf.push(match params.route {
        LegRoute::Outbound(_) => LEG_OUTBOUND,
        LegRoute::Inbound(_) => LEG_INBOUND,
    });
    buf.extend_from_slice(terms.sender.as_bytes());
    buf.extend_from_slice(terms.receiver.as_bytes());
    buf.push(match terms.asset {
        Asset::Native => ASSET_NATIVE,
        Asset::Token(_) => ASSET_TOKEN,
    });
    buf.extend_from_slice(terms.asset.address().as_bytes());
    push_u256(&mut buf, &terms.amount);
    push_u256(&mut buf, &terms.native_amount);
    buf.extend_from_slice(&terms.hashlock);
    buf.extend_from_slice(&terms.timelock.to_be_bytes());

    match &params.route {
        LegRoute::Outbound(route) => {
            buf.extend_from_slice(&route.dst_chain_id.0.to_be_bytes());
            buf.extend_from_slice(route.dst_receiver.as_bytes());
            buf.extend_from_slice(&route.bid_id.0.to_be_bytes());
            buf.extend_from_slice(route.dst_asset.as_bytes());
            push_u256(&mut buf, &route.dst_amount);
        }
        LegRoute::Inbound(route) => {
            buf.extend_from_slice(&route.src_chain_id.0.to_be_bytes());
            buf.extend_from_slice(&route.src_transfer_id);
        }
    }
    buf
}

/// Derive the transfer identifier from its full parameter tuple.
pub fn derive_transfer_id(params: &TransferParams) -> TransferId {
    let digest = Sha3_256::digest(canonical_encoding(params));
    let mut id = [0u8; 32];
    id.copy_from_slice(&digest);
    id
}
