//! # Swap Simulation
//!
//! Drives one swap across two chain instances, acting in turn as the user
//! and as the liquidity provider. Each party only learns about the other
//! chain through its event stream.
//!
//! ```text
//! user ──lock_outbound──► source        destination
//!                          │ transfer_out
//!                          ▼
//!                          LP ──lock_inbound──► destination
//!                                                 │ transfer_in
//!                                                 ▼
//!                          user verifies, confirms inbound (reveals secret)
//!                                                 │ transfer_confirmed
//!                                                 ▼
//!                          LP ──confirm outbound with revealed secret──► source
//! ```

use crate::chain::ChainInstance;
use crate::config::{NodeConfig, Scenario};
use anyhow::{bail, Context};
use obridge_core::algorithms::local_to_foreign;
use obridge_core::{
    create_hashlock, generate_preimage, plan_inbound_leg, recommended_timelocks,
    verify_counter_leg, Address, Asset, BidId, Clock, LegRoute, LockedTransfer, ObridgeApi,
    ObridgeEvent, OutboundRoute, Preimage, TransferId, TransferInData, TransferOutData,
    TransferTerms,
};
use obridge_telemetry::log_transfer_event;
use primitive_types::U256;
use serde::Serialize;
use tracing::{debug, info};

/// Seconds between simulated blocks.
pub const BLOCK_TIME_SECS: u64 = 12;

/// Outcome of a simulated swap.
#[derive(Debug, Clone, Serialize)]
pub struct SwapReport {
    /// Scenario that ran.
    pub scenario: String,
    /// Final state of the user's source-chain leg.
    pub outbound: LockedTransfer,
    /// Final state of the LP's destination-chain leg, if one was locked.
    pub inbound: Option<LockedTransfer>,
    /// Destination asset the user holds afterwards.
    pub user_received: U256,
    /// Source asset the LP holds afterwards.
    pub lp_received: U256,
    /// Source asset the user holds afterwards.
    pub user_source_balance: U256,
    /// Events observed on both chains.
    pub events_observed: usize,
}

/// Two chains, one user, one liquidity provider.
pub struct SwapSimulation {
    scenario: Scenario,
    source: ChainInstance,
    destination: ChainInstance,
    user: Address,
    liquidity_provider: Address,
    source_asset: Asset,
    destination_asset: Asset,
    source_amount: U256,
    destination_amount: U256,
    events_observed: usize,
}

fn assets_for(scenario: Scenario) -> (Asset, Asset) {
    let token_a = Asset::Token(Address::repeat_byte(0xA0));
    let token_b = Asset::Token(Address::repeat_byte(0xB0));
    match scenario {
        Scenario::TokenToToken | Scenario::Refund => (token_a, token_b),
        Scenario::NativeToToken => (Asset::Native, token_b),
        Scenario::TokenToNative => (token_a, Asset::Native),
    }
}

fn fund(chain: &ChainInstance, holder: Address, asset: Asset, amount: U256) {
    match asset {
        Asset::Native => chain.ledger.mint_native(holder, amount),
        Asset::Token(token) => {
            chain.ledger.mint(token, holder, amount);
            chain.ledger.approve(token, holder, amount);
        }
    }
}

fn find_out(events: &[ObridgeEvent], id: &TransferId) -> Option<TransferOutData> {
    events.iter().find_map(|event| match event {
        ObridgeEvent::TransferOut(data) if &data.transfer_id == id => Some(data.clone()),
        _ => None,
    })
}

fn find_in(events: &[ObridgeEvent], id: &TransferId) -> Option<TransferInData> {
    events.iter().find_map(|event| match event {
        ObridgeEvent::TransferIn(data) if &data.transfer_id == id => Some(data.clone()),
        _ => None,
    })
}

fn find_revealed(events: &[ObridgeEvent], id: &TransferId) -> Option<Preimage> {
    events.iter().find_map(|event| match event {
        ObridgeEvent::TransferConfirmed(data) if &data.transfer_id == id => Some(data.preimage),
        _ => None,
    })
}

impl SwapSimulation {
    /// Deploy both chains and fund both parties for `config.scenario`.
    pub fn new(config: NodeConfig) -> Self {
        let scenario = config.scenario;
        let source = ChainInstance::deploy("source", config.source, Address::repeat_byte(0xC5));
        let destination =
            ChainInstance::deploy("destination", config.destination, Address::repeat_byte(0xCD));
        let (source_asset, destination_asset) = assets_for(scenario);

        let user = Address::repeat_byte(0x01);
        let liquidity_provider = Address::repeat_byte(0x02);
        let source_amount = U256::exp10(18);
        let destination_amount = U256::exp10(15);

        fund(&source, user, source_asset, source_amount);
        fund(&destination, liquidity_provider, destination_asset, destination_amount);

        Self {
            scenario,
            source,
            destination,
            user,
            liquidity_provider,
            source_asset,
            destination_asset,
            source_amount,
            destination_amount,
            events_observed: 0,
        }
    }

    /// Source chain instance.
    pub fn source(&self) -> &ChainInstance {
        &self.source
    }

    /// Destination chain instance.
    pub fn destination(&self) -> &ChainInstance {
        &self.destination
    }

    fn mine_block(&self) {
        self.source.clock.advance_time(BLOCK_TIME_SECS);
        self.destination.clock.advance_time(BLOCK_TIME_SECS);
    }

    fn drain_source(&mut self) -> Vec<ObridgeEvent> {
        let events = self.source.drain_events();
        self.events_observed += events.len();
        events
    }

    fn drain_destination(&mut self) -> Vec<ObridgeEvent> {
        let events = self.destination.drain_events();
        self.events_observed += events.len();
        events
    }

    /// Run the configured scenario to completion.
    pub fn run(mut self) -> anyhow::Result<SwapReport> {
        info!(
            scenario = %self.scenario,
            source = %self.source.chain_id,
            destination = %self.destination.chain_id,
            "Starting swap"
        );

        // User: pick a secret and lock the source leg.
        let secret = generate_preimage();
        let scheme = self.source.service.config().hashlock_scheme;
        let hashlock = create_hashlock(secret.as_bytes(), scheme);
        let timelocks = recommended_timelocks(self.source.clock.now(), self.source.service.config());

        let terms = TransferTerms::new(
            self.user,
            self.liquidity_provider,
            self.source_asset,
            self.source_amount,
            hashlock,
            timelocks.outbound,
        );
        let attached = terms.required_attachment();
        let route = OutboundRoute {
            dst_chain_id: self.destination.chain_id,
            dst_receiver: local_to_foreign(&self.user),
            bid_id: BidId(1),
            dst_asset: local_to_foreign(&self.destination_asset.address()),
            dst_amount: self.destination_amount,
        };
        let outbound = self
            .source
            .observe(
                "lock_outbound",
                self.source.service.lock_outbound(terms, route, attached),
            )
            .context("user failed to lock the outbound leg")?;
        log_transfer_event!(
            info,
            self.source.label,
            "Outbound leg locked",
            hex::encode(outbound.id)
        );
        self.mine_block();

        // LP: observe the source chain.
        let source_events = self.drain_source();
        let announced = find_out(&source_events, &outbound.id)
            .context("outbound leg was not announced on the source chain")?;

        if self.scenario == Scenario::Refund {
            return self.expire_and_refund(outbound);
        }

        let planned = plan_inbound_leg(
            &announced,
            self.source.chain_id,
            self.liquidity_provider,
            timelocks.inbound,
            U256::zero(),
        )
        .context("LP could not answer the outbound leg")?;
        let LegRoute::Inbound(link) = planned.route.clone() else {
            bail!("planned leg is not an inbound leg");
        };
        let attached = planned.terms.required_attachment();
        let inbound = self
            .destination
            .observe(
                "lock_inbound",
                self.destination
                    .service
                    .lock_inbound(planned.terms.clone(), link, attached),
            )
            .context("LP failed to lock the inbound leg")?;
        log_transfer_event!(
            info,
            self.destination.label,
            "Inbound leg locked",
            hex::encode(inbound.id)
        );
        self.mine_block();

        // User: check the counter leg, then reveal on the destination chain.
        let destination_events = self.drain_destination();
        let counter = find_in(&destination_events, &inbound.id)
            .context("inbound leg was not announced on the destination chain")?;
        verify_counter_leg(
            &outbound,
            self.source.chain_id,
            &counter.params(),
            self.source.service.config().min_timelock_margin_secs,
        )
        .context("user rejected the counter leg")?;

        let inbound = self
            .destination
            .observe(
                "confirm",
                self.destination.service.confirm(&inbound.params, secret.reveal()),
            )
            .context("user failed to redeem the inbound leg")?;
        self.mine_block();

        // LP: learn the secret from the destination chain and redeem.
        let destination_events = self.drain_destination();
        let revealed = find_revealed(&destination_events, &inbound.id)
            .context("redemption did not publish the preimage")?;
        let outbound = self
            .source
            .observe("confirm", self.source.service.confirm(&outbound.params, revealed))
            .context("LP failed to redeem the outbound leg")?;

        // A second redemption must be refused.
        let replay = self
            .source
            .observe("confirm", self.source.service.confirm(&outbound.params, revealed));
        match replay {
            Ok(_) => bail!("replayed redemption was accepted"),
            Err(err) => debug!(code = err.code(), "Replay rejected"),
        }
        self.drain_source();

        info!(
            outbound = %outbound.state,
            inbound = %inbound.state,
            "Swap complete"
        );
        Ok(self.report(outbound, Some(inbound)))
    }

    fn expire_and_refund(mut self, outbound: LockedTransfer) -> anyhow::Result<SwapReport> {
        let early = self
            .source
            .observe("refund", self.source.service.refund(&outbound.params));
        if early.is_ok() {
            bail!("refund accepted before the timelock");
        }

        self.source.clock.set_time(outbound.terms().timelock);
        let outbound = self
            .source
            .observe("refund", self.source.service.refund(&outbound.params))
            .context("user failed to refund the expired leg")?;
        self.drain_source();

        info!(outbound = %outbound.state, "Swap expired and refunded");
        Ok(self.report(outbound, None))
    }

    fn report(&self, outbound: LockedTransfer, inbound: Option<LockedTransfer>) -> SwapReport {
        SwapReport {
            scenario: self.scenario.to_string(),
            outbound,
            inbound,
            user_received: self
                .destination
                .ledger
                .balance_of(&self.destination_asset, self.user),
            lp_received: self
                .source
                .ledger
                .balance_of(&self.source_asset, self.liquidity_provider),
            user_source_balance: self.source.ledger.balance_of(&self.source_asset, self.user),
            events_observed: self.events_observed,
        }
    }
}

/// Run `config`'s scenario end to end.
pub fn run_swap(config: NodeConfig) -> anyhow::Result<SwapReport> {
    SwapSimulation::new(config).run()
}
