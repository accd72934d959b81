//! # Chain Instance
//!
//! One independently deployed OBridge instance: its own ledger, clock,
//! event bus and lock registry. Two instances never share state; the only
//! link between them is what an observer reads off their event streams.

use obridge_core::{
    Address, BroadcastEventBus, ChainId, InMemoryLedger, ManualClock, ObridgeConfig,
    ObridgeError, ObridgeEvent, ObridgeService, TransferState,
};
use obridge_telemetry::{record_event, record_failure, set_escrowed_transfers};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

/// Service type hosted by a chain instance.
pub type ChainService =
    ObridgeService<Arc<InMemoryLedger>, Arc<ManualClock>, Arc<BroadcastEventBus>>;

/// A simulated chain running OBridge.
pub struct ChainInstance {
    /// Metric and log label.
    pub label: String,
    /// Chain id.
    pub chain_id: ChainId,
    /// Balances and allowances.
    pub ledger: Arc<InMemoryLedger>,
    /// Block time.
    pub clock: Arc<ManualClock>,
    /// Event stream.
    pub bus: Arc<BroadcastEventBus>,
    /// The OBridge instance.
    pub service: ChainService,
    observer: broadcast::Receiver<ObridgeEvent>,
}

impl ChainInstance {
    /// Deploy an instance whose escrow is held by `custodian`.
    pub fn deploy(label: impl Into<String>, config: ObridgeConfig, custodian: Address) -> Self {
        let ledger = Arc::new(InMemoryLedger::new(custodian));
        let clock = Arc::new(ManualClock::new());
        let bus = Arc::new(BroadcastEventBus::new(config.event_channel_capacity));
        let observer = bus.subscribe();
        let chain_id = config.chain_id;
        let service = ObridgeService::with_config(
            config,
            Arc::clone(&ledger),
            Arc::clone(&clock),
            Arc::clone(&bus),
        );

        Self {
            label: label.into(),
            chain_id,
            ledger,
            clock,
            bus,
            service,
            observer,
        }
    }

    /// Take every event published since the last drain.
    ///
    /// Each observed event is counted in the telemetry registry.
    pub fn drain_events(&mut self) -> Vec<ObridgeEvent> {
        let mut events = Vec::new();
        loop {
            match self.observer.try_recv() {
                Ok(event) => {
                    record_event(&self.label, event.name());
                    match event.to_log_line() {
                        Ok(line) => debug!(chain = %self.label, "{}", line),
                        Err(err) => warn!(
                            chain = %self.label,
                            event = event.name(),
                            error = %err,
                            "Event serialization failed"
                        ),
                    }
                    events.push(event);
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(chain = %self.label, skipped, "Event observer lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        events
    }

    /// Record the outcome of an operation against this chain.
    ///
    /// Failures are counted by error code; the escrow gauge is refreshed
    /// either way.
    pub fn observe<T>(
        &self,
        operation: &str,
        result: Result<T, ObridgeError>,
    ) -> Result<T, ObridgeError> {
        if let Err(err) = &result {
            record_failure(&self.label, operation, err.code());
        }
        set_escrowed_transfers(
            &self.label,
            self.service.count_by_state(TransferState::Locked),
        );
        result
    }
}
