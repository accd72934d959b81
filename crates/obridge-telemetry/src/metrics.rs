//! Prometheus metrics for OBridge chain instances.
//!
//! All metrics follow the naming convention: `obridge_<metric>_<unit>` and
//! carry a `chain` label so one process can host several instances.

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Transfers locked, by leg
    pub static ref TRANSFERS_LOCKED: CounterVec = CounterVec::new(
        Opts::new("obridge_transfers_locked_total", "Transfers escrowed"),
        &["chain", "leg"]  // leg: outbound/inbound
    ).expect("metric creation failed");

    /// Transfers redeemed with a valid preimage
    pub static ref TRANSFERS_CONFIRMED: CounterVec = CounterVec::new(
        Opts::new("obridge_transfers_confirmed_total", "Transfers redeemed"),
        &["chain"]
    ).expect("metric creation failed");

    /// Transfers refunded after expiry
    pub static ref TRANSFERS_REFUNDED: CounterVec = CounterVec::new(
        Opts::new("obridge_transfers_refunded_total", "Transfers refunded"),
        &["chain"]
    ).expect("metric creation failed");

    /// Rejected operations by error code
    pub static ref OPERATION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("obridge_operation_failures_total", "Rejected operations"),
        &["chain", "operation", "code"]
    ).expect("metric creation failed");

    /// Transfers currently holding escrow
    pub static ref ESCROWED_TRANSFERS: GaugeVec = GaugeVec::new(
        Opts::new("obridge_escrowed_transfers", "Transfers currently in Locked state"),
        &["chain"]
    ).expect("metric creation failed");

    /// Events observed on a chain's event stream
    pub static ref EVENTS_OBSERVED: CounterVec = CounterVec::new(
        Opts::new("obridge_events_observed_total", "Transfer events observed"),
        &["chain", "event"]
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRANSFERS_LOCKED.clone()),
        Box::new(TRANSFERS_CONFIRMED.clone()),
        Box::new(TRANSFERS_REFUNDED.clone()),
        Box::new(OPERATION_FAILURES.clone()),
        Box::new(ESCROWED_TRANSFERS.clone()),
        Box::new(EVENTS_OBSERVED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Count an event observed on `chain`'s event stream.
///
/// `event` is the wire name (`transfer_out`, `transfer_in`,
/// `transfer_confirmed`, `transfer_refunded`).
pub fn record_event(chain: &str, event: &str) {
    crate::metric_inc!(EVENTS_OBSERVED, &[chain, event]);
    match event {
        "transfer_out" => crate::metric_inc!(TRANSFERS_LOCKED, &[chain, "outbound"]),
        "transfer_in" => crate::metric_inc!(TRANSFERS_LOCKED, &[chain, "inbound"]),
        "transfer_confirmed" => crate::metric_inc!(TRANSFERS_CONFIRMED, &[chain]),
        "transfer_refunded" => crate::metric_inc!(TRANSFERS_REFUNDED, &[chain]),
        _ => {}
    }
}

/// Count a rejected operation.
pub fn record_failure(chain: &str, operation: &str, code: &str) {
    crate::metric_inc!(OPERATION_FAILURES, &[chain, operation, code]);
}

/// Set the number of `Locked` transfers on `chain`.
pub fn set_escrowed_transfers(chain: &str, count: usize) {
    ESCROWED_TRANSFERS
        .with_label_values(&[chain])
        .set(count as f64);
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
