//! # OBridge Node
//!
//! Runs one simulated cross-chain swap and prints the outcome.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging + metrics registry)
//! 2. Load node configuration from the environment
//! 3. Deploy the source and destination instances
//! 4. Drive the configured scenario
//! 5. Print the swap report and the metrics snapshot

use anyhow::{Context, Result};
use obridge_node::{run_swap, NodeConfig};
use obridge_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use tracing::{debug, info};

fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("failed to initialize telemetry")?;

    let config = NodeConfig::from_env().context("invalid node configuration")?;
    info!("===========================================");
    info!("  OBridge Node v{}", obridge_core::VERSION);
    info!("===========================================");
    info!(
        scenario = %config.scenario,
        source = %config.source.chain_id,
        destination = %config.destination.chain_id,
        scheme = %config.source.hashlock_scheme,
        "Configuration loaded"
    );

    let report = run_swap(config).context("swap failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let metrics = encode_metrics().context("failed to encode metrics")?;
    debug!("Metrics snapshot:\n{}", metrics);

    Ok(())
}
