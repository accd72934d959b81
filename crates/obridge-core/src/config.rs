//! Configuration for one OBridge chain instance.

use crate::algorithms::HashlockScheme;
use crate::domain::{ChainId, MIN_TIMELOCK_MARGIN_SECS};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Default lifetime of the first-expiring leg (24 hours).
pub const DEFAULT_LOCK_DURATION_SECS: u64 = 24 * 3600;

/// Chain instance configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObridgeConfig {
    /// Chain this instance runs on
    pub chain_id: ChainId,
    /// Hash binding preimages to hashlocks
    pub hashlock_scheme: HashlockScheme,
    /// Required gap between inbound and outbound expiry
    pub min_timelock_margin_secs: u64,
    /// Lifetime suggested for new inbound legs
    pub default_lock_duration_secs: u64,
    /// Undelivered events buffered per subscriber
    pub event_channel_capacity: usize,
}

impl Default for ObridgeConfig {
    fn default() -> Self {
        Self {
            chain_id: ChainId(1),
            hashlock_scheme: HashlockScheme::default(),
            min_timelock_margin_secs: MIN_TIMELOCK_MARGIN_SECS,
            default_lock_duration_secs: DEFAULT_LOCK_DURATION_SECS,
            event_channel_capacity: 1024,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// Event channel needs room for at least one event.
    #[error("event_channel_capacity must be greater than zero")]
    ZeroEventCapacity,

    /// Legs need a non-zero lifetime.
    #[error("default_lock_duration_secs must be greater than zero")]
    ZeroLockDuration,
}

fn parse_env<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}

impl ObridgeConfig {
    /// Config for `chain_id` with defaults elsewhere.
    pub fn for_chain(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OBRIDGE_CHAIN_ID`: chain id (default: 1)
    /// - `OBRIDGE_HASHLOCK_SCHEME`: `sha256`, `sha3_256` or `keccak256` (default: keccak256)
    /// - `OBRIDGE_MIN_TIMELOCK_MARGIN_SECS`: default 21600
    /// - `OBRIDGE_LOCK_DURATION_SECS`: default 86400
    /// - `OBRIDGE_EVENT_CAPACITY`: default 1024
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            chain_id: parse_env::<u64>("OBRIDGE_CHAIN_ID")?
                .map(ChainId)
                .unwrap_or(defaults.chain_id),
            hashlock_scheme: parse_env("OBRIDGE_HASHLOCK_SCHEME")?
                .unwrap_or(defaults.hashlock_scheme),
            min_timelock_margin_secs: parse_env("OBRIDGE_MIN_TIMELOCK_MARGIN_SECS")?
                .unwrap_or(defaults.min_timelock_margin_secs),
            default_lock_duration_secs: parse_env("OBRIDGE_LOCK_DURATION_SECS")?
                .unwrap_or(defaults.default_lock_duration_secs),
            event_channel_capacity: parse_env("OBRIDGE_EVENT_CAPACITY")?
                .unwrap_or(defaults.event_channel_capacity),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_channel_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        if self.default_lock_duration_secs == 0 {
            return Err(ConfigError::ZeroLockDuration);
        }
        Ok(())
    }
}
