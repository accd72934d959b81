//! # Node Configuration
//!
//! Which chains to host and which swap scenario to drive.

use obridge_core::{ChainId, ConfigError, ObridgeConfig};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Swap scenario driven by the node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scenario {
    /// Token on the source chain for token on the destination chain.
    #[default]
    TokenToToken,
    /// Native coin for token.
    NativeToToken,
    /// Token for native coin.
    TokenToNative,
    /// LP never answers; the user refunds after expiry.
    Refund,
}

impl Scenario {
    /// CLI/env spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::TokenToToken => "token-to-token",
            Scenario::NativeToToken => "native-to-token",
            Scenario::TokenToNative => "token-to-native",
            Scenario::Refund => "refund",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "token-to-token" => Ok(Scenario::TokenToToken),
            "native-to-token" => Ok(Scenario::NativeToToken),
            "token-to-native" => Ok(Scenario::TokenToNative),
            "refund" => Ok(Scenario::Refund),
            other => Err(NodeError::InvalidScenario(other.to_string())),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Unknown scenario name.
    #[error("Unknown scenario: {0}")]
    InvalidScenario(String),

    /// Both legs configured on the same chain.
    #[error("Source and destination chain must differ (both {0})")]
    SameChain(ChainId),

    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// Chain instance configuration rejected.
    #[error(transparent)]
    Chain(#[from] ConfigError),
}

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Chain hosting the user's outbound leg.
    pub source: ObridgeConfig,
    /// Chain hosting the LP's inbound leg.
    pub destination: ObridgeConfig,
    /// Scenario to drive.
    pub scenario: Scenario,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            source: ObridgeConfig::for_chain(ChainId(1)),
            destination: ObridgeConfig::for_chain(ChainId(56)),
            scenario: Scenario::default(),
        }
    }
}

fn parse_chain(var: &'static str, default: ChainId) -> Result<ChainId, NodeError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(ChainId)
            .map_err(|_| NodeError::InvalidEnv { var, value }),
        Err(_) => Ok(default),
    }
}

impl NodeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OBRIDGE_SCENARIO`: `token-to-token`, `native-to-token`, `token-to-native`
    ///   or `refund` (default: token-to-token)
    /// - `OBRIDGE_SRC_CHAIN_ID`: default 1
    /// - `OBRIDGE_DST_CHAIN_ID`: default 56
    /// - every `OBRIDGE_*` variable read by `ObridgeConfig::from_env`, applied
    ///   to both chains
    pub fn from_env() -> Result<Self, NodeError> {
        let base = ObridgeConfig::from_env()?;
        let defaults = Self::default();

        let source = ObridgeConfig {
            chain_id: parse_chain("OBRIDGE_SRC_CHAIN_ID", defaults.source.chain_id)?,
            ..base.clone()
        };
        let destination = ObridgeConfig {
            chain_id: parse_chain("OBRIDGE_DST_CHAIN_ID", defaults.destination.chain_id)?,
            ..base
        };
        let scenario = match env::var("OBRIDGE_SCENARIO") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.scenario,
        };

        let config = Self {
            source,
            destination,
            scenario,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the two chains are distinct and individually valid.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.source.chain_id == self.destination.chain_id {
            return Err(NodeError::SameChain(self.source.chain_id));
        }
        self.source.validate()?;
        self.destination.validate()?;
        Ok(())
    }
}
