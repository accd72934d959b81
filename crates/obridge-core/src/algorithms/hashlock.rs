//! # Hashlock Generation and Verification
//!
//! `hashlock = H(preimage)` for the scheme a chain instance is configured
//! with. Both legs of one swap must use the same scheme.

use crate::domain::{Hashlock, Preimage, SecretPreimage};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256};
use std::fmt;
use std::str::FromStr;

/// Hash function binding a preimage to its hashlock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashlockScheme {
    /// SHA-256.
    Sha256,
    /// FIPS-202 SHA3-256.
    Sha3_256,
    /// Keccak-256 as used by EVM contracts.
    #[default]
    Keccak256,
}

impl HashlockScheme {
    /// Hash `data` with this scheme.
    pub fn digest(&self, data: &[u8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        match self {
            HashlockScheme::Sha256 => out.copy_from_slice(&Sha256::digest(data)),
            HashlockScheme::Sha3_256 => out.copy_from_slice(&Sha3_256::digest(data)),
            HashlockScheme::Keccak256 => out.copy_from_slice(&Keccak256::digest(data)),
        }
        out
    }

    /// Config/env spelling of this scheme.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashlockScheme::Sha256 => "sha256",
            HashlockScheme::Sha3_256 => "sha3_256",
            HashlockScheme::Keccak256 => "keccak256",
        }
    }
}

impl fmt::Display for HashlockScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashlockScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "sha256" | "sha_256" => Ok(HashlockScheme::Sha256),
            "sha3_256" | "sha3" => Ok(HashlockScheme::Sha3_256),
            "keccak256" | "keccak" => Ok(HashlockScheme::Keccak256),
            other => Err(format!("unknown hashlock scheme: {other}")),
        }
    }
}

/// Generate a fresh swap secret.
pub fn generate_preimage() -> SecretPreimage {
    SecretPreimage::generate()
}

/// Create a hashlock from a preimage.
pub fn create_hashlock(preimage: &Preimage, scheme: HashlockScheme) -> Hashlock {
    scheme.digest(preimage)
}

/// Verify that a preimage matches a hashlock.
pub fn verify_preimage(preimage: &Preimage, hashlock: &Hashlock, scheme: HashlockScheme) -> bool {
    create_hashlock(preimage, scheme) == *hashlock
}
