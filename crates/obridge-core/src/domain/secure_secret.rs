//! # Secure Preimage Type
//!
//! Holder-side wrapper for a swap secret that zeroizes memory on drop.
//!
//! The secret stays private only until the first successful confirm on
//! either chain. Until then it must not leak through logs or dumps.

use super::errors::Preimage;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A swap secret that zeroizes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretPreimage {
    inner: [u8; 32],
}

impl SecretPreimage {
    /// Wrap existing secret bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { inner: bytes }
    }

    /// Draw a fresh secret from the thread RNG.
    pub fn generate() -> Self {
        let mut inner = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut inner);
        Self { inner }
    }

    /// Create from a slice (copies into fixed array).
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != 32 {
            return None;
        }
        let mut inner = [0u8; 32];
        inner.copy_from_slice(slice);
        Some(Self { inner })
    }

    /// Borrow the secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.inner
    }

    /// Copy the secret out for a confirm call. After that call it is public.
    pub fn reveal(&self) -> Preimage {
        self.inner
    }
}

impl std::fmt::Debug for SecretPreimage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretPreimage(***)")
    }
}

impl Serialize for SecretPreimage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.inner))
    }
}

impl<'de> Deserialize<'de> for SecretPreimage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        Self::from_slice(&bytes).ok_or_else(|| serde::de::Error::custom("invalid preimage length"))
    }
}
