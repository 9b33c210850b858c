//! # Identity Handles
//!
//! Every principal the wallet deals with (a signer, a transfer recipient,
//! an asset contract, the wallet itself) is an [`Identity`]: an opaque
//! 32-byte handle with equality, ordering and hashing and nothing else.
//!
//! Account identities are derived from an Ed25519 public key via BLAKE3.
//! Wallet identities are derived by the factory from its instance id and a
//! creation nonce, so two wallets never share an address:
//!
//! ```text
//! public_key (32 bytes)            -> BLAKE3(public_key)
//! (domain, seed, nonce)            -> BLAKE3(domain || len(seed) || seed || nonce_be)
//! ```
//!
//! The text form is Bech32 with the `msig` prefix. The all-zero handle is
//! [`Identity::NULL`], the "address zero" sentinel that is never a valid
//! signer, recipient or asset.

use std::fmt;
use std::str::FromStr;

use bech32::{Bech32, Hrp};
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::ADDRESS_HRP;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while parsing an identity from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The string is not valid Bech32.
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    /// The decoded address carries a foreign human-readable prefix.
    #[error("invalid HRP: expected '{expected}', got '{got}'")]
    InvalidHrp {
        /// The expected HRP.
        expected: String,
        /// The HRP that was actually found.
        got: String,
    },

    /// The decoded payload is not 32 bytes.
    #[error("invalid address data length: expected 32 bytes, got {0}")]
    InvalidDataLength(usize),
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// An opaque, comparable principal handle.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity([u8; 32]);

impl Identity {
    /// The null sentinel ("address zero").
    pub const NULL: Identity = Identity([0u8; 32]);

    /// Wraps raw handle bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives an account identity from an Ed25519 verifying key.
    pub fn from_public_key(key: &VerifyingKey) -> Self {
        Self(*blake3::hash(key.as_bytes()).as_bytes())
    }

    /// Derives a deterministic identity from a domain tag, a seed and a
    /// nonce. Distinct `(domain, seed, nonce)` triples yield distinct
    /// handles with overwhelming probability.
    pub fn derive(domain: &str, seed: &[u8], nonce: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(domain.as_bytes());
        hasher.update(&(seed.len() as u64).to_be_bytes());
        hasher.update(seed);
        hasher.update(&nonce.to_be_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Returns `true` for the null sentinel.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Raw handle bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex encoding of the raw bytes, mostly for log lines.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bech32 text form (`msig1...`).
    pub fn to_address(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hrp = Hrp::parse(ADDRESS_HRP).map_err(|_| fmt::Error)?;
        let encoded = bech32::encode::<Bech32>(hrp, &self.0).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full addresses make assertion diffs unreadable.
        write!(f, "Identity({}..)", &self.to_hex()[..12])
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, data) =
            bech32::decode(s).map_err(|e| IdentityError::Bech32Decode(e.to_string()))?;

        let expected =
            Hrp::parse(ADDRESS_HRP).map_err(|e| IdentityError::Bech32Decode(e.to_string()))?;
        if hrp != expected {
            return Err(IdentityError::InvalidHrp {
                expected: ADDRESS_HRP.to_string(),
                got: hrp.to_string(),
            });
        }

        let bytes: [u8; 32] = data
            .as_slice()
            .try_into()
            .map_err(|_| IdentityError::InvalidDataLength(data.len()))?;

        Ok(Self(bytes))
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
