//! # Key Management
//!
//! Ed25519 keypairs for signer accounts. The wallet core never verifies
//! signatures itself (the hosting environment authenticates callers), but
//! operators still need real key material to mint signer identities, and
//! tests want realistic addresses rather than hand-rolled byte patterns.
//!
//! Key bytes are never logged. The `Debug` impl only prints the identity.

use ed25519_dalek::{SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use crate::identity::Identity;

/// Errors that can occur while loading key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or malformed hex")]
    InvalidSecretKey,
}

/// An Ed25519 signing keypair for a signer account.
///
/// Deliberately not `Serialize`: exporting secret material goes through
/// [`secret_key_hex`](Self::secret_key_hex) and nothing else.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic keypair from a 32-byte seed. Handy in tests and
    /// fixtures; use [`generate`](Self::generate) for real accounts.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// The public half.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// The account identity derived from the public key.
    pub fn identity(&self) -> Identity {
        Identity::from_public_key(&self.verifying_key())
    }

    /// Hex-encoded public key, 64 characters.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.verifying_key().to_bytes())
    }

    /// Hex-encoded secret key. Handle with care.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair(identity={})", self.identity())
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.verifying_key() == other.verifying_key()
    }
}

impl Eq for Keypair {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keypairs_are_distinct() {
        let a = Keypair::generate();
        let b = Keypair::generate();
        assert_ne!(a, b);
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn seed_is_deterministic() {
        let a = Keypair::from_seed(&[3u8; 32]);
        let b = Keypair::from_seed(&[3u8; 32]);
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a.public_key_hex(), b.public_key_hex());
    }

    #[test]
    fn hex_roundtrip() {
        let kp = Keypair::generate();
        let restored = Keypair::from_hex(&kp.secret_key_hex()).unwrap();
        assert_eq!(kp, restored);
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(Keypair::from_hex("zz").is_err());
        assert!(Keypair::from_hex("abcd").is_err());
    }

    #[test]
    fn identity_is_never_null() {
        assert!(!Keypair::generate().identity().is_null());
    }

    #[test]
    fn debug_hides_secret() {
        let kp = Keypair::from_seed(&[5u8; 32]);
        let debug = format!("{:?}", kp);
        assert!(!debug.contains(&kp.secret_key_hex()));
    }
}
