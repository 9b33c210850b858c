//! # Key Material
//!
//! Thin wrapper over `ed25519-dalek` for signer account keys. Nothing here
//! signs or verifies on behalf of the wallet; authentication belongs to the
//! hosting environment.

pub mod keys;

pub use keys::{KeyError, Keypair};
