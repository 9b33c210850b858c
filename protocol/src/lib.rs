// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Multisig Protocol Shared Primitives
//!
//! The pieces every multisig wallet depends on but does not own:
//!
//! - **identity**: opaque 32-byte principal handles, Bech32 text form,
//!   and the null sentinel.
//! - **crypto**: Ed25519 key material for signer accounts.
//! - **ledger**: the external asset-ledger interface, plus an in-memory
//!   implementation for devnet and tests.
//! - **config**: protocol constants (quorum bounds, address prefix,
//!   default ports).

pub mod config;
pub mod crypto;
pub mod identity;
pub mod ledger;

pub use identity::{Identity, IdentityError};
pub use ledger::{Amount, InMemoryLedger, Ledger, LedgerError};
