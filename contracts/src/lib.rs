//! # Multisig Wallet Contracts
//!
//! The quorum-approval core. A wallet releases funds only after a quorum of
//! its designated signers has approved a specific transfer:
//!
//! - **Signer Set**: fixed membership plus a mutable approval threshold,
//!   with `1 < quorum <= |signers|` enforced on every change.
//! - **Transaction Log**: append-only, 1-based proposals with per-entry
//!   approval tallies.
//! - **Multisig Wallet**: the state machine: who may propose, who may
//!   approve, when a transfer executes, and when the quorum may change.
//! - **Factory**: deploys isolated wallet instances and keeps a registry
//!   for discovery.
//!
//! ## Design Principles
//!
//! 1. The caller identity is an explicit parameter of every operation.
//!    Authentication happens upstream; the core trusts what it is given.
//! 2. State transitions are explicit: enum variants, not boolean flags.
//! 3. Every call is all-or-nothing. Side effects on the ledger run before
//!    any approval state is written.
//! 4. Value types (entries, payloads, outcomes, snapshots and error kinds)
//!    are serializable (serde) for wire transport. The wallet, the factory
//!    and their handles are not.

pub mod error;
pub mod factory;
pub mod multisig;
pub mod signer_set;
pub mod transaction_log;

pub use error::{ErrorKind, MultisigError};
pub use factory::{MultisigFactory, WalletHandle};
pub use multisig::{ApprovalOutcome, ApprovalPolicy, LogKind, MultisigWallet, WalletSnapshot};
pub use signer_set::{SignerSet, SignerSetConfig};
pub use transaction_log::{
    Payload, QuorumPayload, Transaction, TransactionLog, TransferPayload, TxId, TxStatus,
};
