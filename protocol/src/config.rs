//! # Protocol Configuration & Constants
//!
//! Every magic number the wallet relies on lives here. The quorum bounds in
//! particular are part of the wallet's invariants, so changing them is a
//! compatibility break for every deployed instance.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Crate-level protocol version reported by the node.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Bech32 human-readable prefix for every identity.
pub const ADDRESS_HRP: &str = "msig";

/// Domain tag mixed into wallet address derivation so wallet handles can
/// never collide with key-derived account handles.
pub const WALLET_ADDRESS_DOMAIN: &str = "multisig/wallet/v1";

// ---------------------------------------------------------------------------
// Quorum Bounds
// ---------------------------------------------------------------------------

/// Smallest admissible quorum. A quorum of one is a single-signer wallet
/// with extra steps, so it is rejected: `1 < quorum <= |signers|`.
pub const MIN_QUORUM: usize = 2;

/// Upper bound on the signer set size. Keeps per-approval work bounded.
pub const MAX_SIGNERS: usize = 64;

// ---------------------------------------------------------------------------
// Node Defaults
// ---------------------------------------------------------------------------

/// Default REST API port.
pub const DEFAULT_RPC_PORT: u16 = 9841;

/// Default Prometheus metrics port.
pub const DEFAULT_METRICS_PORT: u16 = 9842;

/// Returns `true` if `quorum` is admissible for a set of `signer_count`
/// signers.
pub fn quorum_in_bounds(quorum: usize, signer_count: usize) -> bool {
    quorum >= MIN_QUORUM && quorum <= signer_count
}
