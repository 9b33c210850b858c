//! # Ledger Interface
//!
//! The wallet does not keep books. Balances live in an external ledger (an
//! asset contract, a chain's state tree, a custodian's database) that the
//! wallet talks to through the [`Ledger`] trait:
//!
//! ```text
//! balance_of(holder, asset)            -> amount
//! transfer(from, to, asset, amount)    -> Ok(()) | LedgerError
//! ```
//!
//! Methods take `&self`: a ledger is shared by every wallet a factory
//! creates, so implementations synchronize internally.
//!
//! [`InMemoryLedger`] is the reference implementation used by the node's
//! devnet mode and by the test suites.

pub mod memory;

use thiserror::Error;

use crate::identity::Identity;

pub use memory::InMemoryLedger;

/// Amounts are `u64` in the asset's smallest unit. No floating point.
pub type Amount = u64;

/// Errors a ledger can report back to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The source holder cannot cover the transfer.
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Balance held by the source.
        available: Amount,
        /// Amount the caller tried to move.
        requested: Amount,
    },

    /// Crediting the destination would overflow `u64`.
    #[error("balance overflow: credit of {amount} would exceed u64::MAX")]
    Overflow {
        /// The amount that caused the overflow.
        amount: Amount,
    },

    /// One of the parties or the asset is the null identity.
    #[error("null address in ledger operation")]
    NullAddress,
}

/// The external asset-ledger primitive the wallet core depends on.
pub trait Ledger: Send + Sync {
    /// Balance of `asset` held by `holder`. Unknown holders hold zero.
    fn balance_of(&self, holder: &Identity, asset: &Identity) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`, all or nothing.
    fn transfer(
        &self,
        from: &Identity,
        to: &Identity,
        asset: &Identity,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}
