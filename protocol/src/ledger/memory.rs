//! In-memory balance book implementing [`Ledger`].
//!
//! Balances are kept per asset, per holder: `asset -> (holder -> amount)`.
//! All arithmetic is checked. A single `RwLock` guards the whole book, so a
//! transfer's debit and credit are applied under one write guard and no
//! reader ever observes a half-applied move.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use super::{Amount, Ledger, LedgerError};
use crate::identity::Identity;

/// Thread-safe, process-local ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    books: RwLock<HashMap<Identity, HashMap<Identity, Amount>>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits freshly issued units of `asset` to `to` and returns the new
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NullAddress`] for a null holder or asset and
    /// [`LedgerError::Overflow`] if the credit would exceed `u64::MAX`.
    pub fn mint(
        &self,
        asset: &Identity,
        to: &Identity,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        if asset.is_null() || to.is_null() {
            return Err(LedgerError::NullAddress);
        }

        let mut books = self.books.write();
        let balance = books.entry(*asset).or_default().entry(*to).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { amount })?;

        debug!(asset = %asset, holder = %to, amount, "minted");
        Ok(*balance)
    }

    /// Sum of all balances of `asset`.
    pub fn total_supply(&self, asset: &Identity) -> Amount {
        self.books
            .read()
            .get(asset)
            .map(|holders| holders.values().fold(0u64, |acc, v| acc.saturating_add(*v)))
            .unwrap_or(0)
    }

    /// Number of distinct holders with a balance entry for `asset`.
    pub fn holder_count(&self, asset: &Identity) -> usize {
        self.books.read().get(asset).map(HashMap::len).unwrap_or(0)
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, holder: &Identity, asset: &Identity) -> Amount {
        self.books
            .read()
            .get(asset)
            .and_then(|holders| holders.get(holder))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &self,
        from: &Identity,
        to: &Identity,
        asset: &Identity,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if from.is_null() || to.is_null() || asset.is_null() {
            return Err(LedgerError::NullAddress);
        }

        let mut books = self.books.write();
        let holders = books.entry(*asset).or_default();

        let available = holders.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let credited = holders
            .get(to)
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { amount })?;

        // Both sides validated; apply.
        holders.insert(*from, available - amount);
        holders.insert(*to, credited);

        debug!(asset = %asset, from = %from, to = %to, amount, "transferred");
        Ok(())
    }
}
