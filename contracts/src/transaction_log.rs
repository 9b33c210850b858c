//! # Transaction Log
//!
//! Append-only record of proposals. Each entry carries its own approval
//! tally and lifecycle status; entries are never removed and ids are never
//! reused. A wallet keeps two independent logs, one for asset transfers and
//! one for quorum-change requests, each with its own 1-based counter.
//!
//! The log enforces only structural rules (the id exists, the entry is not
//! completed, an approver appears once). Authorization, funding and quorum
//! evaluation belong to the wallet.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use multisig_protocol::{Amount, Identity};

use crate::error::MultisigError;

/// Sequential, 1-based entry id.
pub type TxId = u64;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Move `amount` of `asset` from the wallet to `recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
    pub amount: Amount,
    pub recipient: Identity,
    pub asset: Identity,
}

/// Replace the wallet quorum with `new_quorum`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumPayload {
    pub new_quorum: usize,
}

/// What an entry does once it reaches quorum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Transfer(TransferPayload),
    QuorumChange(QuorumPayload),
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Lifecycle of an entry. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Collecting approvals.
    Proposed,
    /// Reached quorum and executed.
    Completed,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::Proposed => write!(f, "Proposed"),
            TxStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A single proposal and its approval tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    /// Signer who created the entry.
    pub proposer: Identity,
    pub payload: Payload,
    /// Distinct signers who approved this entry.
    approvals: BTreeSet<Identity>,
    status: TxStatus,
    pub proposed_at: DateTime<Utc>,
    /// Set exactly once, on the Proposed -> Completed transition.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Number of recorded approvals. Always equal to `approvals().len()`.
    pub fn no_of_approvals(&self) -> usize {
        self.approvals.len()
    }

    pub fn approvals(&self) -> &BTreeSet<Identity> {
        &self.approvals
    }

    pub fn has_approved(&self, identity: &Identity) -> bool {
        self.approvals.contains(identity)
    }

    pub fn status(&self) -> TxStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == TxStatus::Completed
    }

    /// The transfer payload, if this entry is an asset transfer.
    pub fn transfer(&self) -> Option<&TransferPayload> {
        match &self.payload {
            Payload::Transfer(transfer) => Some(transfer),
            Payload::QuorumChange(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionLog
// ---------------------------------------------------------------------------

/// Append-only, sequentially numbered entry store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionLog {
    /// Entry with id `n` lives at index `n - 1`.
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new Proposed entry with no approvals and returns its id.
    pub fn append(&mut self, proposer: Identity, payload: Payload) -> TxId {
        let id = self.entries.len() as TxId + 1;
        self.entries.push(Transaction {
            id,
            proposer,
            payload,
            approvals: BTreeSet::new(),
            status: TxStatus::Proposed,
            proposed_at: Utc::now(),
            completed_at: None,
        });
        id
    }

    /// Number of entries ever appended; also the highest valid id.
    pub fn tx_count(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Returns `true` if `id` is in `(0, tx_count]`.
    pub fn contains(&self, id: TxId) -> bool {
        id >= 1 && id <= self.tx_count()
    }

    /// Looks up an entry.
    ///
    /// # Errors
    ///
    /// Returns [`MultisigError::NotFound`] for an id outside the log.
    pub fn get(&self, id: TxId) -> Result<&Transaction, MultisigError> {
        self.index_of(id)
            .map(|idx| &self.entries[idx])
            .ok_or_else(|| MultisigError::NotFound(format!("transaction {}", id)))
    }

    /// Adds `approver` to the entry's approvals and returns the new tally.
    ///
    /// # Errors
    ///
    /// [`MultisigError::NotFound`] for an unknown id,
    /// [`MultisigError::Conflict`] if the entry is completed or `approver`
    /// already approved it.
    pub fn record_approval(
        &mut self,
        id: TxId,
        approver: Identity,
    ) -> Result<usize, MultisigError> {
        let entry = self.get_mut(id)?;
        if entry.is_completed() {
            return Err(MultisigError::Conflict("transaction already completed"));
        }
        if !entry.approvals.insert(approver) {
            return Err(MultisigError::Conflict("can't sign twice"));
        }
        Ok(entry.approvals.len())
    }

    /// Transitions an entry from Proposed to Completed.
    ///
    /// # Errors
    ///
    /// [`MultisigError::NotFound`] for an unknown id,
    /// [`MultisigError::Conflict`] if it already completed.
    pub fn mark_completed(&mut self, id: TxId) -> Result<(), MultisigError> {
        let entry = self.get_mut(id)?;
        if entry.is_completed() {
            return Err(MultisigError::Conflict("transaction already completed"));
        }
        entry.status = TxStatus::Completed;
        entry.completed_at = Some(Utc::now());
        Ok(())
    }

    /// All entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Entries still collecting approvals.
    pub fn pending(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().filter(|tx| !tx.is_completed())
    }

    fn get_mut(&mut self, id: TxId) -> Result<&mut Transaction, MultisigError> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| MultisigError::NotFound(format!("transaction {}", id)))?;
        Ok(&mut self.entries[idx])
    }

    fn index_of(&self, id: TxId) -> Option<usize> {
        if self.contains(id) {
            Some((id - 1) as usize)
        } else {
            None
        }
    }
}
