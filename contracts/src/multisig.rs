//! # Multisig Wallet
//!
//! The approval state machine. A wallet holds funds on an external ledger
//! and moves them only once a quorum of its signers has approved a specific
//! transfer. The same machinery, on a separate log, governs changes to the
//! quorum itself.
//!
//! ## Lifecycle of an entry
//!
//! ```text
//!   propose ──► Proposed ──approve──► … ──approve (tally reaches quorum)──► Completed
//! ```
//!
//! `Completed` is terminal. There is no cancellation or expiry; an entry
//! that never gathers enough approvals stays `Proposed` forever.
//!
//! ## Atomicity
//!
//! Every call either applies fully or leaves the wallet untouched. On the
//! approval that reaches quorum the side effect (ledger transfer or quorum
//! update) runs first; only if it succeeds are the approval and the
//! completion recorded. A refused transfer therefore leaves the entry
//! exactly as it was before the call.
//!
//! ## Concurrency
//!
//! A wallet is single-writer. Callers serialize through the
//! [`WalletHandle`](crate::factory::WalletHandle) lock; nothing in here
//! suspends halfway through a call.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use multisig_protocol::{Amount, Identity, Ledger};

use crate::error::MultisigError;
use crate::signer_set::SignerSet;
use crate::transaction_log::{
    Payload, QuorumPayload, Transaction, TransactionLog, TransferPayload, TxId,
};

// ---------------------------------------------------------------------------
// Policy & outcomes
// ---------------------------------------------------------------------------

/// Per-wallet approval policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    /// When set, proposing an entry also records the proposer's approval.
    /// Off by default: quorum counts explicit `approve` calls only.
    #[serde(default)]
    pub proposer_approves: bool,
}

/// Which of the wallet's two logs an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Transfer,
    QuorumChange,
}

/// Result of a successful approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    pub kind: LogKind,
    pub id: TxId,
    /// Tally after this call.
    pub approvals: usize,
    /// Quorum the tally was measured against.
    pub quorum: usize,
    /// `true` if this approval executed the entry.
    pub executed: bool,
}

/// Serializable read-only view of a wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: Identity,
    pub signers: Vec<Identity>,
    pub quorum: usize,
    pub policy: ApprovalPolicy,
    pub tx_count: u64,
    pub pending_transactions: usize,
    pub quorum_change_count: u64,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// MultisigWallet
// ---------------------------------------------------------------------------

/// A single wallet instance: signer set, two logs, and a handle to the
/// ledger that holds its funds.
pub struct MultisigWallet {
    address: Identity,
    signers: SignerSet,
    transfers: TransactionLog,
    quorum_changes: TransactionLog,
    policy: ApprovalPolicy,
    ledger: Arc<dyn Ledger>,
    created_at: DateTime<Utc>,
}

impl MultisigWallet {
    /// Builds a wallet at `address` with the given signers and quorum.
    ///
    /// # Errors
    ///
    /// Returns [`MultisigError::InvalidConfig`] if `address` is null or the
    /// signer set fails validation (see [`SignerSet::new`]).
    pub fn new(
        address: Identity,
        quorum: usize,
        signers: Vec<Identity>,
        ledger: Arc<dyn Ledger>,
        policy: ApprovalPolicy,
    ) -> Result<Self, MultisigError> {
        if address.is_null() {
            return Err(MultisigError::InvalidConfig(
                "wallet address must not be address zero".into(),
            ));
        }
        let signers = SignerSet::new(quorum, signers)?;

        Ok(Self {
            address,
            signers,
            transfers: TransactionLog::new(),
            quorum_changes: TransactionLog::new(),
            policy,
            ledger,
            created_at: Utc::now(),
        })
    }

    // -- Proposals ----------------------------------------------------------

    /// Proposes moving `amount` of `asset` to `recipient` and returns the
    /// new transaction id.
    ///
    /// Funds are not checked here; sufficiency is verified on every
    /// approval.
    ///
    /// # Errors
    ///
    /// In order: [`MultisigError::Unauthorized`] if `caller` is not a
    /// signer, then [`MultisigError::InvalidArgument`] for a zero amount, a
    /// null recipient or a null asset.
    pub fn propose(
        &mut self,
        caller: &Identity,
        amount: Amount,
        recipient: Identity,
        asset: Identity,
    ) -> Result<TxId, MultisigError> {
        if !self.signers.is_signer(caller) {
            return Err(MultisigError::Unauthorized("invalid signer"));
        }
        if amount == 0 {
            return Err(MultisigError::InvalidArgument("can't send zero amount"));
        }
        if recipient.is_null() || asset.is_null() {
            return Err(MultisigError::InvalidArgument("address zero found"));
        }

        let payload = Payload::Transfer(TransferPayload {
            amount,
            recipient,
            asset,
        });
        let id = self.append(LogKind::Transfer, *caller, payload);

        debug!(
            wallet = %self.address,
            id,
            proposer = %caller,
            amount,
            recipient = %recipient,
            asset = %asset,
            "transfer proposed"
        );
        Ok(id)
    }

    /// Proposes replacing the quorum with `new_quorum` and returns the
    /// request id (independent of transfer ids).
    ///
    /// # Errors
    ///
    /// [`MultisigError::Unauthorized`] if `caller` is not a signer,
    /// [`MultisigError::InvalidConfig`] if `new_quorum` is outside
    /// `(1, |signers|]`.
    pub fn propose_quorum_change(
        &mut self,
        caller: &Identity,
        new_quorum: usize,
    ) -> Result<TxId, MultisigError> {
        if !self.signers.is_signer(caller) {
            return Err(MultisigError::Unauthorized("invalid signer"));
        }
        self.signers.validate_quorum(new_quorum)?;

        let payload = Payload::QuorumChange(QuorumPayload { new_quorum });
        let id = self.append(LogKind::QuorumChange, *caller, payload);

        debug!(
            wallet = %self.address,
            id,
            proposer = %caller,
            new_quorum,
            "quorum change proposed"
        );
        Ok(id)
    }

    // -- Approvals ----------------------------------------------------------

    /// Approves transfer `id`. Executes the transfer if this approval brings
    /// the tally to the current quorum.
    ///
    /// # Errors
    ///
    /// Checked in order:
    /// 1. [`MultisigError::InvalidArgument`]: `id` outside `(0, tx_count]`
    /// 2. [`MultisigError::Conflict`]: already completed
    /// 3. [`MultisigError::Unauthorized`]: `caller` is not a signer
    /// 4. [`MultisigError::Conflict`]: `caller` already approved
    /// 5. [`MultisigError::InsufficientFunds`]: wallet balance below amount
    ///
    /// A ledger refusal at execution surfaces as
    /// [`MultisigError::InsufficientFunds`] or [`MultisigError::Ledger`].
    pub fn approve(
        &mut self,
        caller: &Identity,
        id: TxId,
    ) -> Result<ApprovalOutcome, MultisigError> {
        self.approve_entry(LogKind::Transfer, caller, id)
    }

    /// Approves quorum-change request `id`. Applies the new quorum if this
    /// approval brings the tally to the current quorum.
    ///
    /// # Errors
    ///
    /// Same order as [`approve`](Self::approve), steps 1–4.
    pub fn approve_quorum_change(
        &mut self,
        caller: &Identity,
        id: TxId,
    ) -> Result<ApprovalOutcome, MultisigError> {
        self.approve_entry(LogKind::QuorumChange, caller, id)
    }

    fn approve_entry(
        &mut self,
        kind: LogKind,
        caller: &Identity,
        id: TxId,
    ) -> Result<ApprovalOutcome, MultisigError> {
        let log = self.log(kind);
        if !log.contains(id) {
            return Err(MultisigError::InvalidArgument("invalid tx id"));
        }
        let entry = log.get(id)?;
        if entry.is_completed() {
            return Err(MultisigError::Conflict("transaction already completed"));
        }
        if !self.signers.is_signer(caller) {
            return Err(MultisigError::Unauthorized("not a valid signer"));
        }
        if entry.has_approved(caller) {
            return Err(MultisigError::Conflict("can't sign twice"));
        }
        if let Payload::Transfer(transfer) = &entry.payload {
            let balance = self.ledger.balance_of(&self.address, &transfer.asset);
            if balance < transfer.amount {
                return Err(MultisigError::InsufficientFunds {
                    balance,
                    requested: transfer.amount,
                });
            }
        }

        let quorum = self.signers.quorum();
        let prior = entry.no_of_approvals();
        // After a quorum reduction an entry can already hold `quorum` or more
        // approvals. It executes on the next call without taking another
        // approval, so no approval is ever recorded past the quorum.
        let records = prior < quorum;
        let approvals = if records { prior + 1 } else { prior };
        let executed = approvals >= quorum;

        if executed {
            let payload = entry.payload.clone();
            self.on_quorum_reached(kind, id, &payload)?;
        }

        let log = self.log_mut(kind);
        if records {
            log.record_approval(id, *caller)?;
        }
        if executed {
            log.mark_completed(id)?;
        }

        debug!(
            wallet = %self.address,
            ?kind,
            id,
            approver = %caller,
            approvals,
            quorum,
            executed,
            "approval recorded"
        );

        Ok(ApprovalOutcome {
            kind,
            id,
            approvals,
            quorum,
            executed,
        })
    }

    /// Executes an entry's payload. Called exactly once per entry, before
    /// any approval state is written, so a failure here aborts the call.
    fn on_quorum_reached(
        &mut self,
        kind: LogKind,
        id: TxId,
        payload: &Payload,
    ) -> Result<(), MultisigError> {
        match payload {
            Payload::Transfer(transfer) => {
                self.ledger
                    .transfer(
                        &self.address,
                        &transfer.recipient,
                        &transfer.asset,
                        transfer.amount,
                    )
                    .map_err(|err| {
                        warn!(
                            wallet = %self.address,
                            id,
                            error = %err,
                            "ledger refused transfer at execution"
                        );
                        MultisigError::from(err)
                    })?;

                info!(
                    wallet = %self.address,
                    id,
                    amount = transfer.amount,
                    recipient = %transfer.recipient,
                    asset = %transfer.asset,
                    "transfer executed"
                );
            }
            Payload::QuorumChange(change) => {
                let previous = self.signers.quorum();
                self.signers.update_quorum(change.new_quorum)?;

                info!(
                    wallet = %self.address,
                    ?kind,
                    id,
                    previous,
                    quorum = change.new_quorum,
                    "quorum updated"
                );
            }
        }
        Ok(())
    }

    fn append(&mut self, kind: LogKind, proposer: Identity, payload: Payload) -> TxId {
        let proposer_approves = self.policy.proposer_approves;
        let log = self.log_mut(kind);
        let id = log.append(proposer, payload);
        if proposer_approves {
            // A fresh entry has no approvals and cannot be completed, and
            // MIN_QUORUM > 1 means one approval never executes it.
            let _ = log.record_approval(id, proposer);
        }
        id
    }

    fn log(&self, kind: LogKind) -> &TransactionLog {
        match kind {
            LogKind::Transfer => &self.transfers,
            LogKind::QuorumChange => &self.quorum_changes,
        }
    }

    fn log_mut(&mut self, kind: LogKind) -> &mut TransactionLog {
        match kind {
            LogKind::Transfer => &mut self.transfers,
            LogKind::QuorumChange => &mut self.quorum_changes,
        }
    }

    // -- Queries ------------------------------------------------------------

    /// The wallet's own identity on the ledger.
    pub fn address(&self) -> Identity {
        self.address
    }

    /// Number of transfers ever proposed.
    pub fn tx_count(&self) -> u64 {
        self.transfers.tx_count()
    }

    /// Looks up a transfer.
    pub fn transaction(&self, id: TxId) -> Result<&Transaction, MultisigError> {
        self.transfers.get(id)
    }

    /// Number of quorum-change requests ever proposed.
    pub fn quorum_change_count(&self) -> u64 {
        self.quorum_changes.tx_count()
    }

    /// Looks up a quorum-change request.
    pub fn quorum_change(&self, id: TxId) -> Result<&Transaction, MultisigError> {
        self.quorum_changes.get(id)
    }

    pub fn is_signer(&self, identity: &Identity) -> bool {
        self.signers.is_signer(identity)
    }

    pub fn current_quorum(&self) -> usize {
        self.signers.quorum()
    }

    pub fn signers(&self) -> &SignerSet {
        &self.signers
    }

    pub fn policy(&self) -> ApprovalPolicy {
        self.policy
    }

    /// Ledger balance of `asset` held by this wallet.
    pub fn balance_of(&self, asset: &Identity) -> Amount {
        self.ledger.balance_of(&self.address, asset)
    }

    /// Transfers still collecting approvals, in id order.
    pub fn pending_transactions(&self) -> Vec<&Transaction> {
        self.transfers.pending().collect()
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            address: self.address,
            signers: self.signers.signers().to_vec(),
            quorum: self.signers.quorum(),
            policy: self.policy,
            tx_count: self.transfers.tx_count(),
            pending_transactions: self.transfers.pending().count(),
            quorum_change_count: self.quorum_changes.tx_count(),
            created_at: self.created_at,
        }
    }
}

impl fmt::Debug for MultisigWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultisigWallet")
            .field("address", &self.address)
            .field("quorum", &self.signers.quorum())
            .field("signers", &self.signers.len())
            .field("tx_count", &self.transfers.tx_count())
            .field("quorum_change_count", &self.quorum_changes.tx_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multisig_protocol::InMemoryLedger;

    fn id(b: u8) -> Identity {
        Identity::from_bytes([b; 32])
    }

    const WALLET: u8 = 100;
    const ASSET: u8 = 200;
    const RECIPIENT: u8 = 50;

    fn wallet_with(
        quorum: usize,
        signers: u8,
        funds: Amount,
        policy: ApprovalPolicy,
    ) -> (MultisigWallet, Arc<InMemoryLedger>) {
        let ledger = Arc::new(InMemoryLedger::new());
        if funds > 0 {
            ledger.mint(&id(ASSET), &id(WALLET), funds).unwrap();
        }
        let signers = (1..=signers).map(id).collect();
        let wallet =
            MultisigWallet::new(id(WALLET), quorum, signers, ledger.clone(), policy).unwrap();
        (wallet, ledger)
    }

    fn wallet(quorum: usize, signers: u8, funds: Amount) -> (MultisigWallet, Arc<InMemoryLedger>) {
        wallet_with(quorum, signers, funds, ApprovalPolicy::default())
    }

    #[test]
    fn null_wallet_address_rejected() {
        let ledger = Arc::new(InMemoryLedger::new());
        let err = MultisigWallet::new(
            Identity::NULL,
            2,
            vec![id(1), id(2)],
            ledger,
            ApprovalPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MultisigError::InvalidConfig(_)));
    }

    #[test]
    fn propose_precondition_order() {
        let (mut w, _) = wallet(2, 3, 0);
        // Non-signer wins over every argument error.
        assert_eq!(
            w.propose(&id(9), 0, Identity::NULL, Identity::NULL),
            Err(MultisigError::Unauthorized("invalid signer"))
        );
        assert_eq!(
            w.propose(&id(1), 0, Identity::NULL, Identity::NULL),
            Err(MultisigError::InvalidArgument("can't send zero amount"))
        );
        assert_eq!(
            w.propose(&id(1), 5, Identity::NULL, id(ASSET)),
            Err(MultisigError::InvalidArgument("address zero found"))
        );
        assert_eq!(
            w.propose(&id(1), 5, id(RECIPIENT), Identity::NULL),
            Err(MultisigError::InvalidArgument("address zero found"))
        );
        assert_eq!(w.tx_count(), 0);
    }

    #[test]
    fn propose_does_not_check_funds_or_approve() {
        let (mut w, _) = wallet(2, 3, 0);
        let tx_id = w.propose(&id(1), 1_000, id(RECIPIENT), id(ASSET)).unwrap();
        assert_eq!(tx_id, 1);
        assert_eq!(w.transaction(tx_id).unwrap().no_of_approvals(), 0);
    }

    #[test]
    fn approve_precondition_order() {
        let (mut w, _) = wallet(2, 3, 0);
        assert_eq!(
            w.approve(&id(9), 0),
            Err(MultisigError::InvalidArgument("invalid tx id"))
        );
        let tx_id = w.propose(&id(1), 10, id(RECIPIENT), id(ASSET)).unwrap();
        assert_eq!(
            w.approve(&id(9), tx_id + 1),
            Err(MultisigError::InvalidArgument("invalid tx id"))
        );
        assert_eq!(
            w.approve(&id(9), tx_id),
            Err(MultisigError::Unauthorized("not a valid signer"))
        );
        // Unfunded wallet: the signer check passes, funds check fails.
        assert_eq!(
            w.approve(&id(2), tx_id),
            Err(MultisigError::InsufficientFunds {
                balance: 0,
                requested: 10
            })
        );
        assert_eq!(w.transaction(tx_id).unwrap().no_of_approvals(), 0);
    }

    #[test]
    fn double_sign_checked_before_funds() {
        let (mut w, ledger) = wallet(3, 3, 10);
        let tx_id = w.propose(&id(1), 10, id(RECIPIENT), id(ASSET)).unwrap();
        w.approve(&id(2), tx_id).unwrap();
        ledger
            .transfer(&id(WALLET), &id(77), &id(ASSET), 10)
            .unwrap();
        assert_eq!(
            w.approve(&id(2), tx_id),
            Err(MultisigError::Conflict("can't sign twice"))
        );
    }

    #[test]
    fn reaching_quorum_executes_once() {
        let (mut w, ledger) = wallet(2, 3, 100);
        let tx_id = w.propose(&id(1), 60, id(RECIPIENT), id(ASSET)).unwrap();

        let first = w.approve(&id(1), tx_id).unwrap();
        assert!(!first.executed);
        assert_eq!(first.approvals, 1);

        let second = w.approve(&id(3), tx_id).unwrap();
        assert!(second.executed);
        assert_eq!(second.approvals, 2);
        assert_eq!(second.quorum, 2);

        assert!(w.transaction(tx_id).unwrap().is_completed());
        assert_eq!(ledger.balance_of(&id(RECIPIENT), &id(ASSET)), 60);
        assert_eq!(w.balance_of(&id(ASSET)), 40);

        assert_eq!(
            w.approve(&id(2), tx_id),
            Err(MultisigError::Conflict("transaction already completed"))
        );
        assert_eq!(ledger.balance_of(&id(RECIPIENT), &id(ASSET)), 60);
    }

    /// Ledger that reports a healthy balance but refuses every transfer.
    struct RefusingLedger;

    impl Ledger for RefusingLedger {
        fn balance_of(&self, _holder: &Identity, _asset: &Identity) -> Amount {
            u64::MAX
        }

        fn transfer(
            &self,
            _from: &Identity,
            _to: &Identity,
            _asset: &Identity,
            amount: Amount,
        ) -> Result<(), multisig_protocol::LedgerError> {
            Err(multisig_protocol::LedgerError::Overflow { amount })
        }
    }

    #[test]
    fn failed_execution_leaves_entry_untouched() {
        let mut w = MultisigWallet::new(
            id(WALLET),
            2,
            vec![id(1), id(2)],
            Arc::new(RefusingLedger),
            ApprovalPolicy::default(),
        )
        .unwrap();
        let tx_id = w.propose(&id(1), 5, id(RECIPIENT), id(ASSET)).unwrap();
        w.approve(&id(1), tx_id).unwrap();

        let err = w.approve(&id(2), tx_id).unwrap_err();
        assert!(matches!(err, MultisigError::Ledger(_)));

        let tx = w.transaction(tx_id).unwrap();
        assert!(!tx.is_completed());
        assert_eq!(tx.no_of_approvals(), 1);
        assert!(!tx.has_approved(&id(2)));
    }

    #[test]
    fn proposer_approval_policy() {
        let policy = ApprovalPolicy {
            proposer_approves: true,
        };
        let (mut w, ledger) = wallet_with(2, 3, 100, policy);
        let tx_id = w.propose(&id(1), 30, id(RECIPIENT), id(ASSET)).unwrap();
        assert!(w.transaction(tx_id).unwrap().has_approved(&id(1)));
        assert_eq!(
            w.approve(&id(1), tx_id),
            Err(MultisigError::Conflict("can't sign twice"))
        );
        assert!(w.approve(&id(2), tx_id).unwrap().executed);
        assert_eq!(ledger.balance_of(&id(RECIPIENT), &id(ASSET)), 30);
    }

    #[test]
    fn quorum_change_rejects_out_of_range_values() {
        let (mut w, _) = wallet(2, 3, 0);
        assert!(matches!(
            w.propose_quorum_change(&id(1), 1),
            Err(MultisigError::InvalidConfig(_))
        ));
        assert!(matches!(
            w.propose_quorum_change(&id(1), 4),
            Err(MultisigError::InvalidConfig(_))
        ));
        assert_eq!(
            w.propose_quorum_change(&id(9), 3),
            Err(MultisigError::Unauthorized("invalid signer"))
        );
        assert_eq!(w.quorum_change_count(), 0);
    }

    #[test]
    fn quorum_change_has_its_own_id_space() {
        let (mut w, _) = wallet(2, 3, 0);
        let tx_id = w.propose(&id(1), 10, id(RECIPIENT), id(ASSET)).unwrap();
        let qc_id = w.propose_quorum_change(&id(1), 3).unwrap();
        assert_eq!(tx_id, 1);
        assert_eq!(qc_id, 1);
        assert_eq!(w.tx_count(), 1);
        assert_eq!(w.quorum_change_count(), 1);
        // Transfer id 2 does not exist even though two proposals were made.
        assert_eq!(
            w.approve(&id(1), 2),
            Err(MultisigError::InvalidArgument("invalid tx id"))
        );
    }

    #[test]
    fn quorum_change_needs_no_funds() {
        let (mut w, _) = wallet(2, 3, 0);
        let qc_id = w.propose_quorum_change(&id(1), 3).unwrap();
        w.approve_quorum_change(&id(1), qc_id).unwrap();
        let outcome = w.approve_quorum_change(&id(2), qc_id).unwrap();
        assert!(outcome.executed);
        assert_eq!(outcome.kind, LogKind::QuorumChange);
        assert_eq!(w.current_quorum(), 3);
        assert!(w.quorum_change(qc_id).unwrap().is_completed());
    }

    #[test]
    fn reduced_quorum_executes_stale_entry_on_next_approval() {
        let (mut w, ledger) = wallet(3, 3, 100);
        let tx_id = w.propose(&id(1), 10, id(RECIPIENT), id(ASSET)).unwrap();
        w.approve(&id(1), tx_id).unwrap();
        w.approve(&id(2), tx_id).unwrap();

        let qc_id = w.propose_quorum_change(&id(1), 2).unwrap();
        for signer in 1..=3 {
            w.approve_quorum_change(&id(signer), qc_id).unwrap();
        }
        assert_eq!(w.current_quorum(), 2);

        // Two approvals already recorded; the entry stays pending until
        // the next approval arrives, which executes without being counted.
        assert!(!w.transaction(tx_id).unwrap().is_completed());
        let outcome = w.approve(&id(3), tx_id).unwrap();
        assert!(outcome.executed);
        assert_eq!(outcome.approvals, 2);
        assert_eq!(outcome.quorum, 2);

        let tx = w.transaction(tx_id).unwrap();
        assert!(tx.is_completed());
        assert_eq!(tx.no_of_approvals(), 2);
        assert!(!tx.has_approved(&id(3)));
        assert_eq!(ledger.balance_of(&id(RECIPIENT), &id(ASSET)), 10);
    }

    #[test]
    fn snapshot_reflects_state() {
        let (mut w, _) = wallet(2, 3, 0);
        w.propose(&id(1), 10, id(RECIPIENT), id(ASSET)).unwrap();
        w.propose_quorum_change(&id(2), 3).unwrap();
        let snap = w.snapshot();
        assert_eq!(snap.address, id(WALLET));
        assert_eq!(snap.signers.len(), 3);
        assert_eq!(snap.quorum, 2);
        assert_eq!(snap.tx_count, 1);
        assert_eq!(snap.pending_transactions, 1);
        assert_eq!(snap.quorum_change_count, 1);
        assert_eq!(w.pending_transactions().len(), 1);
    }
}
