//! # Wallet Errors
//!
//! One error type for the whole approval core. Every precondition failure
//! maps to exactly one variant, and every variant maps to a stable
//! [`ErrorKind`] that automated callers can branch on without parsing
//! messages. No variant is ever retried inside the core.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use multisig_protocol::{Amount, LedgerError};

/// Errors raised by signer sets, transaction logs, wallets and factories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultisigError {
    /// A construction or quorum-update invariant would be violated.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The caller is not a signer of this wallet.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Zero amount, null address or an id outside the log.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Double signing, or acting on an already-completed entry.
    #[error("conflict: {0}")]
    Conflict(&'static str),

    /// The wallet's ledger balance cannot cover the transfer.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Wallet balance of the asset at check time.
        balance: Amount,
        /// Amount the transaction would move.
        requested: Amount,
    },

    /// Lookup of an unknown entry id.
    #[error("not found: {0}")]
    NotFound(String),

    /// The ledger refused the transfer at execution time.
    #[error("ledger transfer failed: {0}")]
    Ledger(LedgerError),
}

impl MultisigError {
    /// The stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MultisigError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            MultisigError::Unauthorized(_) => ErrorKind::Unauthorized,
            MultisigError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            MultisigError::Conflict(_) => ErrorKind::Conflict,
            MultisigError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            MultisigError::NotFound(_) => ErrorKind::NotFound,
            MultisigError::Ledger(_) => ErrorKind::LedgerFailure,
        }
    }
}

impl From<LedgerError> for MultisigError {
    fn from(err: LedgerError) -> Self {
        match err {
            // An overdraw surfaced by the ledger itself is still the
            // caller-facing insufficient-funds condition.
            LedgerError::InsufficientBalance {
                available,
                requested,
            } => MultisigError::InsufficientFunds {
                balance: available,
                requested,
            },
            other => MultisigError::Ledger(other),
        }
    }
}

/// Stable, machine-readable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidConfig,
    Unauthorized,
    InvalidArgument,
    Conflict,
    InsufficientFunds,
    NotFound,
    LedgerFailure,
}

impl ErrorKind {
    /// Snake-case name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidConfig => "invalid_config",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InsufficientFunds => "insufficient_funds",
            ErrorKind::NotFound => "not_found",
            ErrorKind::LedgerFailure => "ledger_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_distinct_kind() {
        let errors = [
            MultisigError::InvalidConfig("x".into()),
            MultisigError::Unauthorized("x"),
            MultisigError::InvalidArgument("x"),
            MultisigError::Conflict("x"),
            MultisigError::InsufficientFunds {
                balance: 0,
                requested: 1,
            },
            MultisigError::NotFound("x".into()),
            MultisigError::Ledger(LedgerError::NullAddress),
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InsufficientFunds).unwrap();
        assert_eq!(json, "\"insufficient_funds\"");
        assert_eq!(ErrorKind::InsufficientFunds.as_str(), "insufficient_funds");
    }

    #[test]
    fn ledger_overdraw_maps_to_insufficient_funds() {
        let err: MultisigError = LedgerError::InsufficientBalance {
            available: 5,
            requested: 9,
        }
        .into();
        assert_eq!(
            err,
            MultisigError::InsufficientFunds {
                balance: 5,
                requested: 9
            }
        );
    }

    #[test]
    fn messages_carry_the_reason() {
        let err = MultisigError::Conflict("can't sign twice");
        assert_eq!(err.to_string(), "conflict: can't sign twice");
    }
}
