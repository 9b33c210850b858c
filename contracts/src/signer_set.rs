//! # Signer Set
//!
//! The identities allowed to propose and approve on a wallet, plus the
//! approval threshold. Membership is fixed at construction; only the quorum
//! can change afterwards, and only through an approved quorum-change
//! request routed by the wallet.
//!
//! Invariant, at all times: `1 < quorum <= |signers|`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use multisig_protocol::config::{quorum_in_bounds, MAX_SIGNERS};
use multisig_protocol::Identity;

use crate::error::MultisigError;

/// Wire form of a signer set. Deserialization goes through
/// [`SignerSet::new`], so a stored set can never bypass validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerSetConfig {
    pub quorum: usize,
    pub signers: Vec<Identity>,
}

/// Authorized signers and the current quorum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SignerSetConfig", into = "SignerSetConfig")]
pub struct SignerSet {
    /// Signers in the order they were supplied.
    signers: Vec<Identity>,
    /// Membership index for `is_signer`.
    index: HashSet<Identity>,
    quorum: usize,
}

impl SignerSet {
    /// Validates and builds a signer set.
    ///
    /// # Errors
    ///
    /// Returns [`MultisigError::InvalidConfig`] if `signers` is empty, holds
    /// the null identity or a duplicate, exceeds `MAX_SIGNERS`, or if
    /// `quorum` is outside `(1, |signers|]`.
    pub fn new(quorum: usize, signers: Vec<Identity>) -> Result<Self, MultisigError> {
        if signers.is_empty() {
            return Err(MultisigError::InvalidConfig("signer set is empty".into()));
        }
        if signers.len() > MAX_SIGNERS {
            return Err(MultisigError::InvalidConfig(format!(
                "{} signers exceeds the maximum of {}",
                signers.len(),
                MAX_SIGNERS
            )));
        }

        let mut index = HashSet::with_capacity(signers.len());
        for signer in &signers {
            if signer.is_null() {
                return Err(MultisigError::InvalidConfig(
                    "address zero is not a valid signer".into(),
                ));
            }
            if !index.insert(*signer) {
                return Err(MultisigError::InvalidConfig(format!(
                    "duplicate signer {}",
                    signer
                )));
            }
        }

        check_quorum(quorum, signers.len())?;

        Ok(Self {
            signers,
            index,
            quorum,
        })
    }

    /// Membership test.
    pub fn is_signer(&self, identity: &Identity) -> bool {
        self.index.contains(identity)
    }

    /// Current approval threshold.
    pub fn quorum(&self) -> usize {
        self.quorum
    }

    pub fn signers(&self) -> &[Identity] {
        &self.signers
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Checks whether `new_quorum` would be admissible without applying it.
    pub fn validate_quorum(&self, new_quorum: usize) -> Result<(), MultisigError> {
        check_quorum(new_quorum, self.signers.len())
    }

    /// Replaces the quorum after re-validating the invariant. On error the
    /// set is left exactly as it was.
    pub(crate) fn update_quorum(&mut self, new_quorum: usize) -> Result<(), MultisigError> {
        check_quorum(new_quorum, self.signers.len())?;
        self.quorum = new_quorum;
        Ok(())
    }
}

fn check_quorum(quorum: usize, signer_count: usize) -> Result<(), MultisigError> {
    if quorum_in_bounds(quorum, signer_count) {
        Ok(())
    } else {
        Err(MultisigError::InvalidConfig(format!(
            "quorum {} must satisfy 1 < quorum <= {}",
            quorum, signer_count
        )))
    }
}

impl TryFrom<SignerSetConfig> for SignerSet {
    type Error = MultisigError;

    fn try_from(config: SignerSetConfig) -> Result<Self, Self::Error> {
        SignerSet::new(config.quorum, config.signers)
    }
}

impl From<SignerSet> for SignerSetConfig {
    fn from(set: SignerSet) -> Self {
        SignerSetConfig {
            quorum: set.quorum,
            signers: set.signers,
        }
    }
}
