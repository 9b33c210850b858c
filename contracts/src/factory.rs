//! # Wallet Factory
//!
//! Deploys independent [`MultisigWallet`] instances and keeps a registry of
//! everything it created, in creation order, for discovery. The factory
//! takes no part in approvals: once a wallet exists, callers talk to it
//! through its [`WalletHandle`].
//!
//! Each wallet gets a fresh address derived from the factory's instance id
//! and a creation nonce, so wallets from different factories never share
//! an address even when built with identical signer sets.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;
use uuid::Uuid;

use multisig_protocol::config::WALLET_ADDRESS_DOMAIN;
use multisig_protocol::{Identity, Ledger};

use crate::error::MultisigError;
use crate::multisig::{ApprovalPolicy, MultisigWallet};

// ---------------------------------------------------------------------------
// WalletHandle
// ---------------------------------------------------------------------------

/// Shared handle to a deployed wallet.
///
/// Cloning is cheap and every clone refers to the same instance. The lock
/// is the wallet's serialization point: each call runs to completion under
/// the write guard before the next one is observed.
#[derive(Clone)]
pub struct WalletHandle {
    address: Identity,
    wallet: Arc<RwLock<MultisigWallet>>,
}

impl WalletHandle {
    fn new(wallet: MultisigWallet) -> Self {
        Self {
            address: wallet.address(),
            wallet: Arc::new(RwLock::new(wallet)),
        }
    }

    /// Address of the wallet behind this handle.
    pub fn address(&self) -> Identity {
        self.address
    }

    /// Shared access for queries.
    pub fn read(&self) -> RwLockReadGuard<'_, MultisigWallet> {
        self.wallet.read()
    }

    /// Exclusive access for proposals and approvals.
    pub fn write(&self) -> RwLockWriteGuard<'_, MultisigWallet> {
        self.wallet.write()
    }

    /// Returns `true` if both handles point at the same instance.
    pub fn ptr_eq(&self, other: &WalletHandle) -> bool {
        Arc::ptr_eq(&self.wallet, &other.wallet)
    }
}

impl fmt::Debug for WalletHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletHandle({})", self.address)
    }
}

// ---------------------------------------------------------------------------
// MultisigFactory
// ---------------------------------------------------------------------------

/// Constructor and registry for wallet instances.
pub struct MultisigFactory {
    /// Salt for address derivation, unique per factory.
    factory_id: Uuid,
    /// Count of successful creations; the next wallet's derivation nonce.
    nonce: u64,
    /// Ledger every created wallet holds its funds on.
    ledger: Arc<dyn Ledger>,
    /// Append-only, creation-ordered registry.
    wallets: Vec<WalletHandle>,
    by_address: HashMap<Identity, usize>,
}

impl MultisigFactory {
    /// Creates an empty factory whose wallets hold funds on `ledger`.
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            factory_id: Uuid::new_v4(),
            nonce: 0,
            ledger,
            wallets: Vec::new(),
            by_address: HashMap::new(),
        }
    }

    /// Deploys a wallet with the default [`ApprovalPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`MultisigError::InvalidConfig`] if the signer set is
    /// invalid; the registry is left unchanged.
    pub fn create_wallet(
        &mut self,
        quorum: usize,
        signers: Vec<Identity>,
    ) -> Result<WalletHandle, MultisigError> {
        self.create_wallet_with_policy(quorum, signers, ApprovalPolicy::default())
    }

    /// Deploys a wallet with an explicit approval policy.
    pub fn create_wallet_with_policy(
        &mut self,
        quorum: usize,
        signers: Vec<Identity>,
        policy: ApprovalPolicy,
    ) -> Result<WalletHandle, MultisigError> {
        let nonce = self.nonce + 1;
        let address = Identity::derive(WALLET_ADDRESS_DOMAIN, self.factory_id.as_bytes(), nonce);

        let signer_count = signers.len();
        let wallet = MultisigWallet::new(
            address,
            quorum,
            signers,
            Arc::clone(&self.ledger),
            policy,
        )?;
        let handle = WalletHandle::new(wallet);

        self.nonce = nonce;
        self.by_address.insert(address, self.wallets.len());
        self.wallets.push(handle.clone());

        info!(
            factory = %self.factory_id,
            wallet = %address,
            quorum,
            signers = signer_count,
            "wallet created"
        );
        Ok(handle)
    }

    /// Snapshot of every wallet created so far, in creation order.
    pub fn list_wallets(&self) -> Vec<WalletHandle> {
        self.wallets.clone()
    }

    /// Addresses of every wallet created so far, in creation order.
    pub fn wallet_addresses(&self) -> Vec<Identity> {
        self.wallets.iter().map(WalletHandle::address).collect()
    }

    /// Looks up a wallet by address.
    pub fn wallet(&self, address: &Identity) -> Option<WalletHandle> {
        self.by_address
            .get(address)
            .map(|&idx| self.wallets[idx].clone())
    }

    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    pub fn factory_id(&self) -> Uuid {
        self.factory_id
    }

    /// The ledger handed to every wallet this factory creates.
    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }
}

impl fmt::Debug for MultisigFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultisigFactory")
            .field("factory_id", &self.factory_id)
            .field("wallets", &self.wallets.len())
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

    fn factory() -> MultisigFactory {
        MultisigFactory::new(Arc::new(InMemoryLedger::new()))
    }

    #[test]
    fn new_factory_is_empty() {
        let f = factory();
        assert_eq!(f.wallet_count(), 0);
        assert!(f.list_wallets().is_empty());
    }

    #[test]
    fn create_wallet_registers_handle() {
        let mut f = factory();
        let handle = f.create_wallet(2, vec![id(1), id(2), id(3)]).unwrap();
        assert_eq!(f.wallet_count(), 1);
        assert_eq!(f.wallet_addresses(), vec![handle.address()]);
        assert!(f.wallet(&handle.address()).unwrap().ptr_eq(&handle));
        assert_eq!(handle.read().current_quorum(), 2);
    }

    #[test]
    fn invalid_config_leaves_registry_unchanged() {
        let mut f = factory();
        f.create_wallet(2, vec![id(1), id(2)]).unwrap();
        let err = f.create_wallet(3, vec![id(1), id(2)]).unwrap_err();
        assert!(matches!(err, MultisigError::InvalidConfig(_)));
        assert!(f.create_wallet(2, vec![]).is_err());
        assert!(f.create_wallet(2, vec![id(1), Identity::NULL]).is_err());
        assert_eq!(f.wallet_count(), 1);
    }

    #[test]
    fn addresses_are_unique_across_wallets_and_factories() {
        let mut a = factory();
        let mut b = factory();
        let signers = vec![id(1), id(2)];
        let a1 = a.create_wallet(2, signers.clone()).unwrap();
        let a2 = a.create_wallet(2, signers.clone()).unwrap();
        let b1 = b.create_wallet(2, signers).unwrap();
        assert_ne!(a1.address(), a2.address());
        assert_ne!(a1.address(), b1.address());
        assert!(!a1.address().is_null());
    }

    #[test]
    fn unknown_address_lookup_is_none() {
        let f = factory();
        assert!(f.wallet(&id(44)).is_none());
    }

    #[test]
    fn handles_share_state() {
        let mut f = factory();
        let handle = f.create_wallet(2, vec![id(1), id(2)]).unwrap();
        handle
            .write()
            .propose(&id(1), 5, id(20), id(30))
            .unwrap();
        let listed = &f.list_wallets()[0];
        assert_eq!(listed.read().tx_count(), 1);
    }
}
