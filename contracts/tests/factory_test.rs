//! Integration tests for the wallet factory registry.

use std::sync::Arc;

use multisig_contracts::{ApprovalPolicy, MultisigError, MultisigFactory};
use multisig_protocol::crypto::Keypair;
use multisig_protocol::{Identity, InMemoryLedger};

fn signers(n: usize) -> Vec<Identity> {
    (0..n).map(|_| Keypair::generate().identity()).collect()
}

fn factory() -> MultisigFactory {
    MultisigFactory::new(Arc::new(InMemoryLedger::new()))
}

#[test]
fn create_multisig_wallet() {
    let mut factory = factory();
    let set = signers(3);
    let handle = factory.create_wallet(3, set.clone()).unwrap();

    assert_eq!(factory.list_wallets().len(), 1);
    let wallet = handle.read();
    assert_eq!(wallet.current_quorum(), 3);
    assert_eq!(wallet.signers().signers(), set.as_slice());
    assert!(set.iter().all(|s| wallet.is_signer(s)));
    assert_eq!(wallet.tx_count(), 0);
}

#[test]
fn registry_preserves_creation_order() {
    let mut factory = factory();
    let created: Vec<Identity> = (0..4)
        .map(|_| factory.create_wallet(2, signers(3)).unwrap().address())
        .collect();

    assert_eq!(factory.wallet_addresses(), created);
    let listed: Vec<Identity> = factory
        .list_wallets()
        .iter()
        .map(|handle| handle.address())
        .collect();
    assert_eq!(listed, created);
}

#[test]
fn failed_creation_does_not_grow_registry() {
    let mut factory = factory();
    factory.create_wallet(2, signers(2)).unwrap();

    let cases = vec![
        (2, vec![]),
        (1, signers(3)),
        (4, signers(3)),
        (2, vec![Identity::NULL, Keypair::generate().identity()]),
    ];
    for (quorum, set) in cases {
        let err = factory.create_wallet(quorum, set).unwrap_err();
        assert!(matches!(err, MultisigError::InvalidConfig(_)));
    }

    assert_eq!(factory.wallet_count(), 1);
}

#[test]
fn listing_is_a_snapshot() {
    let mut factory = factory();
    factory.create_wallet(2, signers(2)).unwrap();
    let before = factory.list_wallets();
    factory.create_wallet(2, signers(2)).unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(factory.list_wallets().len(), 2);
}

#[test]
fn lookup_by_address() {
    let mut factory = factory();
    let handle = factory.create_wallet(2, signers(3)).unwrap();
    let found = factory.wallet(&handle.address()).unwrap();
    assert!(found.ptr_eq(&handle));
    assert!(factory.wallet(&Identity::NULL).is_none());
}

#[test]
fn policy_is_applied_per_wallet() {
    let mut factory = factory();
    let eager = factory
        .create_wallet_with_policy(
            2,
            signers(2),
            ApprovalPolicy {
                proposer_approves: true,
            },
        )
        .unwrap();
    let strict = factory.create_wallet(2, signers(2)).unwrap();

    assert!(eager.read().policy().proposer_approves);
    assert!(!strict.read().policy().proposer_approves);
}
