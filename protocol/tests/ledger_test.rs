//! Integration tests for the shared primitives: signer identities derived
//! from key material, and the in-memory ledger under concurrent use.

use std::sync::Arc;

use multisig_protocol::config::WALLET_ADDRESS_DOMAIN;
use multisig_protocol::crypto::Keypair;
use multisig_protocol::{Identity, InMemoryLedger, Ledger, LedgerError};

#[test]
fn keypair_identity_survives_text_and_json() {
    let keypair = Keypair::generate();
    let restored = Keypair::from_hex(&keypair.secret_key_hex()).unwrap();
    assert_eq!(restored.identity(), keypair.identity());

    let json = serde_json::to_string(&keypair.identity()).unwrap();
    assert!(json.starts_with("\"msig1"));
    let back: Identity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, keypair.identity());
}

#[test]
fn wallet_addresses_never_collide_with_nonce() {
    let seed = b"factory-seed";
    let addresses: std::collections::HashSet<Identity> = (1..=256)
        .map(|nonce| Identity::derive(WALLET_ADDRESS_DOMAIN, seed, nonce))
        .collect();
    assert_eq!(addresses.len(), 256);
    assert!(!addresses.contains(&Identity::NULL));
}

#[test]
fn concurrent_transfers_conserve_supply() {
    let ledger = Arc::new(InMemoryLedger::new());
    let asset = Identity::derive("test/asset", b"T", 0);
    let source = Identity::derive("test/holder", b"source", 0);
    ledger.mint(&asset, &source, 1_000).unwrap();

    let threads: Vec<_> = (0..8u64)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            std::thread::spawn(move || {
                let to = Identity::derive("test/holder", b"sink", i);
                (0..50)
                    .filter(|_| ledger.transfer(&source, &to, &asset, 3).is_ok())
                    .count()
            })
        })
        .collect();
    let moved: usize = threads.into_iter().map(|t| t.join().unwrap()).sum();

    // 1000 / 3 = 333 transfers fit; the rest fail on balance.
    assert_eq!(moved, 333);
    assert_eq!(ledger.balance_of(&source, &asset), 1);
    assert_eq!(ledger.total_supply(&asset), 1_000);
}

#[test]
fn failed_transfer_changes_nothing() {
    let ledger = InMemoryLedger::new();
    let asset = Identity::derive("test/asset", b"T", 0);
    let a = Identity::derive("test/holder", b"a", 0);
    let b = Identity::derive("test/holder", b"b", 0);
    ledger.mint(&asset, &a, 10).unwrap();

    assert_eq!(
        ledger.transfer(&a, &b, &asset, 11),
        Err(LedgerError::InsufficientBalance {
            available: 10,
            requested: 11
        })
    );
    assert_eq!(
        ledger.transfer(&a, &Identity::NULL, &asset, 1),
        Err(LedgerError::NullAddress)
    );
    assert_eq!(ledger.balance_of(&a, &asset), 10);
    assert_eq!(ledger.balance_of(&b, &asset), 0);
}
