//! Integration test: concurrent registration uniqueness
//!
//! Two simultaneous registrations for the same username must resolve to
//! exactly one success and one `AlreadyExists`.

use std::sync::Arc;

use secrecy::SecretString;

use hgate_core::{CardBrand, HgateError, Identity};
use hgate_crypto::HashParams;
use hgate_engine::AuthEngine;
use hgate_store::MemoryStore;

fn identity(name: &str) -> Identity {
    Identity {
        account_id: format!("acct-{name}"),
        full_name: name.into(),
        email: "alice@example.com".into(),
        card_number: "4532015112830366".into(),
        card_brand: CardBrand::Visa,
        cvv: "123".into(),
        expiration_date: "03/30".into(),
        balance: "10.00 RON".into(),
    }
}

#[tokio::test]
async fn concurrent_same_username_one_winner() {
    let engine = Arc::new(
        AuthEngine::new(MemoryStore::new()).with_hash_params(HashParams {
            mem_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        }),
    );

    let e1 = engine.clone();
    let e2 = engine.clone();
    let password = SecretString::from("Secret123!");
    let p1 = password.clone();
    let p2 = password.clone();

    let (r1, r2) = tokio::join!(
        tokio::spawn(
            async move { e1.register("alice@example.com", &p1, identity("first")).await }
        ),
        tokio::spawn(
            async move { e2.register("alice@example.com", &p2, identity("second")).await }
        ),
    );
    let results = [r1.unwrap(), r2.unwrap()];

    let wins = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(HgateError::AlreadyExists)))
        .count();

    assert_eq!(wins, 1, "exactly one registration must win");
    assert_eq!(conflicts, 1, "the loser must observe AlreadyExists");

    // The surviving record answers logins.
    let login = engine.login("alice@example.com", &password).await.unwrap();
    assert!(login.authentic);
}

#[tokio::test]
async fn distinct_usernames_do_not_contend() {
    let engine = Arc::new(
        AuthEngine::new(MemoryStore::new()).with_hash_params(HashParams {
            mem_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        }),
    );

    let e1 = engine.clone();
    let e2 = engine.clone();

    let (r1, r2) = tokio::join!(
        tokio::spawn(async move {
            e1.register(
                "alice@example.com",
                &SecretString::from("pw-a"),
                identity("alice"),
            )
            .await
        }),
        tokio::spawn(async move {
            e2.register(
                "bob@example.com",
                &SecretString::from("pw-b"),
                identity("bob"),
            )
            .await
        }),
    );

    assert!(r1.unwrap().is_ok());
    assert!(r2.unwrap().is_ok());
    assert_eq!(engine.store().len().await, 2);
}
