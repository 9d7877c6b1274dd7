//! Integration test: the full register → login walk
//!
//! Covers the externally observable contract: real logins return the real
//! identity, wrong passwords return deterministic decoys with the identical
//! shape, and unknown usernames fail only after the fixed delay.

use std::time::{Duration, Instant};

use secrecy::SecretString;

use hgate_core::{CardBrand, HgateError, Identity};
use hgate_crypto::HashParams;
use hgate_engine::AuthEngine;
use hgate_store::MemoryStore;

const DELAY: Duration = Duration::from_millis(50);

fn engine() -> AuthEngine<MemoryStore> {
    AuthEngine::new(MemoryStore::new())
        .with_hash_params(HashParams {
            mem_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        })
        .with_login_delay(DELAY)
}

fn alice() -> Identity {
    Identity {
        account_id: "7c9e6679-7425-40de-944b-e07fc1f90ae7".into(),
        full_name: "Alice Example".into(),
        email: "alice@example.com".into(),
        card_number: "5425233430109903".into(),
        card_brand: CardBrand::Mastercard,
        cvv: "123".into(),
        expiration_date: "09/29".into(),
        balance: "2500.00 RON".into(),
    }
}

#[tokio::test]
async fn scenario_register_then_login_paths() {
    let engine = engine();
    let password = SecretString::from("Secret123!");

    engine
        .register("alice@example.com", &password, alice())
        .await
        .expect("registration succeeds");

    // Correct password → the real identity, flagged authentic internally.
    let real = engine.login("alice@example.com", &password).await.unwrap();
    assert!(real.authentic);
    assert_eq!(real.identity, alice());

    // Wrong password → a decoy, same call shape, not an error.
    let wrong1 = SecretString::from("wrong1");
    let decoy_a = engine.login("alice@example.com", &wrong1).await.unwrap();
    assert!(!decoy_a.authentic);
    assert_ne!(decoy_a.identity, alice());

    // Same wrong password again → bit-identical decoy.
    let decoy_a2 = engine.login("alice@example.com", &wrong1).await.unwrap();
    assert_eq!(decoy_a.identity, decoy_a2.identity);

    // Different wrong password → a different decoy.
    let wrong2 = SecretString::from("wrong2");
    let decoy_b = engine.login("alice@example.com", &wrong2).await.unwrap();
    assert!(!decoy_b.authentic);
    assert_ne!(decoy_a.identity, decoy_b.identity);
}

#[tokio::test]
async fn unknown_user_fails_after_fixed_delay() {
    let engine = engine();

    let start = Instant::now();
    let result = engine
        .login("bob@nowhere.com", &SecretString::from("anything"))
        .await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(HgateError::UserNotFound)));
    assert!(
        elapsed >= DELAY,
        "unknown-user path returned in {elapsed:?}, before the {DELAY:?} floor"
    );
}

#[tokio::test]
async fn decoy_and_real_have_identical_response_shape() {
    let engine = engine();
    let password = SecretString::from("Secret123!");
    engine
        .register("alice@example.com", &password, alice())
        .await
        .unwrap();

    let real = engine.login("alice@example.com", &password).await.unwrap();
    let decoy = engine
        .login("alice@example.com", &SecretString::from("wrong"))
        .await
        .unwrap();

    let real_json = serde_json::to_value(&real.identity).unwrap();
    let decoy_json = serde_json::to_value(&decoy.identity).unwrap();

    let keys = |v: &serde_json::Value| {
        v.as_object()
            .unwrap()
            .iter()
            .map(|(k, val)| {
                (
                    k.clone(),
                    std::mem::discriminant(val),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(
        keys(&real_json),
        keys(&decoy_json),
        "real and decoy identities must expose identical fields and types"
    );
}

#[tokio::test]
async fn decoy_preserves_brand_and_given_name() {
    let engine = engine();
    let password = SecretString::from("Secret123!");
    engine
        .register("alice@example.com", &password, alice())
        .await
        .unwrap();

    let decoy = engine
        .login("alice@example.com", &SecretString::from("close-but-wrong"))
        .await
        .unwrap();

    assert_eq!(decoy.identity.card_brand, CardBrand::Mastercard);
    assert!(decoy.identity.full_name.starts_with("Alice "));
}

#[tokio::test]
async fn alert_hook_fires_only_for_decoys() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let alerts = Arc::new(AtomicUsize::new(0));
    let counter = alerts.clone();
    let engine = engine().with_alert(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let password = SecretString::from("Secret123!");
    engine
        .register("alice@example.com", &password, alice())
        .await
        .unwrap();

    engine.login("alice@example.com", &password).await.unwrap();
    assert_eq!(alerts.load(Ordering::SeqCst), 0);

    engine
        .login("alice@example.com", &SecretString::from("wrong"))
        .await
        .unwrap();
    assert_eq!(alerts.load(Ordering::SeqCst), 1);
}
