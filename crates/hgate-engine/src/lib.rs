//! hgate-engine: the honey-authentication state machine
//!
//! Registration persists `{salt, Argon2id hash, real identity}`. Login never
//! distinguishes a wrong password from a right one in anything the caller
//! can observe: a mismatch deterministically synthesizes a decoy identity
//! with the same shape as the real one. The only observable login failure is
//! `UserNotFound`, and that path waits out a fixed delay so response latency
//! does not reveal whether a username exists.
//!
//! The engine is stateless per call and safe to share across tasks; the
//! credential store is the only shared resource.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use hgate_core::{CredentialRecord, HgateError, HgateResult, Identity};
use hgate_crypto::{derive_decoy_seed, generate_salt, hash_password, verify_password, HashParams};
use hgate_decoy::{DecoyPolicy, Synthesizer};
use hgate_store::{CredentialStore, InsertOutcome};

/// Callback invoked (with the username) whenever a decoy is served, for
/// silent security alerting. Must not surface anything to the login caller.
pub type AlertFn = Box<dyn Fn(&str) + Send + Sync>;

/// A successful login. `authentic` is for internal alerting only and must
/// never be serialized into a caller-visible response.
#[derive(Debug, Clone)]
pub struct Login {
    pub identity: Identity,
    pub authentic: bool,
}

pub struct AuthEngine<S> {
    store: S,
    hash_params: HashParams,
    login_delay: Duration,
    synthesizer: Synthesizer,
    on_decoy: Option<AlertFn>,
}

impl<S: CredentialStore> AuthEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            hash_params: HashParams::default(),
            login_delay: Duration::from_millis(500),
            synthesizer: Synthesizer::default(),
            on_decoy: None,
        }
    }

    pub fn with_hash_params(mut self, params: HashParams) -> Self {
        self.hash_params = params;
        self
    }

    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }

    pub fn with_decoy_policy(mut self, policy: DecoyPolicy) -> Self {
        self.synthesizer = Synthesizer::new(policy);
        self
    }

    pub fn with_alert(mut self, alert: AlertFn) -> Self {
        self.on_decoy = Some(alert);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new user: fresh salt, Argon2id hash, one record persisted.
    ///
    /// The uniqueness check is the store's atomic check-then-insert, so of
    /// two concurrent registrations for the same username exactly one wins.
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
        real_identity: Identity,
    ) -> HgateResult<()> {
        let salt = generate_salt();
        let password_hash = hash_password(password, &salt, &self.hash_params)?;

        let record = CredentialRecord {
            username: username.to_string(),
            salt,
            password_hash,
            real_identity,
        };

        match self.store.insert(record).await? {
            InsertOutcome::Inserted => {
                info!(username, "user registered");
                Ok(())
            }
            InsertOutcome::AlreadyExists => Err(HgateError::AlreadyExists),
        }
    }

    /// Attempt a login. Returns an identity for every known username:
    /// the real one on a hash match, a seed-deterministic decoy otherwise.
    ///
    /// Storage faults propagate as-is; masking them behind a decoy would
    /// corrupt the security property.
    pub async fn login(&self, username: &str, password_attempt: &SecretString) -> HgateResult<Login> {
        let Some(record) = self.store.get(username).await? else {
            // Fixed suspension so "no such user" costs what the decoy
            // synthesis path costs. Holds no store lock.
            sleep(self.login_delay).await;
            return Err(HgateError::UserNotFound);
        };

        if verify_password(
            password_attempt,
            &record.salt,
            &record.password_hash,
            &self.hash_params,
        )? {
            debug!(username, "password verified");
            return Ok(Login {
                identity: record.real_identity,
                authentic: true,
            });
        }

        let seed = derive_decoy_seed(username, password_attempt.expose_secret(), &record.salt);
        let decoy = self.synthesizer.synthesize(&record.real_identity, seed);

        warn!(username, "wrong password served a decoy identity");
        if let Some(alert) = &self.on_decoy {
            alert(username);
        }

        Ok(Login {
            identity: decoy,
            authentic: false,
        })
    }
}
