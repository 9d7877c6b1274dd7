//! hgate-store: credential store contract + backends
//!
//! The store is the only shared resource in the system. Its discipline:
//! reads and writes are scoped to a single username key, and `insert` is an
//! atomic check-then-insert so exactly one of two concurrent registrations
//! for the same username wins.
//!
//! I/O faults are surfaced as `HgateError::Storage` and must propagate to
//! the caller unchanged; mapping them into a decoy response would corrupt
//! the security semantics.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use hgate_core::{CredentialRecord, HgateResult};

/// Outcome of an insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A record for this username already exists; the store is unchanged.
    AlreadyExists,
}

/// Credential store contract consumed by the auth engine.
pub trait CredentialStore: Send + Sync {
    /// Fetch the record for a username, if present.
    fn get(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = HgateResult<Option<CredentialRecord>>> + Send;

    /// Atomic check-then-insert keyed by `record.username`.
    fn insert(
        &self,
        record: CredentialRecord,
    ) -> impl std::future::Future<Output = HgateResult<InsertOutcome>> + Send;
}
