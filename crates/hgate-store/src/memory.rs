//! In-memory credential store, for tests and ephemeral deployments

use std::collections::HashMap;
use tokio::sync::RwLock;

use hgate_core::{CredentialRecord, HgateResult};

use crate::{CredentialStore, InsertOutcome};

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl CredentialStore for MemoryStore {
    async fn get(&self, username: &str) -> HgateResult<Option<CredentialRecord>> {
        Ok(self.records.read().await.get(username).cloned())
    }

    async fn insert(&self, record: CredentialRecord) -> HgateResult<InsertOutcome> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.username) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        records.insert(record.username.clone(), record);
        Ok(InsertOutcome::Inserted)
    }
}
