//! JSON file-backed credential store
//!
//! On-disk format: a JSON array of records, each with `username`, `salt`
//! (hex), `password_hash` (hex), and the nested `real_identity`. The whole
//! file is hydrated into memory at open; writes rewrite the file atomically
//! via temp+rename. One mutex covers the map and the file, so the
//! check-then-insert is atomic and the on-disk state never diverges from
//! memory.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use hgate_core::{CredentialRecord, HgateError, HgateResult};

use crate::{CredentialStore, InsertOutcome};

pub struct JsonFileStore {
    path: PathBuf,
    records: Mutex<HashMap<String, CredentialRecord>>,
}

impl JsonFileStore {
    /// Load or create a store at the given path. A missing file starts the
    /// store empty; a malformed file is a storage fault, not an empty store.
    pub fn open(path: &Path) -> HgateResult<Self> {
        let records = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading credential store: {}", path.display()))
                .map_err(storage_err)?;
            let list: Vec<CredentialRecord> = serde_json::from_str(&content)
                .with_context(|| format!("parsing credential store: {}", path.display()))
                .map_err(storage_err)?;
            list.into_iter().map(|r| (r.username.clone(), r)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            records: Mutex::new(records),
        })
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Rewrite the backing file from the in-memory map. Records are sorted
    /// by username so the file diffs cleanly.
    fn flush(&self, records: &HashMap<String, CredentialRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating store dir: {}", parent.display()))?;
        }

        let mut list: Vec<&CredentialRecord> = records.values().collect();
        list.sort_by(|a, b| a.username.cmp(&b.username));
        let json = serde_json::to_string_pretty(&list).context("serializing credential store")?;

        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, &json)
            .with_context(|| format!("writing store temp: {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("renaming store: {}", self.path.display()))?;

        debug!(path = %self.path.display(), records = list.len(), "credential store flushed");
        Ok(())
    }
}

impl CredentialStore for JsonFileStore {
    async fn get(&self, username: &str) -> HgateResult<Option<CredentialRecord>> {
        Ok(self.records.lock().await.get(username).cloned())
    }

    async fn insert(&self, record: CredentialRecord) -> HgateResult<InsertOutcome> {
        let mut records = self.records.lock().await;
        if records.contains_key(&record.username) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        let username = record.username.clone();
        records.insert(username.clone(), record);

        // Keep memory and disk consistent: a failed flush rolls the insert
        // back and surfaces as a storage fault.
        if let Err(e) = self.flush(&records) {
            records.remove(&username);
            return Err(storage_err(e));
        }
        Ok(InsertOutcome::Inserted)
    }
}

fn storage_err(e: anyhow::Error) -> HgateError {
    HgateError::Storage(format!("{e:#}"))
}
