//! Write-only persistence for discovery records.
//!
//! The production store writes each record as a pretty-printed JSON file
//! under a two-level shard of the record's UUID, mirroring how response
//! data is laid out on disk:
//!
//! ```text
//! <response_data_dir>/responses/<s1>/<s2>/<uuid>/response.json
//! ```
//!
//! where `s1` and `s2` are the first two and next two hex characters of
//! the record id. Records are never read back, updated, or deleted by the
//! service; analysis happens out of band.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use sha_types::DiscoveryRecord;

use crate::config::CoreConfig;

/// Failures raised while persisting a record.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("could not create the storage directory: {0}")]
    StorageDirCreation(std::io::Error),

    #[error("could not create the record directory: {0}")]
    RecordDirCreation(std::io::Error),

    #[error("a record with this id already exists")]
    DuplicateRecord,

    #[error("could not write the record file: {0}")]
    FileWrite(std::io::Error),

    #[error("could not serialise the record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Insert-only sink for completed discovery records.
pub trait RecordStore: Send + Sync {
    /// Persists one record. Must not overwrite an existing record with
    /// the same id.
    fn insert(&self, record: &DiscoveryRecord) -> Result<(), StoreError>;
}

/// File-backed store writing one sharded JSON document per record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config: Arc<CoreConfig>,
}

impl JsonFileStore {
    pub fn new(config: Arc<CoreConfig>) -> Self {
        Self { config }
    }

    /// Directory for one record: `responses/<s1>/<s2>/<uuid>`.
    fn record_dir(&self, record: &DiscoveryRecord) -> PathBuf {
        let id = record.id.simple().to_string();
        let s1 = &id[0..2];
        let s2 = &id[2..4];
        self.config.responses_dir().join(s1).join(s2).join(&id)
    }
}

impl RecordStore for JsonFileStore {
    fn insert(&self, record: &DiscoveryRecord) -> Result<(), StoreError> {
        let dir = self.record_dir(record);
        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent).map_err(StoreError::RecordDirCreation)?;
        }
        // The record directory itself is created non-recursively so that an
        // id collision surfaces instead of clobbering the earlier record.
        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::DuplicateRecord);
            }
            Err(e) => return Err(StoreError::RecordDirCreation(e)),
        }
        let path = dir.join("response.json");
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json).map_err(StoreError::FileWrite)?;
        tracing::info!(id = %record.id, segment = %record.segment, "stored discovery record");
        Ok(())
    }
}

/// In-memory store for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<DiscoveryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<DiscoveryRecord> {
        self.records.lock().expect("record lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("record lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, record: &DiscoveryRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("record lock poisoned")
            .push(record.clone());
        Ok(())
    }
}

/// Store that always fails, for exercising failure paths in tests.
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl RecordStore for FailingStore {
    fn insert(&self, _record: &DiscoveryRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }
}
