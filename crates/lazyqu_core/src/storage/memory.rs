//! In-memory blob storage for tests and ephemeral sessions.

use super::{BlobStorage, StorageError, StorageResult};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared failure switches for a `MemoryBlobStorage`.
///
/// Clones control the same storage, so a caller can flip failures after the
/// storage has been moved into a store.
#[derive(Debug, Clone, Default)]
pub struct StorageFaults {
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl StorageFaults {
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

/// Map-backed storage that records writes and can simulate failures.
#[derive(Debug, Default)]
pub struct MemoryBlobStorage {
    blobs: HashMap<String, String>,
    save_count: usize,
    faults: StorageFaults,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a blob, as if a previous session had written it.
    pub fn with_blob(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.blobs.insert(key.into(), value.into());
        self
    }

    /// Handle to this storage's failure switches.
    pub fn faults(&self) -> StorageFaults {
        self.faults.clone()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Current raw blob under `key`.
    pub fn blob(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStorage for MemoryBlobStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        if self.faults.fail_reads.get() {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.faults.fail_writes.get() {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.blobs.insert(key.to_string(), value.to_string());
        self.save_count += 1;
        Ok(())
    }
}
