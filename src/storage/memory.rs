use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        RwLock,
    },
};

use crate::errors::{LedgerError, Result};

use super::{StateKey, StorageBackend};

/// Process-local storage. Useful for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RwLock<HashMap<StateKey, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, simulating an unavailable or full store.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: StateKey) -> Option<String> {
        self.blobs
            .read()
            .ok()
            .and_then(|blobs| blobs.get(&key).cloned())
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: StateKey) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| LedgerError::Persistence("memory storage lock poisoned".into()))?;
        Ok(blobs.get(&key).cloned())
    }

    fn write(&self, key: StateKey, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Persistence(format!(
                "storage unavailable while writing `{key}`"
            )));
        }
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| LedgerError::Persistence("memory storage lock poisoned".into()))?;
        blobs.insert(key, value.to_string());
        Ok(())
    }
}
