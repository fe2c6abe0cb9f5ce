#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bizledger::{
    core::{clock::FixedClock, LedgerManager},
    storage::{JsonStorage, MemoryStorage},
    EntryType, Money, Transaction,
};
use chrono::DateTime;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const NOW: &str = "2024-03-10T18:30:00+05:30";

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at(NOW).expect("valid clock timestamp"))
}

/// Fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Manager over an in-memory backend; the backend is returned for inspection.
pub fn memory_manager() -> (LedgerManager, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let manager = LedgerManager::load(storage.clone(), clock()).expect("load ledger");
    (manager, storage)
}

/// Manager persisting JSON files under a fresh temp directory.
pub fn json_manager() -> (LedgerManager, PathBuf) {
    let dir = temp_dir().join("data");
    let manager = open_json(&dir);
    (manager, dir)
}

pub fn open_json(dir: &PathBuf) -> LedgerManager {
    let storage = JsonStorage::new(Some(dir.clone())).expect("create json storage backend");
    LedgerManager::load(Arc::new(storage), clock()).expect("load ledger")
}

/// Builds a transaction directly, bypassing the store.
pub fn txn(id: i64, date: &str, amount_minor: i64, entry_type: EntryType, category: &str) -> Transaction {
    Transaction {
        id,
        date: DateTime::parse_from_rfc3339(date).expect("valid date"),
        amount: Money::from_minor(amount_minor),
        entry_type,
        category: category.to_string(),
    }
}
