//! The append/remove-only collection of ledger entries.

use std::{ops::Deref, sync::Arc};

use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::{debug, info, warn};

use crate::{
    currency::{Money, MAX_MAJOR},
    errors::{LedgerError, Result},
    ledger::{EntryType, Transaction},
    storage::StorageBackend,
};

use super::clock::Clock;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Immutable point-in-time copy of the transaction collection.
#[derive(Debug, Clone)]
pub struct TransactionSnapshot(Arc<[Transaction]>);

impl Deref for TransactionSnapshot {
    type Target = [Transaction];

    fn deref(&self) -> &[Transaction] {
        &self.0
    }
}

/// Owns the ledger entries and writes the whole collection back after every change.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    last_id: i64,
    storage: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

#[cfg(test)]
impl std::fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions)
            .field("last_id", &self.last_id)
            .finish_non_exhaustive()
    }
}

impl TransactionStore {
    /// Loads the persisted collection, starting empty when nothing was saved yet.
    pub fn load(storage: Arc<dyn StorageBackend>, clock: Arc<dyn Clock>) -> Result<Self> {
        let transactions = storage.load_transactions()?.unwrap_or_default();
        if let Some(txn) = transactions.iter().find(|txn| !txn.amount.is_positive()) {
            return Err(LedgerError::Persistence(format!(
                "transaction {} has non-positive amount {}",
                txn.id, txn.amount
            )));
        }
        let last_id = transactions.iter().map(|txn| txn.id).max().unwrap_or(0);
        debug!(count = transactions.len(), "transactions loaded");
        Ok(Self {
            transactions,
            last_id,
            storage,
            clock,
        })
    }

    /// Records a new entry from raw form input.
    ///
    /// `date` is either a calendar day (`YYYY-MM-DD`), which is stamped with the
    /// current time of day so same-day entries keep their order, or a full
    /// RFC 3339 instant.
    pub fn add(
        &mut self,
        date: &str,
        amount: &str,
        entry_type: EntryType,
        category: &str,
    ) -> Result<Transaction> {
        let amount = Money::parse(amount)?;
        let date = self.parse_date(date)?;
        self.add_entry(date, amount, entry_type, category)
    }

    /// Records a new entry from already-typed values.
    pub fn add_entry(
        &mut self,
        date: DateTime<FixedOffset>,
        amount: Money,
        entry_type: EntryType,
        category: &str,
    ) -> Result<Transaction> {
        if !amount.is_positive() {
            return Err(LedgerError::validation("amount must be greater than zero"));
        }
        if amount > Money::from_major(MAX_MAJOR) {
            return Err(LedgerError::validation(format!(
                "amount must not exceed {MAX_MAJOR}"
            )));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::validation("category is required"));
        }

        let transaction = Transaction {
            id: self.next_id()?,
            date,
            amount,
            entry_type,
            category: category.to_string(),
        };
        self.last_id = transaction.id;
        self.transactions.push(transaction.clone());
        info!(
            id = transaction.id,
            entry_type = %transaction.entry_type,
            category = %transaction.category,
            amount = %transaction.amount,
            "transaction added"
        );
        self.persist()?;
        Ok(transaction)
    }

    /// Removes the entry with `id`. Returns `false` when no such entry exists.
    pub fn remove(&mut self, id: i64) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        if self.transactions.len() == before {
            debug!(id, "remove ignored, transaction not found");
            return Ok(false);
        }
        info!(id, "transaction removed");
        self.persist()?;
        Ok(true)
    }

    /// Drops every entry, returning how many were removed.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.transactions.len();
        if removed == 0 {
            return Ok(0);
        }
        self.transactions.clear();
        info!(removed, "transactions cleared");
        self.persist()?;
        Ok(removed)
    }

    /// Entries in insertion order.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn snapshot(&self) -> TransactionSnapshot {
        TransactionSnapshot(Arc::from(self.transactions.as_slice()))
    }

    /// Rewrites the category of every matching entry in memory. The caller
    /// persists once the surrounding rename is complete.
    pub(crate) fn relabel(&mut self, entry_type: EntryType, old: &str, new: &str) -> usize {
        let mut relabeled = 0;
        for txn in self
            .transactions
            .iter_mut()
            .filter(|txn| txn.entry_type == entry_type && txn.category == old)
        {
            txn.category = new.to_string();
            relabeled += 1;
        }
        relabeled
    }

    pub(crate) fn persist(&self) -> Result<()> {
        self.storage
            .save_transactions(&self.transactions)
            .map_err(|err| {
                warn!(error = %err, "transactions kept in memory but not persisted");
                err
            })
    }

    fn next_id(&self) -> Result<i64> {
        let stamp = self.clock.now().timestamp_millis();
        if stamp > self.last_id {
            return Ok(stamp);
        }
        self.last_id.checked_add(1).ok_or_else(|| {
            LedgerError::Persistence(format!(
                "no transaction id left after {}",
                self.last_id
            ))
        })
    }

    fn parse_date(&self, raw: &str) -> Result<DateTime<FixedOffset>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(LedgerError::validation("date is required"));
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Ok(instant);
        }
        let day = NaiveDate::parse_from_str(raw, DAY_FORMAT).map_err(|_| {
            LedgerError::validation(format!("`{raw}` is not a date (expected YYYY-MM-DD)"))
        })?;
        let now = self.clock.now();
        day.and_time(now.time())
            .and_local_timezone(*now.offset())
            .single()
            .ok_or_else(|| LedgerError::validation(format!("`{raw}` is not a valid local date")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::storage::MemoryStorage;

    fn store() -> (TransactionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(FixedClock::at("2024-01-05T14:30:15+05:30").unwrap());
        let store = TransactionStore::load(storage.clone(), clock).expect("load store");
        (store, storage)
    }

    #[test]
    fn add_stamps_calendar_day_with_current_time() {
        let (mut store, _) = store();
        let txn = store
            .add("2024-01-01", "150", EntryType::Expense, "Rent")
            .expect("add");
        assert_eq!(txn.date.to_rfc3339(), "2024-01-01T14:30:15+05:30");
        assert_eq!(txn.amount, Money::from_major(150));
    }

    #[test]
    fn ids_stay_unique_under_a_frozen_clock() {
        let (mut store, _) = store();
        let first = store.add("2024-01-01", "1", EntryType::Expense, "Milk").unwrap();
        let second = store.add("2024-01-01", "2", EntryType::Expense, "Milk").unwrap();
        assert!(second.id > first.id);

        store.remove(second.id).unwrap();
        let third = store.add("2024-01-01", "3", EntryType::Expense, "Milk").unwrap();
        assert!(third.id > second.id, "ids must never be reused");
    }

    #[test]
    fn validation_failures_leave_store_untouched() {
        let (mut store, storage) = store();
        let cases = [
            ("2024-01-01", "0", "Rent"),
            ("2024-01-01", "-5", "Rent"),
            ("2024-01-01", "", "Rent"),
            ("", "10", "Rent"),
            ("01/02/2024", "10", "Rent"),
            ("2024-01-01", "10", "   "),
        ];
        for (date, amount, category) in cases {
            let err = store
                .add(date, amount, EntryType::Expense, category)
                .expect_err("invalid input must be rejected");
            assert!(matches!(err, LedgerError::Validation(_)), "{err:?}");
        }
        assert!(store.is_empty());
        assert!(storage.raw(crate::storage::StateKey::Transactions).is_none());
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let (mut store, _) = store();
        store.add("2024-01-01", "10", EntryType::Profit, "Cash Sale").unwrap();
        let snapshot = store.snapshot();
        store.add("2024-01-02", "20", EntryType::Profit, "Cash Sale").unwrap();
        store.clear().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn persistence_failure_keeps_entry_in_memory() {
        let (mut store, storage) = store();
        storage.set_fail_writes(true);
        let err = store
            .add("2024-01-01", "10", EntryType::Expense, "Rent")
            .expect_err("write failure must surface");
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn amounts_above_the_maximum_are_rejected() {
        let (mut store, _) = store();
        let at_limit = store
            .add("2024-01-01", "10000000000", EntryType::Expense, "Rent")
            .unwrap();
        assert_eq!(at_limit.amount, Money::from_major(MAX_MAJOR));

        let date = at_limit.date;
        let err = store
            .add_entry(date, Money::from_major(MAX_MAJOR + 1), EntryType::Expense, "Rent")
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn exhausted_ids_fail_instead_of_wrapping() {
        let storage = Arc::new(MemoryStorage::new());
        let raw = format!(
            r#"[{{"id":{},"date":"2024-01-01T10:00:00Z","amount":"5","type":"Expense","category":"Milk"}}]"#,
            i64::MAX
        );
        storage
            .write(crate::storage::StateKey::Transactions, &raw)
            .unwrap();
        let clock = Arc::new(FixedClock::at("2024-01-05T14:30:15+05:30").unwrap());
        let mut store = TransactionStore::load(storage, clock).unwrap();

        let err = store
            .add("2024-01-02", "1", EntryType::Expense, "Milk")
            .unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_rejects_non_positive_amounts() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(
                crate::storage::StateKey::Transactions,
                r#"[{"id":1,"date":"2024-01-01T10:00:00Z","amount":"0","type":"Expense","category":"Milk"}]"#,
            )
            .unwrap();
        let clock = Arc::new(FixedClock::at("2024-01-05T14:30:15+05:30").unwrap());
        let err = TransactionStore::load(storage, clock).unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
    }
}
