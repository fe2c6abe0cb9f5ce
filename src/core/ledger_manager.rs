use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    errors::Result,
    ledger::{BusinessProfile, CategoryCatalog, EntryType, Transaction},
    report::{self, LedgerTotals, PivotReport},
    storage::StorageBackend,
};

use super::{
    category_registry::{CategoryRegistry, RenameOutcome},
    clock::Clock,
    transaction_store::{TransactionSnapshot, TransactionStore},
};

/// Facade that coordinates ledger state and persistence for a single session.
pub struct LedgerManager {
    transactions: TransactionStore,
    categories: CategoryRegistry,
    profile: BusinessProfile,
    storage: Arc<dyn StorageBackend>,
}

impl LedgerManager {
    /// Loads every persisted blob, using defaults for the ones never saved.
    pub fn load(storage: Arc<dyn StorageBackend>, clock: Arc<dyn Clock>) -> Result<Self> {
        let transactions = TransactionStore::load(storage.clone(), clock)?;
        let categories = CategoryRegistry::load(storage.clone())?;
        let profile = storage
            .load_business_name()?
            .map(|name| BusinessProfile::new(&name))
            .unwrap_or_default();

        let manager = Self {
            transactions,
            categories,
            profile,
            storage,
        };
        for warning in manager.integrity_warnings() {
            warn!("{warning}");
        }
        info!(
            transactions = manager.transactions.len(),
            business = manager.profile.name(),
            "ledger loaded"
        );
        Ok(manager)
    }

    pub fn add_transaction(
        &mut self,
        amount: &str,
        entry_type: EntryType,
        category: &str,
        date: &str,
    ) -> Result<Transaction> {
        self.transactions.add(date, amount, entry_type, category)
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<bool> {
        self.transactions.remove(id)
    }

    pub fn clear_transactions(&mut self) -> Result<usize> {
        self.transactions.clear()
    }

    pub fn list_transactions(&self) -> &[Transaction] {
        self.transactions.list()
    }

    pub fn snapshot(&self) -> TransactionSnapshot {
        self.transactions.snapshot()
    }

    pub fn transaction_store(&self) -> &TransactionStore {
        &self.transactions
    }

    pub fn categories(&self, entry_type: EntryType) -> &[String] {
        self.categories.list(entry_type)
    }

    pub fn category_catalog(&self) -> &CategoryCatalog {
        self.categories.catalog()
    }

    pub fn add_category(&mut self, entry_type: EntryType, name: &str) -> Result<bool> {
        self.categories.add(entry_type, name)
    }

    pub fn rename_category(
        &mut self,
        entry_type: EntryType,
        old: &str,
        new: &str,
    ) -> Result<RenameOutcome> {
        self.categories
            .rename(&mut self.transactions, entry_type, old, new)
    }

    pub fn delete_category(&mut self, entry_type: EntryType, name: &str) -> Result<bool> {
        self.categories.delete(entry_type, name)
    }

    pub fn is_orphaned(&self, transaction: &Transaction) -> bool {
        self.categories.is_orphaned(transaction)
    }

    /// Category names still carried by history but no longer offered, sorted.
    pub fn orphaned_categories(&self, entry_type: EntryType) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .transactions
            .list()
            .iter()
            .filter(|txn| txn.entry_type == entry_type && self.categories.is_orphaned(txn))
            .map(|txn| txn.category.as_str())
            .collect();
        names.into_iter().map(String::from).collect()
    }

    pub fn business_name(&self) -> &str {
        self.profile.name()
    }

    /// Updates the business name. Blank or unchanged names are ignored.
    pub fn set_business_name(&mut self, name: &str) -> Result<bool> {
        if !self.profile.rename(name) {
            return Ok(false);
        }
        info!(business = self.profile.name(), "business name updated");
        self.storage.save_business_name(self.profile.name())?;
        Ok(true)
    }

    pub fn pivot(&self) -> PivotReport {
        report::pivot(&self.transactions.snapshot())
    }

    pub fn filter(&self, query: &str, day: Option<NaiveDate>) -> Vec<&Transaction> {
        report::filter(self.transactions.list(), query, day)
    }

    pub fn totals(&self) -> LedgerTotals {
        report::summarize(self.transactions.list())
    }

    /// Describes anomalies in the loaded data. Orphaned categories are
    /// expected after a delete and are not reported here.
    pub fn integrity_warnings(&self) -> Vec<String> {
        integrity_warnings(self.transactions.list())
    }
}

/// Detects duplicate ids and non-positive amounts in a transaction collection.
pub fn integrity_warnings(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    for txn in transactions {
        if !seen.insert(txn.id) {
            warnings.push(format!("transaction id {} appears more than once", txn.id));
        }
        if !txn.amount.is_positive() {
            warnings.push(format!(
                "transaction {} has non-positive amount {}",
                txn.id, txn.amount
            ));
        }
        if txn.category.trim().is_empty() {
            warnings.push(format!("transaction {} has no category", txn.id));
        }
    }
    warnings
}
