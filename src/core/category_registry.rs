//! Category taxonomy per entry type, including the cascading rename.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    errors::{LedgerError, Result},
    ledger::{CategoryCatalog, EntryType, Transaction},
    storage::StorageBackend,
};

use super::transaction_store::TransactionStore;

/// Result of a rename request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Nothing changed: blank or identical new name, or unknown old name.
    Unchanged,
    /// The registry entry was replaced and `relabeled` transactions followed it.
    Renamed { relabeled: usize },
}

pub struct CategoryRegistry {
    catalog: CategoryCatalog,
    storage: Arc<dyn StorageBackend>,
}

impl CategoryRegistry {
    /// Loads the persisted taxonomy, falling back to the starter categories.
    pub fn load(storage: Arc<dyn StorageBackend>) -> Result<Self> {
        let catalog = match storage.load_categories()? {
            Some(mut catalog) => {
                let dropped = catalog.normalize();
                if dropped > 0 {
                    warn!(dropped, "blank or duplicate category names dropped on load");
                }
                catalog
            }
            None => {
                debug!("no saved categories, using defaults");
                CategoryCatalog::default()
            }
        };
        Ok(Self { catalog, storage })
    }

    pub fn list(&self, entry_type: EntryType) -> &[String] {
        self.catalog.names(entry_type)
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn contains(&self, entry_type: EntryType, name: &str) -> bool {
        self.catalog.contains(entry_type, name)
    }

    /// True when the transaction's category is no longer offered for its type.
    pub fn is_orphaned(&self, transaction: &Transaction) -> bool {
        !self.contains(transaction.entry_type, &transaction.category)
    }

    /// Appends a category. Blank or already listed names are ignored.
    pub fn add(&mut self, entry_type: EntryType, name: &str) -> Result<bool> {
        if !self.catalog.push(entry_type, name) {
            debug!(%entry_type, name, "category add ignored");
            return Ok(false);
        }
        info!(%entry_type, name = name.trim(), "category added");
        self.persist()?;
        Ok(true)
    }

    /// Renames `old` to `new` in place and relabels every transaction of the
    /// same type that carries `old`.
    ///
    /// Both in-memory changes are applied together before anything is
    /// written; the transaction collection is persisted first, then the
    /// registry.
    pub fn rename(
        &mut self,
        transactions: &mut TransactionStore,
        entry_type: EntryType,
        old: &str,
        new: &str,
    ) -> Result<RenameOutcome> {
        let new = new.trim();
        if new.is_empty() || new == old {
            debug!(%entry_type, old, "rename ignored, name unchanged");
            return Ok(RenameOutcome::Unchanged);
        }
        let Some(index) = self.catalog.position(entry_type, old) else {
            debug!(%entry_type, old, "rename ignored, category not found");
            return Ok(RenameOutcome::Unchanged);
        };
        if self.catalog.contains(entry_type, new) {
            return Err(LedgerError::validation(format!(
                "{entry_type} category `{new}` already exists"
            )));
        }

        self.catalog.replace_at(entry_type, index, new);
        let relabeled = transactions.relabel(entry_type, old, new);
        info!(%entry_type, old, new, relabeled, "category renamed");

        transactions.persist()?;
        self.persist()?;
        Ok(RenameOutcome::Renamed { relabeled })
    }

    /// Removes `name` from the taxonomy. Transactions that carry it are left
    /// as they are and keep reporting under their original label.
    pub fn delete(&mut self, entry_type: EntryType, name: &str) -> Result<bool> {
        if !self.catalog.remove(entry_type, name) {
            debug!(%entry_type, name, "delete ignored, category not found");
            return Ok(false);
        }
        info!(%entry_type, name, "category deleted");
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        self.storage.save_categories(&self.catalog).map_err(|err| {
            warn!(error = %err, "categories kept in memory but not persisted");
            err
        })
    }
}
