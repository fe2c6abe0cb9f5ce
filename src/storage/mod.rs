pub mod json_backend;
pub mod memory;

use std::fmt;

use crate::{
    errors::{LedgerError, Result},
    ledger::{CategoryCatalog, Transaction},
};

/// Keys of the independently persisted state blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Transactions,
    Categories,
    BusinessName,
}

impl StateKey {
    pub const ALL: [StateKey; 3] = [
        StateKey::Transactions,
        StateKey::Categories,
        StateKey::BusinessName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::Transactions => "transactions",
            StateKey::Categories => "categories",
            StateKey::BusinessName => "businessName",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value persistence for ledger state. Every write replaces the whole
/// blob stored under the key.
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: StateKey) -> Result<Option<String>>;
    fn write(&self, key: StateKey, value: &str) -> Result<()>;

    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>> {
        self.read(StateKey::Transactions)?
            .map(|data| decode(StateKey::Transactions, &data))
            .transpose()
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        let json = encode(StateKey::Transactions, transactions)?;
        self.write(StateKey::Transactions, &json)
    }

    fn load_categories(&self) -> Result<Option<CategoryCatalog>> {
        self.read(StateKey::Categories)?
            .map(|data| decode(StateKey::Categories, &data))
            .transpose()
    }

    fn save_categories(&self, catalog: &CategoryCatalog) -> Result<()> {
        let json = encode(StateKey::Categories, catalog)?;
        self.write(StateKey::Categories, &json)
    }

    fn load_business_name(&self) -> Result<Option<String>> {
        self.read(StateKey::BusinessName)
    }

    fn save_business_name(&self, name: &str) -> Result<()> {
        self.write(StateKey::BusinessName, name)
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: StateKey, data: &str) -> Result<T> {
    serde_json::from_str(data)
        .map_err(|err| LedgerError::Persistence(format!("`{key}` is unreadable: {err}")))
}

fn encode<T: serde::Serialize + ?Sized>(key: StateKey, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| LedgerError::Persistence(format!("`{key}` could not be encoded: {err}")))
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
