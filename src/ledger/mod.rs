//! Ledger domain models and persistence-friendly types.

pub mod category;
pub mod profile;
pub mod transaction;

pub use category::CategoryCatalog;
pub use profile::{BusinessProfile, DEFAULT_BUSINESS_NAME};
pub use transaction::{EntryType, Transaction};
