//! Stateful ledger components and the facade that ties them together.

pub mod category_registry;
pub mod clock;
pub mod ledger_manager;
pub mod transaction_store;
pub mod utils;

pub use category_registry::{CategoryRegistry, RenameOutcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger_manager::LedgerManager;
pub use transaction_store::{TransactionSnapshot, TransactionStore};
