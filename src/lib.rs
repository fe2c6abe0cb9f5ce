#![doc(test(attr(deny(warnings))))]

//! Bizledger records dated income and expense entries for a small business
//! and turns them into a daily pivot report with per-category columns,
//! totals and net margin.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;

pub use crate::core::{Clock, LedgerManager, RenameOutcome, SystemClock};
pub use currency::Money;
pub use errors::{CliError, LedgerError, Result};
pub use ledger::{EntryType, Transaction};
pub use report::{PivotReport, PivotRow, PivotTotals};

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(None);
}

/// Initializes global tracing, preferring `RUST_LOG` over `default_filter`.
pub fn init_with_filter(default_filter: Option<&str>) {
    utils::init_tracing(default_filter);
    tracing::debug!("bizledger tracing initialized");
}
