//! Read-only views over a transaction snapshot.

pub mod pivot;
pub mod search;

use serde::Serialize;

use crate::{currency::Money, ledger::Transaction};

pub use pivot::{pivot, PivotReport, PivotRow, PivotTotals};
pub use search::filter;

/// Overall income and expense across a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTotals {
    pub income: Money,
    pub expense: Money,
    pub net: Money,
}

pub fn summarize(transactions: &[Transaction]) -> LedgerTotals {
    let (income, expense) = transactions.iter().fold(
        (Money::ZERO, Money::ZERO),
        |(income, expense), txn| {
            if txn.is_profit() {
                (income + txn.amount, expense)
            } else {
                (income, expense + txn.amount)
            }
        },
    );
    LedgerTotals {
        income,
        expense,
        net: income - expense,
    }
}
