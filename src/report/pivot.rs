//! Day-by-category pivot of the ledger.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    currency::Money,
    ledger::{EntryType, Transaction},
};

/// Running sums per category name.
#[derive(Debug, Default, Clone)]
struct CategorySums(BTreeMap<String, Money>);

impl CategorySums {
    fn add(&mut self, category: &str, amount: Money) {
        *self.0.entry(category.to_string()).or_default() += amount;
    }

    fn get(&self, category: &str) -> Money {
        self.0.get(category).copied().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct DayBucket {
    expense: CategorySums,
    profit: CategorySums,
}

impl DayBucket {
    fn sums_mut(&mut self, entry_type: EntryType) -> &mut CategorySums {
        match entry_type {
            EntryType::Expense => &mut self.expense,
            EntryType::Profit => &mut self.profit,
        }
    }
}

/// One calendar day of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotRow {
    pub day: NaiveDate,
    /// One cell per entry of `PivotReport::expense_columns`, zero when absent.
    pub expense: Vec<Money>,
    pub total_expense: Money,
    /// One cell per entry of `PivotReport::profit_columns`, zero when absent.
    pub profit: Vec<Money>,
    pub total_income: Money,
    pub net_margin: Money,
}

/// Trailing aggregate row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PivotTotals {
    pub expense: Vec<Money>,
    pub total_expense: Money,
    pub profit: Vec<Money>,
    pub total_income: Money,
    pub net_margin: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PivotReport {
    pub expense_columns: Vec<String>,
    pub profit_columns: Vec<String>,
    pub rows: Vec<PivotRow>,
    pub totals: PivotTotals,
}

impl PivotReport {
    /// True when the source held no transactions.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the pivot report for `transactions`.
///
/// Columns are the categories that actually occur in the data, sorted
/// ascending per entry type; rows are days in ascending order. The result
/// only depends on the set of transactions, not on their order.
pub fn pivot(transactions: &[Transaction]) -> PivotReport {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    let mut expense_columns = BTreeSet::new();
    let mut profit_columns = BTreeSet::new();

    for txn in transactions {
        days.entry(txn.day())
            .or_default()
            .sums_mut(txn.entry_type)
            .add(&txn.category, txn.amount);
        match txn.entry_type {
            EntryType::Expense => expense_columns.insert(txn.category.as_str()),
            EntryType::Profit => profit_columns.insert(txn.category.as_str()),
        };
    }

    let expense_columns: Vec<String> = expense_columns.into_iter().map(String::from).collect();
    let profit_columns: Vec<String> = profit_columns.into_iter().map(String::from).collect();

    let mut totals = PivotTotals {
        expense: vec![Money::ZERO; expense_columns.len()],
        profit: vec![Money::ZERO; profit_columns.len()],
        ..PivotTotals::default()
    };

    let rows: Vec<PivotRow> = days
        .into_iter()
        .map(|(day, bucket)| {
            let expense: Vec<Money> = expense_columns
                .iter()
                .map(|column| bucket.expense.get(column))
                .collect();
            let profit: Vec<Money> = profit_columns
                .iter()
                .map(|column| bucket.profit.get(column))
                .collect();
            let total_expense: Money = expense.iter().sum();
            let total_income: Money = profit.iter().sum();
            let net_margin = total_income - total_expense;

            for (total, cell) in totals.expense.iter_mut().zip(&expense) {
                *total += *cell;
            }
            for (total, cell) in totals.profit.iter_mut().zip(&profit) {
                *total += *cell;
            }
            totals.total_expense += total_expense;
            totals.total_income += total_income;
            totals.net_margin += net_margin;

            PivotRow {
                day,
                expense,
                total_expense,
                profit,
                total_income,
                net_margin,
            }
        })
        .collect();

    debug_assert_eq!(
        totals.net_margin,
        totals.total_income - totals.total_expense
    );

    PivotReport {
        expense_columns,
        profit_columns,
        rows,
        totals,
    }
}
