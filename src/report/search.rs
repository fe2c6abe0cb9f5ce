use chrono::NaiveDate;

use crate::ledger::Transaction;

/// Keeps the transactions whose category or amount contains `query`
/// (case-insensitive) and, when `day` is given, that fall on that day.
/// Input order is preserved.
pub fn filter<'a>(
    transactions: &'a [Transaction],
    query: &str,
    day: Option<NaiveDate>,
) -> Vec<&'a Transaction> {
    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|txn| matches_text(txn, &needle) && day.map_or(true, |day| txn.day() == day))
        .collect()
}

fn matches_text(txn: &Transaction, needle: &str) -> bool {
    needle.is_empty()
        || txn.category.to_lowercase().contains(needle)
        || txn.amount.to_decimal_string().contains(needle)
}
