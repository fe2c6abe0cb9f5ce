use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::currency::Money;
use crate::errors::LedgerError;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryType {
    Expense,
    Profit,
}

impl EntryType {
    pub const ALL: [EntryType; 2] = [EntryType::Expense, EntryType::Profit];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Expense => "Expense",
            EntryType::Profit => "Profit",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "exp" => Ok(EntryType::Expense),
            "profit" | "income" | "inc" => Ok(EntryType::Profit),
            other => Err(LedgerError::validation(format!(
                "unknown entry type `{other}` (expected expense or profit)"
            ))),
        }
    }
}

/// A single recorded income or expense event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub date: DateTime<FixedOffset>,
    pub amount: Money,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
}

impl Transaction {
    /// Calendar day the entry belongs to, in the offset it was recorded with.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn is_profit(&self) -> bool {
        self.entry_type == EntryType::Profit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: 1_704_103_200_000,
            date: DateTime::parse_from_rfc3339("2024-01-01T23:30:00+05:30").unwrap(),
            amount: Money::from_major(50),
            entry_type: EntryType::Expense,
            category: "Milk".into(),
        }
    }

    #[test]
    fn day_uses_recorded_offset() {
        let txn = sample();
        assert_eq!(txn.day(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "Expense");
        assert_eq!(json["amount"], "50");
        assert_eq!(json["category"], "Milk");
        assert!(json["date"].as_str().unwrap().starts_with("2024-01-01T23:30:00"));
    }

    #[test]
    fn reads_browser_style_records() {
        let raw = r#"{"id":1704067200000,"date":"2024-01-01T00:00:00.000Z","amount":"150","type":"Profit","category":"Cash Sale"}"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(txn.amount, Money::from_major(150));
        assert!(txn.is_profit());
    }

    #[test]
    fn entry_type_parses_aliases() {
        assert_eq!("Expense".parse::<EntryType>().unwrap(), EntryType::Expense);
        assert_eq!("income".parse::<EntryType>().unwrap(), EntryType::Profit);
        assert!("transfer".parse::<EntryType>().is_err());
    }
}
