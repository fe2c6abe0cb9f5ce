use serde::{Deserialize, Serialize};

use super::transaction::EntryType;

const DEFAULT_EXPENSE: [&str; 5] = ["Milk", "Fruits", "Vegetables", "Rent", "Other"];
const DEFAULT_PROFIT: [&str; 2] = ["Online Payment", "Cash Sale"];

/// Category names available for new entries, kept per entry type in
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCatalog {
    #[serde(rename = "Expense", default)]
    expense: Vec<String>,
    #[serde(rename = "Profit", default)]
    profit: Vec<String>,
}

impl CategoryCatalog {
    pub fn empty() -> Self {
        Self {
            expense: Vec::new(),
            profit: Vec::new(),
        }
    }

    pub fn names(&self, entry_type: EntryType) -> &[String] {
        match entry_type {
            EntryType::Expense => &self.expense,
            EntryType::Profit => &self.profit,
        }
    }

    fn names_mut(&mut self, entry_type: EntryType) -> &mut Vec<String> {
        match entry_type {
            EntryType::Expense => &mut self.expense,
            EntryType::Profit => &mut self.profit,
        }
    }

    pub fn contains(&self, entry_type: EntryType, name: &str) -> bool {
        self.names(entry_type).iter().any(|existing| existing == name)
    }

    pub fn position(&self, entry_type: EntryType, name: &str) -> Option<usize> {
        self.names(entry_type)
            .iter()
            .position(|existing| existing == name)
    }

    /// Appends `name` unless it is blank or already listed.
    pub fn push(&mut self, entry_type: EntryType, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(entry_type, name) {
            return false;
        }
        self.names_mut(entry_type).push(name.to_string());
        true
    }

    /// Replaces the entry at `index` in place.
    pub fn replace_at(&mut self, entry_type: EntryType, index: usize, name: &str) {
        if let Some(slot) = self.names_mut(entry_type).get_mut(index) {
            *slot = name.to_string();
        }
    }

    pub fn remove(&mut self, entry_type: EntryType, name: &str) -> bool {
        let names = self.names_mut(entry_type);
        let before = names.len();
        names.retain(|existing| existing != name);
        names.len() != before
    }

    /// Drops blank names and repeated names (first occurrence wins).
    /// Returns the number of entries removed.
    pub fn normalize(&mut self) -> usize {
        let mut removed = 0;
        for entry_type in EntryType::ALL {
            let names = self.names_mut(entry_type);
            let mut kept: Vec<String> = Vec::with_capacity(names.len());
            for name in names.drain(..) {
                let trimmed = name.trim();
                if trimmed.is_empty() || kept.iter().any(|existing| existing == trimmed) {
                    removed += 1;
                    continue;
                }
                kept.push(trimmed.to_string());
            }
            *names = kept;
        }
        removed
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self {
            expense: DEFAULT_EXPENSE.iter().map(|name| name.to_string()).collect(),
            profit: DEFAULT_PROFIT.iter().map(|name| name.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_starter_taxonomy() {
        let catalog = CategoryCatalog::default();
        assert_eq!(
            catalog.names(EntryType::Expense),
            ["Milk", "Fruits", "Vegetables", "Rent", "Other"]
        );
        assert_eq!(
            catalog.names(EntryType::Profit),
            ["Online Payment", "Cash Sale"]
        );
    }

    #[test]
    fn push_trims_and_rejects_duplicates() {
        let mut catalog = CategoryCatalog::empty();
        assert!(catalog.push(EntryType::Expense, "  Snacks "));
        assert!(!catalog.push(EntryType::Expense, "Snacks"));
        assert!(!catalog.push(EntryType::Expense, "   "));
        assert!(catalog.push(EntryType::Expense, "snacks"));
        assert!(catalog.push(EntryType::Profit, "Snacks"));
        assert_eq!(catalog.names(EntryType::Expense), ["Snacks", "snacks"]);
    }

    #[test]
    fn normalize_removes_blank_and_repeated_names() {
        let mut catalog: CategoryCatalog =
            serde_json::from_str(r#"{"Expense":["Rent"," ","Rent","Milk "],"Profit":[]}"#)
                .unwrap();
        assert_eq!(catalog.normalize(), 2);
        assert_eq!(catalog.names(EntryType::Expense), ["Rent", "Milk"]);
    }

    #[test]
    fn missing_type_key_loads_as_empty_list() {
        let catalog: CategoryCatalog = serde_json::from_str(r#"{"Expense":["Rent"]}"#).unwrap();
        assert!(catalog.names(EntryType::Profit).is_empty());
    }
}
