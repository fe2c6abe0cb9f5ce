mod common;

use bizledger::{EntryType, LedgerError, Money, RenameOutcome};
use common::{clock, memory_manager};

#[test]
fn rename_relabels_history_of_the_same_type_only() {
    let (mut manager, _) = memory_manager();
    manager.add_category(EntryType::Profit, "Other").unwrap();
    manager
        .add_transaction("50", EntryType::Expense, "Other", "2024-03-01")
        .unwrap();
    manager
        .add_transaction("70", EntryType::Profit, "Other", "2024-03-01")
        .unwrap();
    manager
        .add_transaction("20", EntryType::Expense, "Milk", "2024-03-02")
        .unwrap();

    let outcome = manager
        .rename_category(EntryType::Expense, "Other", "Misc")
        .unwrap();
    assert_eq!(outcome, RenameOutcome::Renamed { relabeled: 1 });

    let labels: Vec<(EntryType, &str)> = manager
        .list_transactions()
        .iter()
        .map(|t| (t.entry_type, t.category.as_str()))
        .collect();
    assert_eq!(
        labels,
        [
            (EntryType::Expense, "Misc"),
            (EntryType::Profit, "Other"),
            (EntryType::Expense, "Milk"),
        ]
    );
    assert_eq!(
        manager.categories(EntryType::Expense),
        ["Milk", "Fruits", "Vegetables", "Rent", "Misc"]
    );
}

#[test]
fn renamed_history_shows_up_under_the_new_pivot_column() {
    let (mut manager, _) = memory_manager();
    manager
        .add_transaction("100", EntryType::Expense, "Vegetables", "2024-03-01")
        .unwrap();
    manager
        .rename_category(EntryType::Expense, "Vegetables", "Veg")
        .unwrap();
    let report = manager.pivot();
    assert_eq!(report.expense_columns, ["Veg"]);
    assert_eq!(report.totals.total_expense, Money::from_major(100));
}

#[test]
fn rename_survives_reload_for_both_blobs() {
    let (mut manager, storage) = memory_manager();
    manager
        .add_transaction("10", EntryType::Expense, "Fruits", "2024-03-01")
        .unwrap();
    manager
        .rename_category(EntryType::Expense, "Fruits", "Fresh Fruit")
        .unwrap();
    drop(manager);

    let reloaded = bizledger::LedgerManager::load(storage, clock()).unwrap();
    assert_eq!(reloaded.list_transactions()[0].category, "Fresh Fruit");
    assert!(reloaded
        .categories(EntryType::Expense)
        .contains(&"Fresh Fruit".to_string()));
    assert!(!reloaded.list_transactions().iter().any(|t| reloaded.is_orphaned(t)));
}

#[test]
fn rename_edge_cases_are_no_ops_or_rejected() {
    let (mut manager, _) = memory_manager();
    manager
        .add_transaction("10", EntryType::Expense, "Milk", "2024-03-01")
        .unwrap();
    let before = manager.category_catalog().clone();

    for (old, new) in [("Milk", "Milk"), ("Milk", "   "), ("Bread", "Loaves")] {
        let outcome = manager.rename_category(EntryType::Expense, old, new).unwrap();
        assert_eq!(outcome, RenameOutcome::Unchanged, "{old} -> {new}");
    }
    let err = manager
        .rename_category(EntryType::Expense, "Milk", "Rent")
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    assert_eq!(manager.category_catalog(), &before);
    assert_eq!(manager.list_transactions()[0].category, "Milk");
}

#[test]
fn deleting_a_category_orphans_but_keeps_history() {
    let (mut manager, _) = memory_manager();
    let rent = manager
        .add_transaction("5000", EntryType::Expense, "Rent", "2024-03-01")
        .unwrap();
    assert!(manager.delete_category(EntryType::Expense, "Rent").unwrap());
    assert!(!manager.delete_category(EntryType::Expense, "Rent").unwrap());

    let stored = manager.transaction_store().get(rent.id).unwrap();
    assert_eq!(stored.category, "Rent");
    assert!(manager.is_orphaned(stored));
    assert_eq!(manager.orphaned_categories(EntryType::Expense), ["Rent"]);
    assert!(manager.orphaned_categories(EntryType::Profit).is_empty());

    let report = manager.pivot();
    assert_eq!(report.expense_columns, ["Rent"]);
    assert_eq!(report.totals.total_expense, Money::from_major(5000));
}

#[test]
fn re_adding_a_deleted_name_adopts_orphaned_history() {
    let (mut manager, _) = memory_manager();
    manager
        .add_transaction("5", EntryType::Expense, "Rent", "2024-03-01")
        .unwrap();
    manager.delete_category(EntryType::Expense, "Rent").unwrap();
    assert!(manager.add_category(EntryType::Expense, "Rent").unwrap());
    assert!(manager.orphaned_categories(EntryType::Expense).is_empty());
    assert_eq!(manager.categories(EntryType::Expense).last().unwrap(), "Rent");
}

#[test]
fn adding_blank_or_duplicate_names_is_ignored() {
    let (mut manager, _) = memory_manager();
    assert!(!manager.add_category(EntryType::Profit, "  ").unwrap());
    assert!(!manager.add_category(EntryType::Profit, "Cash Sale").unwrap());
    assert!(manager.add_category(EntryType::Profit, " Catering ").unwrap());
    assert_eq!(
        manager.categories(EntryType::Profit),
        ["Online Payment", "Cash Sale", "Catering"]
    );
}
