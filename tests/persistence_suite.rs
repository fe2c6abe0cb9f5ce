mod common;

use std::fs;

use bizledger::{
    storage::{JsonStorage, StateKey, StorageBackend},
    EntryType, LedgerError, Money,
};
use common::{json_manager, memory_manager, open_json, temp_dir};

#[test]
fn json_storage_round_trips_all_three_blobs() {
    let (mut manager, dir) = json_manager();
    manager
        .add_transaction("12.5", EntryType::Expense, "Milk", "2024-06-01")
        .unwrap();
    manager.add_category(EntryType::Profit, "Catering").unwrap();
    manager.set_business_name("Sharma Dairy").unwrap();
    drop(manager);

    let reloaded = open_json(&dir);
    assert_eq!(reloaded.list_transactions().len(), 1);
    assert_eq!(reloaded.list_transactions()[0].amount, Money::from_minor(1_250));
    assert!(reloaded
        .categories(EntryType::Profit)
        .contains(&"Catering".to_string()));
    assert_eq!(reloaded.business_name(), "Sharma Dairy");

    let raw = fs::read_to_string(dir.join("transactions.json")).unwrap();
    assert!(raw.contains("\"amount\": \"12.50\"") || raw.contains("\"amount\":\"12.50\""));
    assert!(raw.contains("\"type\""));
    assert_eq!(
        fs::read_to_string(dir.join("businessName.txt")).unwrap(),
        "Sharma Dairy"
    );
}

#[test]
fn legacy_numeric_amounts_are_accepted() {
    let dir = temp_dir().join("legacy");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("transactions.json"),
        r#"[{"id":1700000000000,"date":"2024-01-01T10:00:00+05:30","amount":150,"type":"Expense","category":"Milk"},
            {"id":1700000000001,"date":"2024-01-01T11:00:00+05:30","amount":12.5,"type":"Profit","category":"Cash Sale"}]"#,
    )
    .unwrap();

    let manager = open_json(&dir);
    let amounts: Vec<Money> = manager.list_transactions().iter().map(|t| t.amount).collect();
    assert_eq!(amounts, [Money::from_major(150), Money::from_minor(1_250)]);
}

#[test]
fn corrupt_blob_is_reported_as_persistence_error() {
    let dir = temp_dir().join("corrupt");
    let storage = JsonStorage::new(Some(dir.clone())).unwrap();
    fs::write(storage.path_for(StateKey::Categories), "{ not json").unwrap();

    let err = storage.load_categories().unwrap_err();
    assert!(err.is_persistence(), "{err}");
}

#[test]
fn failed_write_keeps_memory_and_previous_file() {
    let (mut manager, dir) = json_manager();
    manager
        .add_transaction("10", EntryType::Expense, "Milk", "2024-06-01")
        .unwrap();
    let path = dir.join("transactions.json");
    let saved = fs::read_to_string(&path).unwrap();

    fs::create_dir_all(dir.join("transactions.json.tmp")).unwrap();
    let err = manager
        .add_transaction("20", EntryType::Expense, "Milk", "2024-06-02")
        .unwrap_err();
    assert!(err.is_persistence(), "{err}");

    assert_eq!(manager.list_transactions().len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), saved);
}

#[test]
fn failed_rename_write_keeps_cascade_in_memory() {
    let (mut manager, storage) = memory_manager();
    manager
        .add_transaction("10", EntryType::Expense, "Milk", "2024-06-01")
        .unwrap();
    storage.set_fail_writes(true);

    let err = manager
        .rename_category(EntryType::Expense, "Milk", "Dairy")
        .unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));
    assert_eq!(manager.list_transactions()[0].category, "Dairy");
    assert!(manager
        .categories(EntryType::Expense)
        .contains(&"Dairy".to_string()));

    let persisted = storage.raw(StateKey::Transactions).unwrap();
    assert!(persisted.contains("Milk"));
}

#[test]
fn invalid_persisted_amounts_fail_the_load() {
    for amount in [r#""-50""#, "-50", "0", r#""0.00""#, "12.345", r#""90000000000000000""#] {
        let dir = temp_dir().join("invalid");
        fs::create_dir_all(&dir).unwrap();
        let record = format!(
            r#"[{{"id":1,"date":"2024-01-01T10:00:00+05:30","amount":{amount},"type":"Expense","category":"Milk"}}]"#
        );
        fs::write(dir.join("transactions.json"), record).unwrap();

        let storage = JsonStorage::new(Some(dir)).unwrap();
        let err = bizledger::LedgerManager::load(std::sync::Arc::new(storage), common::clock())
            .err()
            .unwrap_or_else(|| panic!("amount {amount} must be rejected"));
        assert!(err.is_persistence(), "{amount}: {err}");
    }
}
