// Scenario Tests
// End-to-end sequences against an on-disk JSON store

use chrono::NaiveDate;
use qarbank::ledger::{Amount, Clock, FixedClock, Transaction, TransactionKind};
use qarbank::rules::{RulesError, TransactionEngine};
use qarbank::storage::{JsonFileStore, LedgerStore, StoreError};
use std::fs;
use tempfile::TempDir;

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
    )
}

fn engine_in(dir: &TempDir) -> TransactionEngine<JsonFileStore, FixedClock> {
    TransactionEngine::with_clock(JsonFileStore::open(dir.path()).unwrap(), clock())
}

#[test]
fn test_drain_account_then_insufficient_funds() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = engine_in(&temp_dir);
    engine.store_mut().save_balance(Amount::from_reais(1000)).unwrap();

    let first = engine.withdraw(Amount::from_reais(500)).unwrap();
    assert_eq!(first.balance(), Amount::from_reais(500));
    assert_eq!(engine.ledger().transaction_count(), 1);

    let second = engine.withdraw(Amount::from_reais(500)).unwrap();
    assert_eq!(second.balance(), Amount::ZERO);
    assert_eq!(engine.ledger().transaction_count(), 2);

    let third = engine.withdraw(Amount::from_reais(1));
    assert!(matches!(third, Err(RulesError::InsufficientFunds { .. })));
    assert_eq!(engine.balance(), Amount::ZERO);
    assert_eq!(engine.ledger().transaction_count(), 2);

    let kinds: Vec<TransactionKind> = engine
        .ledger()
        .transactions()
        .iter()
        .map(|t| t.kind())
        .collect();
    assert_eq!(kinds, vec![TransactionKind::Withdrawal, TransactionKind::Withdrawal]);
}

#[test]
fn test_three_withdrawals_logged_today_block_a_fourth() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = engine_in(&temp_dir);
    let today = clock().today();
    let history: Vec<Transaction> = (7..10)
        .map(|h| Transaction::withdrawal(Amount::from_reais(5), today.and_hms_opt(h, 0, 0).unwrap()))
        .collect();
    engine.store_mut().save_balance(Amount::from_reais(10_000)).unwrap();
    engine.store_mut().save_transactions(&history).unwrap();

    let result = engine.withdraw(Amount::from_reais(10));

    assert!(matches!(result, Err(RulesError::DailyLimitExceeded { .. })));
    assert_eq!(engine.balance(), Amount::from_reais(10_000));
    assert_eq!(engine.ledger().transaction_count(), 3);
}

#[test]
fn test_mixed_sequence_keeps_balance_equal_to_history() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = engine_in(&temp_dir);

    let operations: [(bool, u64); 12] = [
        (true, 100_000),
        (false, 25_050),
        (false, 60_000),
        (true, 1),
        (false, 9_999),
        (false, 10_000),
        (true, 7_525),
        (false, 500_000),
        (false, 1),
        (true, 0),
        (false, 0),
        (true, 42),
    ];

    for (is_deposit, cents) in operations {
        let amount = Amount::from_cents(cents);
        let _ = if is_deposit {
            engine.deposit(amount)
        } else {
            engine.withdraw(amount)
        };
        engine.clock().advance_days(1);

        let ledger = engine.ledger();
        assert!(ledger.is_consistent(), "drift after {:?}", (is_deposit, cents));
    }

    let ledger = engine.ledger();
    let deposited = ledger.total(TransactionKind::Deposit);
    let withdrawn = ledger.total(TransactionKind::Withdrawal);
    assert_eq!(deposited.checked_sub(withdrawn), Some(ledger.balance()));
}

#[test]
fn test_state_is_shared_through_the_files() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in(&temp_dir);
        engine.deposit(Amount::from_reais(300)).unwrap();
        engine.withdraw(Amount::from_reais(100)).unwrap();
    }

    // A second engine on the same directory sees the same ledger and the
    // same withdrawal count for the day
    let mut engine = engine_in(&temp_dir);
    assert_eq!(engine.balance(), Amount::from_reais(200));
    assert_eq!(engine.withdrawals_remaining_today(), 2);

    engine.withdraw(Amount::from_reais(50)).unwrap();
    engine.withdraw(Amount::from_reais(50)).unwrap();
    assert!(matches!(
        engine.withdraw(Amount::from_reais(50)),
        Err(RulesError::DailyLimitExceeded { .. })
    ));
}

#[test]
fn test_foreign_entry_neither_hides_withdrawals_nor_gets_erased() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = engine_in(&temp_dir);
    let transactions_path = engine.store().transactions_path().to_path_buf();
    engine.store_mut().save_balance(Amount::from_reais(1000)).unwrap();
    fs::write(
        &transactions_path,
        r#"{"transacoes": [
            {"tipo": "SAQUE", "valor": 10.0, "data": "18/10/2026", "hora": "07:00:00"},
            {"tipo": "SAQUE", "valor": 10.0, "data": "18/10/2026", "hora": "08:00:00"},
            {"tipo": "DEPÓSITO", "valor": 30.0, "data": "18/10/2026", "hora": "08:30:00"},
            {"tipo": "SAQUE", "valor": 10.0, "data": "18/10/2026", "hora": "09:00:00"}
        ]}"#,
    )
    .unwrap();

    let result = engine.withdraw(Amount::from_reais(10));
    assert!(matches!(result, Err(RulesError::DailyLimitExceeded { limit: 3 })));
    assert_eq!(engine.balance(), Amount::from_reais(1000));

    engine.deposit(Amount::from_reais(5)).unwrap();

    let text = fs::read_to_string(&transactions_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = value["transacoes"].as_array().unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[2]["tipo"], "DEPÓSITO");
    assert_eq!(entries[4]["tipo"], "DEPOSITO");
    assert_eq!(engine.ledger().transaction_count(), 4);
}

#[test]
fn test_malformed_balance_document_blocks_commits() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = engine_in(&temp_dir);
    let balance_path = engine.store().balance_path().to_path_buf();
    fs::write(&balance_path, "{\"saldo\": \"lots\"}").unwrap();

    let result = engine.deposit(Amount::from_reais(20));

    assert!(matches!(
        result,
        Err(RulesError::Storage(StoreError::Malformed { .. }))
    ));
    assert_eq!(fs::read_to_string(&balance_path).unwrap(), "{\"saldo\": \"lots\"}");
    assert!(engine.ledger().is_empty());
}

#[test]
fn test_malformed_history_document_restores_balance() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = engine_in(&temp_dir);
    engine.store_mut().save_balance(Amount::from_reais(80)).unwrap();
    let transactions_path = engine.store().transactions_path().to_path_buf();
    fs::write(&transactions_path, "{\"transacoes\": [").unwrap();

    let result = engine.withdraw(Amount::from_reais(30));

    assert!(matches!(
        result,
        Err(RulesError::Storage(StoreError::Malformed { .. }))
    ));
    assert_eq!(engine.balance(), Amount::from_reais(80));
    assert_eq!(fs::read_to_string(&transactions_path).unwrap(), "{\"transacoes\": [");
}
