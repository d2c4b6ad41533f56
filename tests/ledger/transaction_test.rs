// Transaction and Ledger Tests
// Record construction, wire format and ledger snapshot queries

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use qarbank::ledger::{Amount, Clock, FixedClock, Ledger, Transaction, TransactionKind};

fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[test]
fn test_withdrawal_is_stamped_with_date_and_time() {
    let tx = Transaction::withdrawal(Amount::from_reais(50), at(18, 14, 3, 22));

    assert_eq!(tx.kind(), TransactionKind::Withdrawal);
    assert_eq!(tx.amount(), Amount::from_reais(50));
    assert_eq!(tx.date(), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    assert_eq!(tx.time(), NaiveTime::from_hms_opt(14, 3, 22).unwrap());
    assert_eq!(tx.formatted_date(), "18/10/2026");
    assert_eq!(tx.formatted_time(), "14:03:22");
}

#[test]
fn test_kind_labels() {
    assert_eq!(TransactionKind::Withdrawal.label(), "SAQUE");
    assert_eq!(TransactionKind::Deposit.label(), "DEPOSITO");
    assert_eq!(TransactionKind::Withdrawal.to_string(), "SAQUE");
}

#[test]
fn test_json_uses_document_field_names() {
    let tx = Transaction::deposit(Amount::from_cents(10_050), at(1, 8, 0, 0));
    let value = serde_json::to_value(&tx).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "tipo": "DEPOSITO",
            "valor": 100.5,
            "data": "01/10/2026",
            "hora": "08:00:00"
        })
    );
}

#[test]
fn test_json_rejects_unknown_kind() {
    let raw = r#"{"tipo": "PIX", "valor": 1.0, "data": "01/10/2026", "hora": "08:00:00"}"#;
    assert!(serde_json::from_str::<Transaction>(raw).is_err());
}

#[test]
fn test_json_rejects_iso_date() {
    let raw = r#"{"tipo": "SAQUE", "valor": 1.0, "data": "2026-10-01", "hora": "08:00:00"}"#;
    assert!(serde_json::from_str::<Transaction>(raw).is_err());
}

// ============================================================================
// LEDGER
// ============================================================================

#[test]
fn test_ledger_totals_by_kind() {
    let ledger = Ledger::new(
        Amount::from_reais(125),
        vec![
            Transaction::deposit(Amount::from_reais(200), at(1, 9, 0, 0)),
            Transaction::withdrawal(Amount::from_reais(50), at(2, 9, 0, 0)),
            Transaction::withdrawal(Amount::from_reais(25), at(3, 9, 0, 0)),
        ],
    );

    assert_eq!(ledger.total(TransactionKind::Deposit), Amount::from_reais(200));
    assert_eq!(ledger.total(TransactionKind::Withdrawal), Amount::from_reais(75));
    assert!(ledger.is_consistent());
}

#[test]
fn test_ledger_preserves_insertion_order() {
    let first = Transaction::deposit(Amount::from_reais(1), at(5, 9, 0, 0));
    let second = Transaction::deposit(Amount::from_reais(2), at(4, 9, 0, 0));
    let ledger = Ledger::new(Amount::from_reais(3), vec![first.clone(), second.clone()]);

    assert_eq!(ledger.transactions(), &[first, second]);
}

#[test]
fn test_ledger_transactions_on() {
    let ledger = Ledger::new(
        Amount::ZERO,
        vec![
            Transaction::deposit(Amount::from_reais(10), at(1, 9, 0, 0)),
            Transaction::withdrawal(Amount::from_reais(10), at(2, 9, 0, 0)),
        ],
    );

    let day = NaiveDate::from_ymd_opt(2026, 10, 2).unwrap();
    let on_day = ledger.transactions_on(day);
    assert_eq!(on_day.len(), 1);
    assert!(on_day[0].is_withdrawal());
}

// ============================================================================
// CLOCK
// ============================================================================

#[test]
fn test_fixed_clock_advances_by_days() {
    let clock = FixedClock::new(at(30, 23, 59, 59));
    clock.advance_days(2);

    assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
    assert_eq!(clock.now().time(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
}
