// Ledger - snapshot of the account: current balance plus full history

use crate::ledger::{Amount, Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The pair (balance, transaction history) as loaded from a store
///
/// A snapshot is taken at the start of every operation and discarded at
/// the end of it; it is never cached across operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    balance: Amount,
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create a ledger from its two documents
    pub fn new(balance: Amount, transactions: Vec<Transaction>) -> Self {
        Self {
            balance,
            transactions,
        }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Full history in insertion (chronological) order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Withdrawals dated on the given calendar day
    pub fn withdrawals_on(&self, date: NaiveDate) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.is_withdrawal() && t.date() == date)
            .count()
    }

    /// Transactions dated on the given calendar day, in order
    pub fn transactions_on(&self, date: NaiveDate) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.date() == date).collect()
    }

    /// Sum of all amounts of one kind
    pub fn total(&self, kind: TransactionKind) -> Amount {
        self.transactions
            .iter()
            .filter(|t| t.kind() == kind)
            .map(|t| t.amount())
            .sum()
    }

    /// Balance obtained by replaying the history from zero
    ///
    /// Signed, so a history that withdrew more than it deposited shows up
    /// as a negative number instead of being clamped.
    pub fn replayed_balance(&self) -> Decimal {
        self.transactions.iter().fold(Decimal::ZERO, |acc, t| match t.kind() {
            TransactionKind::Deposit => acc.saturating_add(t.amount().value()),
            TransactionKind::Withdrawal => acc.saturating_sub(t.amount().value()),
        })
    }

    /// Whether the stored balance equals the replayed history
    pub fn is_consistent(&self) -> bool {
        self.replayed_balance() == self.balance.value()
    }

    pub(crate) fn into_parts(self) -> (Amount, Vec<Transaction>) {
        (self.balance, self.transactions)
    }
}
