// MemoryStore - in-memory ledger documents with write-failure injection

use crate::ledger::{Amount, Transaction};
use crate::storage::{LedgerStore, StoreError};
use std::io;

/// Ledger store that keeps both documents in memory
///
/// Starts empty (zero balance, no history) unless seeded. Writes can be
/// configured to fail so callers can exercise their save-error paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    balance: Option<Amount>,
    transactions: Option<Vec<Transaction>>,
    fail_balance_writes: bool,
    fail_transaction_writes: bool,
    balance_writes: usize,
    transaction_writes: usize,
}

impl MemoryStore {
    /// Create an empty store (no documents)
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the balance document
    pub fn with_balance(mut self, balance: Amount) -> Self {
        self.balance = Some(balance);
        self
    }

    /// Seed the transactions document
    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    /// Make every balance write fail
    pub fn with_failing_balance_writes(mut self) -> Self {
        self.fail_balance_writes = true;
        self
    }

    /// Make every transactions write fail
    pub fn with_failing_transaction_writes(mut self) -> Self {
        self.fail_transaction_writes = true;
        self
    }

    /// Toggle balance write failures after construction
    pub fn set_fail_balance_writes(&mut self, fail: bool) {
        self.fail_balance_writes = fail;
    }

    /// Toggle transactions write failures after construction
    pub fn set_fail_transaction_writes(&mut self, fail: bool) {
        self.fail_transaction_writes = fail;
    }

    /// Whether a balance document exists
    pub fn has_balance_document(&self) -> bool {
        self.balance.is_some()
    }

    /// Whether a transactions document exists
    pub fn has_transactions_document(&self) -> bool {
        self.transactions.is_some()
    }

    /// Number of successful balance writes
    pub fn balance_writes(&self) -> usize {
        self.balance_writes
    }

    /// Number of successful transactions writes
    pub fn transaction_writes(&self) -> usize {
        self.transaction_writes
    }

    fn simulated_failure(document: &str) -> StoreError {
        StoreError::io(
            format!("memory:{}", document),
            io::Error::new(io::ErrorKind::Other, "simulated write failure"),
        )
    }
}

impl LedgerStore for MemoryStore {
    fn load_balance(&self) -> Amount {
        self.balance.unwrap_or(Amount::ZERO)
    }

    fn load_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone().unwrap_or_default()
    }

    fn save_balance(&mut self, balance: Amount) -> Result<(), StoreError> {
        if self.fail_balance_writes {
            return Err(Self::simulated_failure("balance"));
        }
        self.balance = Some(balance);
        self.balance_writes += 1;
        Ok(())
    }

    fn save_transactions(&mut self, transactions: &[Transaction]) -> Result<(), StoreError> {
        if self.fail_transaction_writes {
            return Err(Self::simulated_failure("transactions"));
        }
        self.transactions = Some(transactions.to_vec());
        self.transaction_writes += 1;
        Ok(())
    }
}
