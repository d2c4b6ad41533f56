// Statement module - read-only view of the transaction history

use crate::ledger::{Amount, Ledger, Transaction, TransactionKind};
use chrono::NaiveDate;
use std::fmt::Write as _;

/// One printable line of a statement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementRow {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub date: String,
    pub time: String,
}

impl StatementRow {
    fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            kind: transaction.kind(),
            amount: transaction.amount(),
            date: transaction.formatted_date(),
            time: transaction.formatted_time(),
        }
    }
}

/// Account statement: the history in insertion order plus totals
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    rows: Vec<StatementRow>,
    total_deposited: Amount,
    total_withdrawn: Amount,
    balance: Amount,
}

impl Statement {
    /// Statement over the full history
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self::build(ledger.transactions().iter(), ledger.balance())
    }

    /// Statement restricted to one calendar day
    ///
    /// The balance shown is still the current balance.
    pub fn for_date(ledger: &Ledger, date: NaiveDate) -> Self {
        Self::build(ledger.transactions_on(date).into_iter(), ledger.balance())
    }

    fn build<'a>(transactions: impl Iterator<Item = &'a Transaction>, balance: Amount) -> Self {
        let rows: Vec<StatementRow> = transactions.map(StatementRow::from_transaction).collect();
        let total_of = |kind: TransactionKind| -> Amount {
            rows.iter().filter(|r| r.kind == kind).map(|r| r.amount).sum()
        };
        let total_deposited = total_of(TransactionKind::Deposit);
        let total_withdrawn = total_of(TransactionKind::Withdrawal);

        Self {
            rows,
            total_deposited,
            total_withdrawn,
            balance,
        }
    }

    pub fn rows(&self) -> &[StatementRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_deposited(&self) -> Amount {
        self.total_deposited
    }

    pub fn total_withdrawn(&self) -> Amount {
        self.total_withdrawn
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Fixed-width text table
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<10} {:>16} {:<12} {:<8}", "TYPE", "AMOUNT", "DATE", "TIME");

        if self.rows.is_empty() {
            let _ = writeln!(out, "No transactions");
        }
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{:<10} {:>16} {:<12} {:<8}",
                row.kind.label(),
                row.amount.to_currency_string(),
                row.date,
                row.time
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{:<10} {:>16}", "Deposited", self.total_deposited.to_currency_string());
        let _ = writeln!(out, "{:<10} {:>16}", "Withdrawn", self.total_withdrawn.to_currency_string());
        let _ = writeln!(out, "{:<10} {:>16}", "Balance", self.balance.to_currency_string());
        out
    }
}
