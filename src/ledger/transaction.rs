// Transaction record - one committed deposit or withdrawal

use crate::ledger::Amount;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used in the transactions document (`18/10/2026`)
pub(crate) const DATE_FORMAT: &str = "%d/%m/%Y";

/// Time format used in the transactions document (`14:03:22`)
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";

/// Kind of a ledger movement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "DEPOSITO")]
    Deposit,
    #[serde(rename = "SAQUE")]
    Withdrawal,
}

impl TransactionKind {
    /// Label stored in the `tipo` field and shown on the statement
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSITO",
            TransactionKind::Withdrawal => "SAQUE",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable entry of the transaction history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "tipo")]
    kind: TransactionKind,
    #[serde(rename = "valor")]
    amount: Amount,
    #[serde(rename = "data", with = "date_format")]
    date: NaiveDate,
    #[serde(rename = "hora", with = "time_format")]
    time: NaiveTime,
}

impl Transaction {
    /// Create a transaction stamped at the given local instant
    pub fn new(kind: TransactionKind, amount: Amount, at: NaiveDateTime) -> Self {
        Self {
            kind,
            amount,
            date: at.date(),
            time: at.time(),
        }
    }

    /// Create a deposit stamped at the given local instant
    pub fn deposit(amount: Amount, at: NaiveDateTime) -> Self {
        Self::new(TransactionKind::Deposit, amount, at)
    }

    /// Create a withdrawal stamped at the given local instant
    pub fn withdrawal(amount: Amount, at: NaiveDateTime) -> Self {
        Self::new(TransactionKind::Withdrawal, amount, at)
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TransactionKind::Withdrawal
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == TransactionKind::Deposit
    }

    /// `DD/MM/YYYY`
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// `HH:MM:SS`
    pub fn formatted_time(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod time_format {
    use super::TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
