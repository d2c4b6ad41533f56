// LedgerStore - the persistence seam the rules engine reads and writes through

use crate::ledger::{Amount, Ledger, Transaction};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from storage operations
///
/// Only writes surface errors; a document that cannot be read is treated
/// as absent and its default is used instead. A write never replaces a
/// document that exists but cannot be parsed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Refusing to overwrite malformed document {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Persistent home of the two ledger documents
///
/// Each save overwrites its whole document. The two documents are written
/// independently, so there is no atomicity across them.
pub trait LedgerStore {
    /// Persisted balance, or zero if there is none
    fn load_balance(&self) -> Amount;

    /// Persisted history in insertion order, or empty if there is none
    ///
    /// Entries that cannot be read are skipped; the rest are returned.
    fn load_transactions(&self) -> Vec<Transaction>;

    /// Overwrite the persisted balance
    fn save_balance(&mut self, balance: Amount) -> Result<(), StoreError>;

    /// Overwrite the persisted history
    ///
    /// Entries the store could not read on load are kept where they were.
    fn save_transactions(&mut self, transactions: &[Transaction]) -> Result<(), StoreError>;

    /// Load both documents as one snapshot
    fn load_ledger(&self) -> Ledger {
        Ledger::new(self.load_balance(), self.load_transactions())
    }
}
