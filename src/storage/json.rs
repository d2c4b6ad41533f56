// JsonFileStore - the two ledger documents as JSON files on disk
//
// Layout, one file per document:
// - saldo.json      {"saldo": 1250.0}
// - transacoes.json {"transacoes": [{"tipo": "SAQUE", "valor": 50.0,
//                                    "data": "18/10/2026", "hora": "14:03:22"}]}
//
// History entries are read one by one. An entry that does not parse is
// skipped on load and written back untouched, at the same position, on save.

use crate::ledger::{Amount, Transaction};
use crate::storage::{LedgerStore, StoreError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default file name of the balance document
pub const BALANCE_FILE: &str = "saldo.json";

/// Default file name of the transactions document
pub const TRANSACTIONS_FILE: &str = "transacoes.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct BalanceDocument {
    #[serde(default)]
    saldo: Amount,
}

#[derive(Debug, Default, Deserialize)]
struct TransactionsDocument {
    #[serde(default)]
    transacoes: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct TransactionsDocumentRef<'a> {
    transacoes: Vec<HistoryEntry<'a>>,
}

/// One element of the written `transacoes` array
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum HistoryEntry<'a> {
    Parsed(&'a Transaction),
    Unreadable(Value),
}

/// Where the JSON documents live
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Directory holding both documents
    pub data_dir: PathBuf,
    /// File name of the balance document
    pub balance_file: String,
    /// File name of the transactions document
    pub transactions_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            balance_file: BALANCE_FILE.to_string(),
            transactions_file: TRANSACTIONS_FILE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Default file names inside the given directory
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Set the balance document's file name
    pub fn with_balance_file(mut self, name: impl Into<String>) -> Self {
        self.balance_file = name.into();
        self
    }

    /// Set the transactions document's file name
    pub fn with_transactions_file(mut self, name: impl Into<String>) -> Self {
        self.transactions_file = name.into();
        self
    }

    pub fn balance_path(&self) -> PathBuf {
        self.data_dir.join(&self.balance_file)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(&self.transactions_file)
    }
}

/// Ledger store backed by two JSON files
///
/// Documents are rewritten in full on every save, pretty-printed with a
/// four-space indent. Nothing is cached: every load reads the file again.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    balance_path: PathBuf,
    transactions_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the configured paths without touching the disk
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            balance_path: config.balance_path(),
            transactions_path: config.transactions_path(),
        }
    }

    /// Open a store in a directory, creating the directory if needed
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        Self::open_with(&StoreConfig::in_dir(data_dir))
    }

    /// Open a store for a config, creating its data directory if needed
    pub fn open_with(config: &StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir)
            .map_err(|e| StoreError::io(&config.data_dir, e))?;
        Ok(Self::new(config))
    }

    pub fn balance_path(&self) -> &Path {
        &self.balance_path
    }

    pub fn transactions_path(&self) -> &Path {
        &self.transactions_path
    }
}

impl LedgerStore for JsonFileStore {
    fn load_balance(&self) -> Amount {
        read_document::<BalanceDocument>(&self.balance_path).saldo
    }

    fn load_transactions(&self) -> Vec<Transaction> {
        read_document::<TransactionsDocument>(&self.transactions_path)
            .transacoes
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match Transaction::deserialize(entry) {
                Ok(transaction) => Some(transaction),
                Err(e) => {
                    warn!(
                        path = %self.transactions_path.display(),
                        index,
                        error = %e,
                        "skipping unreadable transaction"
                    );
                    None
                }
            })
            .collect()
    }

    fn save_balance(&mut self, balance: Amount) -> Result<(), StoreError> {
        read_existing::<BalanceDocument>(&self.balance_path)?;
        write_document(&self.balance_path, &BalanceDocument { saldo: balance })
    }

    fn save_transactions(&mut self, transactions: &[Transaction]) -> Result<(), StoreError> {
        let stored = read_existing::<TransactionsDocument>(&self.transactions_path)?
            .unwrap_or_default()
            .transacoes;
        write_document(
            &self.transactions_path,
            &TransactionsDocumentRef {
                transacoes: overlay_history(stored, transactions),
            },
        )
    }
}

/// Lay a history over the stored entries
///
/// Unreadable stored entries keep their position. Readable ones are
/// replaced, in order, by `transactions`; whatever is left of `transactions`
/// is appended, and readable entries beyond its length are dropped.
fn overlay_history(stored: Vec<Value>, transactions: &[Transaction]) -> Vec<HistoryEntry<'_>> {
    let mut incoming = transactions.iter();
    let mut merged = Vec::with_capacity(stored.len().max(transactions.len()));

    for entry in stored {
        if Transaction::deserialize(&entry).is_err() {
            merged.push(HistoryEntry::Unreadable(entry));
        } else if let Some(transaction) = incoming.next() {
            merged.push(HistoryEntry::Parsed(transaction));
        }
    }
    merged.extend(incoming.map(HistoryEntry::Parsed));
    merged
}

/// Read a document that is about to be replaced
///
/// `None` when the file is absent or blank. A file that exists but does not
/// parse is an error, so a save never destroys data it could not read.
fn read_existing<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Read a document, falling back to its default when absent or unreadable
fn read_document<T: DeserializeOwned + Default>(path: &Path) -> T {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "document absent, using default");
            return T::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document unreadable, using default");
            return T::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(document) => {
            debug!(path = %path.display(), bytes = bytes.len(), "read document");
            document
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document malformed, using default");
            T::default()
        }
    }
}

/// Serialize a document and overwrite its file
fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), StoreError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document
        .serialize(&mut serializer)
        .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

    fs::write(path, &buf).map_err(|e| StoreError::io(path, e))?;
    debug!(path = %path.display(), bytes = buf.len(), "wrote document");
    Ok(())
}
