// Storage module - PERSISTENCE
// Durable read/write of the balance and transaction documents

mod json;
mod memory;
mod store;

pub use json::{JsonFileStore, StoreConfig, BALANCE_FILE, TRANSACTIONS_FILE};
pub use memory::MemoryStore;
pub use store::{LedgerStore, StoreError};
