// Rules module - THE TRANSACTION RULES ENGINE
// Validates deposits and withdrawals against the ledger and commits them

mod engine;
mod policy;

pub use engine::{Receipt, TransactionEngine};
pub use policy::{RulesConfig, RulesError, WithdrawalPolicy};
