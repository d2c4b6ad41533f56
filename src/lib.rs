// qarbank - single-account banking demo
//
// A JSON-backed ledger (balance + transaction log) with a rules engine that
// enforces the daily withdrawal limit, the per-withdrawal cap and the
// sufficient-funds check.

pub mod ledger;
pub mod rules;
pub mod session;
pub mod statement;
pub mod storage;
