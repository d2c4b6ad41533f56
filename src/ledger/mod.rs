// Ledger module - THE ACCOUNT STATE
// Money amounts, transaction records and the (balance, history) snapshot

mod amount;
mod clock;
mod state;
mod transaction;

pub use amount::{Amount, AmountError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use state::Ledger;
pub use transaction::{Transaction, TransactionKind};
