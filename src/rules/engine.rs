// TransactionEngine - loads the ledger, applies the policy, commits the result

use crate::ledger::{Amount, Clock, Ledger, SystemClock, Transaction};
use crate::rules::{RulesConfig, RulesError, WithdrawalPolicy};
use crate::storage::LedgerStore;
use tracing::{error, info, warn};

/// Outcome of a committed operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    transaction: Transaction,
    balance: Amount,
}

impl Receipt {
    /// The transaction appended to the history
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Balance after the operation
    pub fn balance(&self) -> Amount {
        self.balance
    }
}

/// Applies deposits and withdrawals to a ledger store
///
/// The engine owns its store, and the mutating operations take `&mut self`,
/// so one engine is the only writer of its ledger within a process. Two
/// processes must not share a data directory at the same time.
///
/// Every operation loads a fresh snapshot; nothing is cached between calls.
pub struct TransactionEngine<S: LedgerStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: RulesConfig,
}

impl<S: LedgerStore> TransactionEngine<S, SystemClock> {
    /// Create an engine on the wall clock with default limits
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: LedgerStore, C: Clock> TransactionEngine<S, C> {
    /// Create an engine with a custom clock and default limits
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            config: RulesConfig::default(),
        }
    }

    /// Replace the limits
    pub fn with_config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give the store back
    pub fn into_store(self) -> S {
        self.store
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Current persisted balance
    pub fn balance(&self) -> Amount {
        self.store.load_balance()
    }

    /// Fresh snapshot of balance and history
    pub fn ledger(&self) -> Ledger {
        self.store.load_ledger()
    }

    /// Withdrawals still allowed today
    pub fn withdrawals_remaining_today(&self) -> usize {
        WithdrawalPolicy::remaining_withdrawals(&self.config, &self.ledger(), self.clock.today())
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Withdraw money from the account
    ///
    /// Rejections leave the stored balance and history untouched.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Receipt, RulesError> {
        if let Err(e) = WithdrawalPolicy::check_amount(amount) {
            warn!(%amount, "withdrawal rejected: {}", e);
            return Err(e);
        }

        let ledger = self.store.load_ledger();
        let now = self.clock.now();

        if let Err(e) = WithdrawalPolicy::check(&self.config, &ledger, now.date(), amount) {
            warn!(%amount, balance = %ledger.balance(), "withdrawal rejected: {}", e);
            return Err(e);
        }

        let new_balance = ledger
            .balance()
            .checked_sub(amount)
            .ok_or(RulesError::InsufficientFunds {
                available: ledger.balance(),
                requested: amount,
            })?;

        let receipt = self.commit(ledger, new_balance, Transaction::withdrawal(amount, now))?;
        info!(%amount, balance = %receipt.balance, "withdrawal committed");
        Ok(receipt)
    }

    /// Deposit money into the account
    ///
    /// Deposits have no count or size limits.
    pub fn deposit(&mut self, amount: Amount) -> Result<Receipt, RulesError> {
        if let Err(e) = WithdrawalPolicy::check_amount(amount) {
            warn!(%amount, "deposit rejected: {}", e);
            return Err(e);
        }

        let ledger = self.store.load_ledger();
        let now = self.clock.now();

        let new_balance = ledger
            .balance()
            .checked_add(amount)
            .ok_or(RulesError::BalanceOverflow)?;

        let receipt = self.commit(ledger, new_balance, Transaction::deposit(amount, now))?;
        info!(%amount, balance = %receipt.balance, "deposit committed");
        Ok(receipt)
    }

    /// Persist the new balance, then the history with the new entry appended
    ///
    /// If the history write fails after the balance was written, the
    /// previous balance is written back once so the two documents agree.
    fn commit(
        &mut self,
        ledger: Ledger,
        new_balance: Amount,
        transaction: Transaction,
    ) -> Result<Receipt, RulesError> {
        let (old_balance, mut transactions) = ledger.into_parts();
        transactions.push(transaction.clone());

        if let Err(e) = self.store.save_balance(new_balance) {
            error!(error = %e, "failed to save balance");
            return Err(e.into());
        }

        if let Err(e) = self.store.save_transactions(&transactions) {
            error!(error = %e, "failed to save transactions, restoring balance");
            if let Err(restore) = self.store.save_balance(old_balance) {
                error!(error = %restore, "failed to restore balance");
            }
            return Err(e.into());
        }

        Ok(Receipt {
            transaction,
            balance: new_balance,
        })
    }
}
