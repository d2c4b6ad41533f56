// Withdrawal and deposit policy - the decision rules, free of any I/O

use crate::ledger::{Amount, AmountError, Ledger};
use crate::storage::StoreError;
use chrono::NaiveDate;
use thiserror::Error;

/// Default number of withdrawals allowed per calendar day
pub const DEFAULT_DAILY_WITHDRAWAL_LIMIT: usize = 3;

/// Default ceiling of a single withdrawal, in reais
pub const DEFAULT_WITHDRAWAL_CAP_REAIS: u64 = 500;

/// Reasons an operation can be rejected
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Daily limit of {limit} withdrawals reached")]
    DailyLimitExceeded { limit: usize },

    #[error("Withdrawal cap exceeded: the maximum per withdrawal is R$ {cap}")]
    PerTransactionLimitExceeded { cap: Amount },

    #[error("Insufficient funds: available R$ {available}, requested R$ {requested}")]
    InsufficientFunds { available: Amount, requested: Amount },

    #[error("Balance would exceed the maximum of R$ {max}", max = Amount::MAX)]
    BalanceOverflow,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl RulesError {
    /// Whether the rejection came from a business rule (as opposed to storage)
    pub fn is_rejection(&self) -> bool {
        !matches!(self, RulesError::Storage(_))
    }
}

/// Limits applied to withdrawals
#[derive(Clone, Debug)]
pub struct RulesConfig {
    /// Maximum number of withdrawals per calendar day
    pub daily_withdrawal_limit: usize,
    /// Maximum amount of a single withdrawal (inclusive)
    pub withdrawal_cap: Amount,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            daily_withdrawal_limit: DEFAULT_DAILY_WITHDRAWAL_LIMIT,
            withdrawal_cap: Amount::from_reais(DEFAULT_WITHDRAWAL_CAP_REAIS),
        }
    }
}

impl RulesConfig {
    /// Set the number of withdrawals allowed per day
    pub fn with_daily_withdrawal_limit(mut self, limit: usize) -> Self {
        self.daily_withdrawal_limit = limit;
        self
    }

    /// Set the per-withdrawal ceiling
    pub fn with_withdrawal_cap(mut self, cap: Amount) -> Self {
        self.withdrawal_cap = cap;
        self
    }
}

/// Stateless checks over a ledger snapshot
pub struct WithdrawalPolicy;

impl WithdrawalPolicy {
    /// Check whether a withdrawal may be committed
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// - positive amount
    /// - daily withdrawal count
    /// - per-withdrawal cap
    /// - sufficient funds
    pub fn check(
        config: &RulesConfig,
        ledger: &Ledger,
        today: NaiveDate,
        amount: Amount,
    ) -> Result<(), RulesError> {
        Self::check_amount(amount)?;

        if ledger.withdrawals_on(today) >= config.daily_withdrawal_limit {
            return Err(RulesError::DailyLimitExceeded {
                limit: config.daily_withdrawal_limit,
            });
        }

        if amount > config.withdrawal_cap {
            return Err(RulesError::PerTransactionLimitExceeded {
                cap: config.withdrawal_cap,
            });
        }

        if amount > ledger.balance() {
            return Err(RulesError::InsufficientFunds {
                available: ledger.balance(),
                requested: amount,
            });
        }

        Ok(())
    }

    /// Reject zero amounts (negatives cannot be represented)
    pub fn check_amount(amount: Amount) -> Result<(), RulesError> {
        if !amount.is_positive() {
            return Err(AmountError::NotPositive.into());
        }
        Ok(())
    }

    /// Withdrawals still allowed on a given day
    pub fn remaining_withdrawals(config: &RulesConfig, ledger: &Ledger, day: NaiveDate) -> usize {
        config
            .daily_withdrawal_limit
            .saturating_sub(ledger.withdrawals_on(day))
    }
}
