//! Account model
//!
//! An account holds a balance, its identifying number, the fixed branch code,
//! its owner's tax id and an exclusively owned [`History`]. The balance only
//! moves through [`Transaction::apply`](super::Transaction::apply), which keeps
//! it equal to the history's deposits minus its withdrawals.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::history::History;
use super::ids::{AccountNumber, TaxId};
use super::money::Money;
use crate::error::{HistoryError, TransactionError};

/// Branch code shared by every account
pub const BRANCH_CODE: &str = "0001";

/// Withdrawal limits layered on top of the base balance rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckingPolicy {
    /// Largest amount a single withdrawal may take
    pub per_operation_limit: Money,
    /// How many withdrawals may be made per calendar day
    pub daily_withdrawal_limit: u32,
}

impl CheckingPolicy {
    /// Create a policy with explicit limits
    pub const fn new(per_operation_limit: Money, daily_withdrawal_limit: u32) -> Self {
        Self {
            per_operation_limit,
            daily_withdrawal_limit,
        }
    }

    /// Run the pre-withdrawal checks in order: ceiling first, then the
    /// number of withdrawals already made on `now`'s calendar date
    fn check(
        &self,
        amount: Money,
        history: &History,
        now: DateTime<Local>,
    ) -> Result<(), TransactionError> {
        if amount > self.per_operation_limit {
            return Err(TransactionError::WithdrawalLimitExceeded {
                limit: self.per_operation_limit,
            });
        }

        let today_count = history.withdrawals_on(now.date_naive());
        if today_count >= self.daily_withdrawal_limit as usize {
            return Err(TransactionError::DailyWithdrawalLimitExceeded {
                limit: self.daily_withdrawal_limit,
            });
        }

        Ok(())
    }
}

impl Default for CheckingPolicy {
    fn default() -> Self {
        Self::new(Money::from_units_cents(500, 0), 3)
    }
}

/// Account variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AccountKind {
    /// Base balance rule only
    Plain,
    /// Base rule preceded by a [`CheckingPolicy`]
    Checking(CheckingPolicy),
}

impl AccountKind {
    /// The checking policy, if this variant has one
    pub fn policy(&self) -> Option<&CheckingPolicy> {
        match self {
            Self::Plain => None,
            Self::Checking(policy) => Some(policy),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "Account"),
            Self::Checking(_) => write!(f, "Checking"),
        }
    }
}

/// A bank account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    balance: Money,
    owner: TaxId,
    kind: AccountKind,
    history: History,
}

impl Account {
    /// Create a plain account with a zero balance
    pub fn new(number: AccountNumber, owner: TaxId) -> Self {
        Self::with_kind(number, owner, AccountKind::Plain)
    }

    /// Create a checking account with a zero balance
    pub fn checking(number: AccountNumber, owner: TaxId, policy: CheckingPolicy) -> Self {
        Self::with_kind(number, owner, AccountKind::Checking(policy))
    }

    fn with_kind(number: AccountNumber, owner: TaxId, kind: AccountKind) -> Self {
        Self {
            number,
            balance: Money::zero(),
            owner,
            kind,
            history: History::new(),
        }
    }

    /// Rebuild an account from stored parts
    ///
    /// The balance is replayed from the history, so a history with a
    /// non-positive amount, an overdraft or an overflow is refused. Callers
    /// compare the result with any stored balance.
    pub(crate) fn restore(
        number: AccountNumber,
        owner: TaxId,
        kind: AccountKind,
        history: History,
    ) -> Result<Self, HistoryError> {
        let balance = history.replay()?;
        Ok(Self {
            number,
            balance,
            owner,
            kind,
            history,
        })
    }

    /// Account number
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// Branch code (always [`BRANCH_CODE`])
    pub fn branch(&self) -> &'static str {
        BRANCH_CODE
    }

    /// Current balance
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Tax id of the owning customer
    pub fn owner(&self) -> &TaxId {
        &self.owner
    }

    /// Account variant
    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Read-only access to the transaction history
    pub fn history(&self) -> &History {
        &self.history
    }

    pub(super) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Withdraw at the current local time
    pub(super) fn withdraw(&mut self, amount: Money) -> Result<(), TransactionError> {
        self.withdraw_at(amount, Local::now())
    }

    /// Withdraw at clock reading `now`
    ///
    /// The account's policy checks run first; the base balance rule runs only
    /// if they pass.
    pub(super) fn withdraw_at(
        &mut self,
        amount: Money,
        now: DateTime<Local>,
    ) -> Result<(), TransactionError> {
        if let Some(policy) = self.kind.policy() {
            policy.check(amount, &self.history, now)?;
        }
        self.withdraw_base(amount)
    }

    fn withdraw_base(&mut self, amount: Money) -> Result<(), TransactionError> {
        if !amount.is_positive() {
            return Err(TransactionError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(TransactionError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(TransactionError::InvalidAmount(amount))?;
        Ok(())
    }

    pub(super) fn deposit(&mut self, amount: Money) -> Result<(), TransactionError> {
        if !amount.is_positive() {
            return Err(TransactionError::InvalidAmount(amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(TransactionError::InvalidAmount(amount))?;
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.branch(), self.number)
    }
}
