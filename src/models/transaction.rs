//! Transaction model
//!
//! A transaction is an immutable `{kind, amount}` value describing one
//! monetary movement. Applying it to an account runs the account's validation
//! and, only on success, records it in the account's history.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::Account;
use super::money::Money;
use crate::error::TransactionError;

/// Kind of monetary movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the account
    Withdrawal,
    /// Money entering the account
    Deposit,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Withdrawal => write!(f, "Withdrawal"),
            Self::Deposit => write!(f, "Deposit"),
        }
    }
}

/// A deposit or withdrawal of a fixed amount
///
/// The amount is not validated at construction; validation happens when the
/// transaction is applied to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Money,
}

impl Transaction {
    /// Create a transaction of the given kind
    pub const fn new(kind: TransactionKind, amount: Money) -> Self {
        Self { kind, amount }
    }

    /// Create a withdrawal
    pub const fn withdrawal(amount: Money) -> Self {
        Self::new(TransactionKind::Withdrawal, amount)
    }

    /// Create a deposit
    pub const fn deposit(amount: Money) -> Self {
        Self::new(TransactionKind::Deposit, amount)
    }

    /// The kind of movement
    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The amount moved
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Check if this is a withdrawal
    pub fn is_withdrawal(&self) -> bool {
        self.kind == TransactionKind::Withdrawal
    }

    /// Apply this transaction to an account at the current local time
    pub fn apply(&self, account: &mut Account) -> Result<(), TransactionError> {
        match self.kind {
            TransactionKind::Withdrawal => account.withdraw(self.amount)?,
            TransactionKind::Deposit => account.deposit(self.amount)?,
        }

        account.history_mut().append(*self);
        Ok(())
    }

    /// Apply this transaction to an account with an explicit clock reading
    ///
    /// On success the account's balance has changed and the history holds a
    /// new entry stamped `now`. On failure neither has changed.
    pub fn apply_at(
        &self,
        account: &mut Account,
        now: DateTime<Local>,
    ) -> Result<(), TransactionError> {
        match self.kind {
            TransactionKind::Withdrawal => account.withdraw_at(self.amount, now)?,
            TransactionKind::Deposit => account.deposit(self.amount)?,
        }

        account.history_mut().append_at(now, *self);
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.kind, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountNumber, TaxId};

    fn plain_account() -> Account {
        Account::new(AccountNumber::FIRST, TaxId::parse("11122233344").unwrap())
    }

    #[test]
    fn test_constructors() {
        let d = Transaction::deposit(Money::from_cents(1000));
        assert_eq!(d.kind(), TransactionKind::Deposit);
        assert_eq!(d.amount().cents(), 1000);
        assert!(!d.is_withdrawal());

        let w = Transaction::withdrawal(Money::from_cents(500));
        assert!(w.is_withdrawal());
    }

    #[test]
    fn test_apply_deposit_records_history() {
        let mut account = plain_account();
        Transaction::deposit(Money::from_cents(100000))
            .apply(&mut account)
            .unwrap();

        assert_eq!(account.balance().cents(), 100000);
        let entries = account.history().snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].transaction().kind(), TransactionKind::Deposit);
    }

    #[test]
    fn test_apply_withdrawal() {
        let mut account = plain_account();
        Transaction::deposit(Money::from_cents(100000))
            .apply(&mut account)
            .unwrap();
        Transaction::withdrawal(Money::from_cents(15000))
            .apply(&mut account)
            .unwrap();

        assert_eq!(account.balance().cents(), 85000);
        assert_eq!(account.history().len(), 2);
    }

    #[test]
    fn test_failed_apply_leaves_history_unchanged() {
        let mut account = plain_account();
        let err = Transaction::withdrawal(Money::from_cents(1))
            .apply(&mut account)
            .unwrap_err();

        assert!(matches!(err, TransactionError::InsufficientFunds { .. }));
        assert!(account.history().is_empty());
        assert_eq!(account.balance(), Money::zero());
    }

    #[test]
    fn test_apply_at_stamps_entry() {
        let mut account = plain_account();
        let now = Local::now();
        Transaction::deposit(Money::from_cents(500))
            .apply_at(&mut account, now)
            .unwrap();

        assert_eq!(account.history().snapshot()[0].timestamp(), now);
    }

    #[test]
    fn test_display() {
        assert_eq!(TransactionKind::Deposit.to_string(), "Deposit");
        assert_eq!(
            Transaction::withdrawal(Money::from_cents(5000)).to_string(),
            "Withdrawal of R$ 50.00"
        );
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::deposit(Money::from_cents(1050));
        let json = serde_json::to_string(&txn).unwrap();
        assert_eq!(json, r#"{"kind":"deposit","amount":1050}"#);
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, deserialized);
    }
}
