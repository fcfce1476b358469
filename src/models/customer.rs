//! Customer model
//!
//! A customer owns an ordered list of accounts and is the entry point for
//! every transaction against them.

use std::fmt;

use chrono::{DateTime, Local};

use super::account::Account;
use super::ids::{AccountNumber, TaxId};
use super::transaction::Transaction;
use crate::error::{BankError, BankResult};

/// A bank customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    name: String,
    tax_id: TaxId,
    accounts: Vec<Account>,
}

impl Customer {
    /// Create a customer with no accounts
    pub fn new(name: impl Into<String>, tax_id: TaxId) -> Self {
        Self {
            name: name.into(),
            tax_id,
            accounts: Vec::new(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tax id (roster lookup key)
    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    /// Owned accounts in the order they were added
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// The account every menu operation targets
    pub fn first_account(&self) -> Option<&Account> {
        self.accounts.first()
    }

    /// Find an owned account by number
    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    /// Append an account
    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Apply a transaction to one of this customer's accounts
    ///
    /// This is the only way balances change from outside the model.
    pub fn realize_transaction(
        &mut self,
        number: AccountNumber,
        transaction: &Transaction,
    ) -> BankResult<&Account> {
        self.realize_transaction_at(number, transaction, Local::now())
    }

    /// Apply a transaction with an explicit clock reading
    pub fn realize_transaction_at(
        &mut self,
        number: AccountNumber,
        transaction: &Transaction,
        now: DateTime<Local>,
    ) -> BankResult<&Account> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.number() == number)
            .ok_or_else(|| BankError::account_not_found(number.to_string()))?;

        transaction.apply_at(account, now)?;
        Ok(account)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.tax_id.formatted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransactionError;
    use crate::models::{CheckingPolicy, Money, TransactionKind};
    use chrono::TimeZone;

    fn ana() -> Customer {
        Customer::new("Ana", TaxId::parse("11122233344").unwrap())
    }

    #[test]
    fn test_new_customer() {
        let customer = ana();
        assert_eq!(customer.name(), "Ana");
        assert_eq!(customer.tax_id().as_str(), "11122233344");
        assert!(customer.accounts().is_empty());
        assert!(customer.first_account().is_none());
        assert_eq!(customer.to_string(), "Ana (111.222.333-44)");
    }

    #[test]
    fn test_add_account_keeps_order() {
        let mut customer = ana();
        customer.add_account(Account::new(AccountNumber::new(4), customer.tax_id().clone()));
        customer.add_account(Account::new(AccountNumber::new(2), customer.tax_id().clone()));

        let numbers: Vec<u32> = customer.accounts().iter().map(|a| a.number().get()).collect();
        assert_eq!(numbers, vec![4, 2]);
        assert_eq!(customer.first_account().unwrap().number(), AccountNumber::new(4));
    }

    #[test]
    fn test_realize_transaction_unknown_account() {
        let mut customer = ana();
        let result = customer.realize_transaction(
            AccountNumber::new(9),
            &Transaction::deposit(Money::from_cents(100)),
        );
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_ana_scenario() {
        let noon = Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).single().unwrap();
        let reais = |n| Money::from_units_cents(n, 0);
        let mut customer = ana();
        let number = AccountNumber::FIRST;
        customer.add_account(Account::checking(
            number,
            customer.tax_id().clone(),
            CheckingPolicy::default(),
        ));
        let realize = |customer: &mut Customer, transaction: Transaction| {
            customer
                .realize_transaction_at(number, &transaction, noon)
                .map(Account::balance)
        };

        let balance = realize(&mut customer, Transaction::deposit(reais(2000))).unwrap();
        assert_eq!(balance, reais(2000));

        let err = realize(&mut customer, Transaction::withdrawal(reais(2500))).unwrap_err();
        assert_eq!(
            err.as_transaction(),
            Some(&TransactionError::WithdrawalLimitExceeded { limit: reais(500) })
        );
        assert_eq!(customer.account(number).unwrap().balance(), reais(2000));

        let mut balances = Vec::new();
        for _ in 0..3 {
            let balance = realize(&mut customer, Transaction::withdrawal(reais(500))).unwrap();
            balances.push(balance.units());
        }
        assert_eq!(balances, vec![1500, 1000, 500]);

        let err = realize(&mut customer, Transaction::withdrawal(Money::from_cents(1)))
            .unwrap_err();
        assert_eq!(
            err.as_transaction(),
            Some(&TransactionError::DailyWithdrawalLimitExceeded { limit: 3 })
        );

        let account = customer.account(number).unwrap();
        assert_eq!(account.balance(), reais(500));
        let history = account.history().snapshot();
        assert!(history.iter().all(|e| e.timestamp() == noon));
        let kinds: Vec<TransactionKind> =
            history.iter().map(|e| e.transaction().kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::Deposit,
                TransactionKind::Withdrawal,
                TransactionKind::Withdrawal,
                TransactionKind::Withdrawal,
            ]
        );
    }
}
