//! Flat persistence records
//!
//! Customers and accounts are stored as two flat lists joined by tax id.
//! Saving flattens the object graph; loading validates the records and
//! rebuilds it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{BankError, BankResult};
use crate::models::{
    Account, AccountKind, AccountNumber, Customer, History, HistoryEntry, Money, TaxId,
    BRANCH_CODE,
};

/// Stored form of a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub name: String,
    pub tax_id: TaxId,
}

impl From<&Customer> for CustomerRecord {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name().to_string(),
            tax_id: customer.tax_id().clone(),
        }
    }
}

/// Stored form of an account, history included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub number: AccountNumber,
    pub branch: String,
    pub balance: Money,
    pub owner_tax_id: TaxId,
    pub kind: AccountKind,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            number: account.number(),
            branch: account.branch().to_string(),
            balance: account.balance(),
            owner_tax_id: account.owner().clone(),
            kind: *account.kind(),
            history: account.history().snapshot(),
        }
    }
}

/// Contents of customers.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerData {
    pub customers: Vec<CustomerRecord>,
}

/// Contents of accounts.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountData {
    pub accounts: Vec<AccountRecord>,
}

/// Flatten the roster into its two record lists
pub fn flatten(customers: &[Customer]) -> (CustomerData, AccountData) {
    let customer_data = CustomerData {
        customers: customers.iter().map(CustomerRecord::from).collect(),
    };

    let mut accounts: Vec<AccountRecord> = customers
        .iter()
        .flat_map(|c| c.accounts().iter().map(AccountRecord::from))
        .collect();
    accounts.sort_by_key(|a| a.number);

    (customer_data, AccountData { accounts })
}

/// Rebuild the roster from stored records
///
/// Fails with [`BankError::Storage`] when the records cannot describe a valid
/// roster: duplicate tax ids or account numbers, an account whose owner is
/// unknown, a foreign branch code, a history that cannot be replayed, or a
/// balance that disagrees with the account's history.
pub fn assemble(
    customer_data: CustomerData,
    account_data: AccountData,
) -> BankResult<Vec<Customer>> {
    let mut customers = Vec::with_capacity(customer_data.customers.len());
    let mut index: HashMap<TaxId, usize> = HashMap::new();

    for record in customer_data.customers {
        if index.contains_key(&record.tax_id) {
            return Err(BankError::Storage(format!(
                "Duplicate customer tax id {}",
                record.tax_id
            )));
        }
        index.insert(record.tax_id.clone(), customers.len());
        customers.push(Customer::new(record.name, record.tax_id));
    }

    let mut accounts = account_data.accounts;
    accounts.sort_by_key(|a| a.number);

    let mut seen_numbers = HashSet::new();
    for record in accounts {
        let number = record.number;
        if !seen_numbers.insert(number) {
            return Err(BankError::Storage(format!("Duplicate account number {}", number)));
        }

        let owner = *index.get(&record.owner_tax_id).ok_or_else(|| {
            BankError::Storage(format!(
                "Account {} references unknown customer {}",
                number, record.owner_tax_id
            ))
        })?;

        let account = restore_account(record)?;
        customers[owner].add_account(account);
    }

    Ok(customers)
}

fn restore_account(record: AccountRecord) -> BankResult<Account> {
    let number = record.number;

    if number.get() == 0 {
        return Err(BankError::Storage("Account number 0 is not valid".into()));
    }

    if record.branch != BRANCH_CODE {
        return Err(BankError::Storage(format!(
            "Account {} has unknown branch {}",
            number, record.branch
        )));
    }

    let history = History::from_entries(record.history);
    let account = Account::restore(number, record.owner_tax_id, record.kind, history)
        .map_err(|e| {
            BankError::Storage(format!("Account {} history is invalid: {}", number, e))
        })?;

    if account.balance() != record.balance {
        return Err(BankError::Storage(format!(
            "Account {} balance {} does not match its history ({})",
            number,
            record.balance,
            account.balance()
        )));
    }

    Ok(account)
}
