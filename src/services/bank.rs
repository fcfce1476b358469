//! Bank service
//!
//! The orchestration layer around the ledger core: owns the customer roster,
//! enforces tax-id uniqueness, assigns sequential account numbers, resolves a
//! customer's first account for every transaction, and records each outcome
//! in the activity log.

use chrono::{DateTime, Local};

use crate::audit::{AuditEntry, EntityType};
use crate::config::Settings;
use crate::error::{BankError, BankResult};
use crate::models::{
    Account, AccountKind, AccountNumber, Customer, HistoryEntry, Money, TaxId, Transaction,
};
use crate::storage::{AccountRecord, CustomerRecord, Storage};

/// Longest accepted customer name
pub const MAX_NAME_LEN: usize = 100;

/// Service for customer, account and transaction operations
pub struct BankService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    customers: Vec<Customer>,
    clock: fn() -> DateTime<Local>,
    warnings: Vec<String>,
}

/// One row of the account listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub holder: String,
    pub tax_id: TaxId,
    pub branch: &'static str,
    pub number: AccountNumber,
    pub kind: AccountKind,
    pub balance: Money,
}

/// Everything needed to render an account statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub holder: String,
    pub tax_id: TaxId,
    pub branch: &'static str,
    pub number: AccountNumber,
    pub entries: Vec<HistoryEntry>,
    pub balance: Money,
}

/// Parse operator-supplied tax id text
pub fn parse_tax_id(input: &str) -> BankResult<TaxId> {
    TaxId::parse(input).map_err(|e| BankError::Validation(e.to_string()))
}

/// Parse operator-supplied amount text
pub fn parse_amount(input: &str) -> BankResult<Money> {
    Money::parse(input).map_err(|e| BankError::Validation(e.to_string()))
}

impl<'a> BankService<'a> {
    /// Load the roster from storage
    pub fn load(storage: &'a Storage, settings: &'a Settings) -> BankResult<Self> {
        let customers = storage.load_customers()?;
        Ok(Self::with_customers(storage, settings, customers))
    }

    /// Create a service over an existing roster
    pub fn with_customers(
        storage: &'a Storage,
        settings: &'a Settings,
        customers: Vec<Customer>,
    ) -> Self {
        Self {
            storage,
            settings,
            customers,
            clock: Local::now,
            warnings: Vec::new(),
        }
    }

    /// Replace the clock transactions are checked and stamped against
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// Drain the warnings raised since the last call
    ///
    /// A warning reports a side effect that failed after the roster already
    /// changed, such as an activity log write.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Persist the roster
    pub fn save(&self) -> BankResult<()> {
        self.storage.save_customers(&self.customers)
    }

    /// Settings in effect
    pub fn settings(&self) -> &Settings {
        self.settings
    }

    /// All customers in registration order
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Find a customer by tax id
    pub fn find_customer(&self, tax_id: &TaxId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.tax_id() == tax_id)
    }

    /// Find a customer by operator-supplied tax id text
    pub fn get_customer(&self, tax_id: &str) -> BankResult<&Customer> {
        let tax_id = parse_tax_id(tax_id)?;
        self.find_customer(&tax_id)
            .ok_or_else(|| BankError::customer_not_found(tax_id.as_str()))
    }

    /// Register a new customer
    pub fn register_customer(&mut self, name: &str, tax_id: &str) -> BankResult<&Customer> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BankError::Validation("Customer name cannot be empty".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(BankError::Validation(format!(
                "Customer name too long (max {} characters)",
                MAX_NAME_LEN
            )));
        }

        let tax_id = parse_tax_id(tax_id)?;
        if self.find_customer(&tax_id).is_some() {
            return Err(BankError::Duplicate {
                entity_type: "Customer",
                identifier: tax_id.to_string(),
            });
        }

        let customer = Customer::new(name, tax_id);
        self.storage.log_create(
            EntityType::Customer,
            customer.tax_id().to_string(),
            Some(customer.name().to_string()),
            &CustomerRecord::from(&customer),
        )?;

        self.customers.push(customer);
        Ok(&self.customers[self.customers.len() - 1])
    }

    /// The number the next opened account will receive
    pub fn next_account_number(&self) -> AccountNumber {
        self.customers
            .iter()
            .flat_map(|c| c.accounts())
            .map(|a| a.number())
            .max()
            .map_or(AccountNumber::FIRST, |n| n.next())
    }

    /// Open a checking account for an existing customer
    pub fn open_checking_account(&mut self, tax_id: &str) -> BankResult<&Account> {
        let tax_id = parse_tax_id(tax_id)?;
        let number = self.next_account_number();
        let policy = self.settings.checking;
        let storage = self.storage;

        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.tax_id() == &tax_id)
            .ok_or_else(|| BankError::customer_not_found(tax_id.as_str()))?;

        let account = Account::checking(number, tax_id.clone(), policy);
        storage.log_create(
            EntityType::Account,
            number.to_string(),
            Some(customer.name().to_string()),
            &AccountRecord::from(&account),
        )?;

        customer.add_account(account);
        customer
            .account(number)
            .ok_or_else(|| BankError::account_not_found(number.to_string()))
    }

    /// Deposit into the customer's first account
    pub fn deposit(&mut self, tax_id: &str, amount: Money) -> BankResult<&Account> {
        self.realize(tax_id, Transaction::deposit(amount))
    }

    /// Withdraw from the customer's first account
    pub fn withdraw(&mut self, tax_id: &str, amount: Money) -> BankResult<&Account> {
        self.realize(tax_id, Transaction::withdrawal(amount))
    }

    /// Apply a transaction to the customer's first account and log the outcome
    ///
    /// The result reflects the transaction alone. A failed log write becomes
    /// a warning, see [`take_warnings`](Self::take_warnings).
    pub fn realize(&mut self, tax_id: &str, transaction: Transaction) -> BankResult<&Account> {
        let tax_id = parse_tax_id(tax_id)?;
        let storage = self.storage;
        let now = (self.clock)();

        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.tax_id() == &tax_id)
            .ok_or_else(|| BankError::customer_not_found(tax_id.as_str()))?;

        let number = customer
            .first_account()
            .map(Account::number)
            .ok_or_else(|| BankError::NoAccount(tax_id.to_string()))?;

        let (result, entry) = match customer.realize_transaction_at(number, &transaction, now) {
            Ok(account) => {
                let entry = AuditEntry::applied(number, &transaction, account.balance());
                (Ok(account), Some(entry))
            }
            Err(err) => {
                let entry = err
                    .as_transaction()
                    .map(|reason| AuditEntry::rejected(number, &transaction, reason));
                (Err(err), entry)
            }
        };

        if let Some(Err(e)) = entry.map(|entry| storage.log(&entry)) {
            self.warnings.push(format!("Activity log not updated: {}", e));
        }
        result
    }

    /// Statement of the customer's first account
    pub fn statement(&self, tax_id: &str) -> BankResult<Statement> {
        let customer = self.get_customer(tax_id)?;
        let account = customer
            .first_account()
            .ok_or_else(|| BankError::NoAccount(customer.tax_id().to_string()))?;

        Ok(Statement {
            holder: customer.name().to_string(),
            tax_id: customer.tax_id().clone(),
            branch: account.branch(),
            number: account.number(),
            entries: account.history().snapshot(),
            balance: account.balance(),
        })
    }

    /// Every account of every customer, ordered by account number
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        let mut summaries: Vec<AccountSummary> = self
            .customers
            .iter()
            .flat_map(|customer| {
                customer.accounts().iter().map(move |account| AccountSummary {
                    holder: customer.name().to_string(),
                    tax_id: customer.tax_id().clone(),
                    branch: account.branch(),
                    number: account.number(),
                    kind: *account.kind(),
                    balance: account.balance(),
                })
            })
            .collect();
        summaries.sort_by_key(|s| s.number);
        summaries
    }
}
