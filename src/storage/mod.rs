//! Storage layer for Simple Bank
//!
//! Persists the customer roster as two JSON files of flat records
//! (`customers.json`, `accounts.json`) with atomic writes, and owns the
//! activity log.

pub mod file_io;
pub mod records;

pub use file_io::{read_json, write_json_atomic};
pub use records::{AccountData, AccountRecord, CustomerData, CustomerRecord};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BankPaths;
use crate::error::BankError;
use crate::models::Customer;

/// Main storage coordinator
pub struct Storage {
    paths: BankPaths,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: BankPaths) -> Result<Self, BankError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BankPaths {
        &self.paths
    }

    /// Get the activity log
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load and rebuild the customer roster
    ///
    /// Missing files load as an empty roster.
    pub fn load_customers(&self) -> Result<Vec<Customer>, BankError> {
        let customers: CustomerData = read_json(self.paths.customers_file())?;
        let accounts: AccountData = read_json(self.paths.accounts_file())?;
        records::assemble(customers, accounts)
    }

    /// Save the customer roster
    pub fn save_customers(&self, customers: &[Customer]) -> Result<(), BankError> {
        let (customer_data, account_data) = records::flatten(customers);
        write_json_atomic(self.paths.customers_file(), &customer_data)?;
        write_json_atomic(self.paths.accounts_file(), &account_data)?;
        Ok(())
    }

    /// Check if any data has been saved yet
    pub fn is_initialized(&self) -> bool {
        self.paths.customers_file().exists()
    }

    /// Record an activity log entry
    pub fn log(&self, entry: &AuditEntry) -> Result<(), BankError> {
        self.audit.log(entry)
    }

    /// Record the creation of an entity
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), BankError> {
        self.log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountNumber, CheckingPolicy, Money, TaxId, Transaction};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert!(storage.load_customers().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, storage) = create_test_storage();

        let mut ana = Customer::new("Ana", TaxId::parse("11122233344").unwrap());
        ana.add_account(Account::checking(
            AccountNumber::FIRST,
            ana.tax_id().clone(),
            CheckingPolicy::default(),
        ));
        ana.realize_transaction(
            AccountNumber::FIRST,
            &Transaction::deposit(Money::from_cents(200000)),
        )
        .unwrap();
        ana.realize_transaction(
            AccountNumber::FIRST,
            &Transaction::withdrawal(Money::from_cents(50000)),
        )
        .unwrap();

        storage.save_customers(std::slice::from_ref(&ana)).unwrap();
        assert!(storage.is_initialized());

        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::new(paths).unwrap();
        let loaded = reopened.load_customers().unwrap();
        assert_eq!(loaded, vec![ana]);
    }

    #[test]
    fn test_corrupt_accounts_file() {
        let (_temp_dir, storage) = create_test_storage();
        std::fs::write(storage.paths().accounts_file(), "{ nope").unwrap();

        assert!(matches!(storage.load_customers(), Err(BankError::Storage(_))));
    }

    #[test]
    fn test_log_create() {
        let (_temp_dir, storage) = create_test_storage();
        let record = CustomerRecord {
            name: "Ana".into(),
            tax_id: TaxId::parse("11122233344").unwrap(),
        };

        storage
            .log_create(EntityType::Customer, "11122233344", Some("Ana".into()), &record)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].after.as_ref().unwrap()["name"], "Ana");
    }
}
