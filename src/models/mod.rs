//! Ledger core for Simple Bank
//!
//! Customers, accounts, transactions and their history. Nothing in this
//! module performs I/O: operations return `Result`s and the caller decides
//! what to print, log or persist.

pub mod account;
pub mod customer;
pub mod history;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountKind, CheckingPolicy, BRANCH_CODE};
pub use customer::Customer;
pub use history::{History, HistoryEntry};
pub use ids::{AccountNumber, TaxId, TaxIdError};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionKind};
