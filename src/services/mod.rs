//! Service layer for Simple Bank
//!
//! The service layer sits between the operator surfaces and the ledger core,
//! handling input validation, roster-level rules, and activity logging.

pub mod bank;

pub use bank::{parse_amount, parse_tax_id, AccountSummary, BankService, Statement};
