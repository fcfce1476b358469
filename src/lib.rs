//! Simple Bank - console simulation of basic retail-banking operations
//!
//! This library provides a small ledger core (customers, accounts,
//! transactions and their history) together with the layers an operator
//! needs around it: JSON persistence, an activity log, settings, an
//! interactive menu and command-line handlers.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: The ledger core (money, tax ids, transactions, history,
//!   accounts, checking policy, customers)
//! - `error`: Transaction rejections and crate-level errors
//! - `config`: Configuration and path management
//! - `storage`: JSON file storage layer
//! - `audit`: Activity logging
//! - `services`: Roster rules and orchestration
//! - `display`: Text rendering for statements and listings
//! - `menu`: Interactive console menu
//! - `cli`: Command-line handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use simple_bank::config::{paths::BankPaths, settings::Settings};
//! use simple_bank::services::BankService;
//! use simple_bank::storage::Storage;
//!
//! let paths = BankPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! let mut bank = BankService::load(&storage, &settings)?;
//! bank.register_customer("Ana", "111.222.333-44")?;
//! bank.open_checking_account("11122233344")?;
//! bank.deposit("11122233344", Money::from_units_cents(2000, 0))?;
//! bank.save()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod menu;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BankError, BankResult, HistoryError, TransactionError};
