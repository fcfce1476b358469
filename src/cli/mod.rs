//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod customer;
pub mod log;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use customer::{handle_customer_command, CustomerCommands};
pub use log::handle_log_command;
pub use transaction::{handle_statement, handle_transaction};
