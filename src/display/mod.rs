//! Display formatting for terminal output
//!
//! Plain-text renderings shared by the console menu and the command line.

pub mod account;
pub mod statement;

pub use account::{format_account_list, format_customer_list};
pub use statement::{format_statement, format_statement_row};
