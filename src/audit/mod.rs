//! Activity log for Simple Bank
//!
//! Records every registration, account opening and transaction attempt,
//! accepted or rejected, in an append-only JSONL file.
//!
//! # Example
//!
//! ```rust,ignore
//! use simple_bank::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::applied(account.number(), &transaction, account.balance()))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation, Outcome};
pub use logger::AuditLogger;
