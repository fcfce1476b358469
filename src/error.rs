//! Error types for Simple Bank
//!
//! Two layers of errors live here. [`TransactionError`] is the taxonomy of
//! rejected business operations produced by the ledger core. [`BankError`]
//! covers everything around it (storage, configuration, lookups) and wraps
//! transaction errors unchanged. [`HistoryError`] describes a stored history
//! that cannot be replayed; storage reports it as [`BankError::Storage`].

use thiserror::Error;

use crate::models::Money;

/// A rejected deposit or withdrawal
///
/// Every variant is an expected outcome of operator input, never a system
/// fault. Retrying with different input is the only recovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// The amount was zero or negative, or would overflow the balance
    #[error("Invalid amount: {0}. The amount must be greater than zero and within range")]
    InvalidAmount(Money),

    /// The withdrawal exceeds the current balance
    #[error("Insufficient funds: balance is {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    /// The withdrawal exceeds the checking account's per-operation ceiling
    #[error("Withdrawal exceeds the per-operation limit of {limit}")]
    WithdrawalLimitExceeded { limit: Money },

    /// The day's withdrawal count already reached the maximum
    #[error("Daily withdrawal limit reached ({limit} withdrawals per day)")]
    DailyWithdrawalLimitExceeded { limit: u32 },
}

/// A stored history that cannot be replayed into a valid balance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("entry {index} holds a non-positive amount ({amount})")]
    NonPositiveAmount { index: usize, amount: Money },

    #[error("entry {index} overdraws the account")]
    Overdrawn { index: usize },

    #[error("entry {index} overflows the balance")]
    Overflow { index: usize },
}

/// The main error type for Simple Bank operations
#[derive(Error, Debug)]
pub enum BankError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for operator input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The customer exists but owns no account yet
    #[error("Customer {0} has no account")]
    NoAccount(String),

    /// Storage errors (including corrupt or inconsistent data files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A rejected deposit or withdrawal
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

impl BankError {
    /// Create a "not found" error for customers
    pub fn customer_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Customer",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error rejects operator input rather than signalling a
    /// system fault
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotFound { .. }
                | Self::Duplicate { .. }
                | Self::NoAccount(_)
                | Self::Transaction(_)
        )
    }

    /// The underlying transaction rejection, if this error is one
    pub fn as_transaction(&self) -> Option<&TransactionError> {
        match self {
            Self::Transaction(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BankError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Simple Bank operations
pub type BankResult<T> = Result<T, BankError>;
