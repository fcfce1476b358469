//! Audit entry data structures
//!
//! Defines the structure of activity log entries: what happened, to which
//! entity, and whether the bank accepted or rejected it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;
use crate::models::{AccountNumber, Money, Transaction, TransactionKind};

/// Types of operations that are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created (customer registered, account opened)
    Create,
    /// Money deposited
    Deposit,
    /// Money withdrawn
    Withdrawal,
}

impl From<TransactionKind> for Operation {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => Operation::Deposit,
            TransactionKind::Withdrawal => Operation::Withdrawal,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Deposit => write!(f, "DEPOSIT"),
            Operation::Withdrawal => write!(f, "WITHDRAWAL"),
        }
    }
}

/// Types of entities that are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Customer,
    Account,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Customer => write!(f, "Customer"),
            EntityType::Account => write!(f, "Account"),
        }
    }
}

/// Whether the operation went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Rejected,
}

/// A single activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// ID of the affected entity (tax id or account number)
    pub entity_id: String,

    /// Human-readable description of the entity (e.g., customer name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Accepted or rejected
    pub outcome: Outcome,

    /// Amount moved or requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Account balance after a successful transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Money>,

    /// Rejection reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// JSON representation of a created entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create an entry for a newly created entity
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            outcome: Outcome::Success,
            amount: None,
            balance: None,
            detail: None,
            after: serde_json::to_value(entity).ok(),
        }
    }

    /// Create an entry for a transaction that was applied
    pub fn applied(account: AccountNumber, transaction: &Transaction, balance: Money) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: transaction.kind().into(),
            entity_type: EntityType::Account,
            entity_id: account.to_string(),
            entity_name: None,
            outcome: Outcome::Success,
            amount: Some(transaction.amount()),
            balance: Some(balance),
            detail: None,
            after: None,
        }
    }

    /// Create an entry for a transaction the account refused
    pub fn rejected(
        account: AccountNumber,
        transaction: &Transaction,
        reason: &TransactionError,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: transaction.kind().into(),
            entity_type: EntityType::Account,
            entity_id: account.to_string(),
            entity_name: None,
            outcome: Outcome::Rejected,
            amount: Some(transaction.amount()),
            balance: None,
            detail: Some(reason.to_string()),
            after: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(amount) = self.amount {
            output.push_str(&format!(" {}", amount));
        }

        match self.outcome {
            Outcome::Success => {
                if let Some(balance) = self.balance {
                    output.push_str(&format!(" -> balance {}", balance));
                }
            }
            Outcome::Rejected => {
                output.push_str(" REJECTED");
                if let Some(detail) = &self.detail {
                    output.push_str(&format!("\n  Reason: {}", detail));
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Deposit.to_string(), "DEPOSIT");
        assert_eq!(Operation::Withdrawal.to_string(), "WITHDRAWAL");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"name": "Ana", "tax_id": "11122233344"});
        let entry = AuditEntry::create(
            EntityType::Customer,
            "11122233344",
            Some("Ana".to_string()),
            &data,
        );

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Customer);
        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.after, Some(data));
    }

    #[test]
    fn test_applied_entry() {
        let txn = Transaction::deposit(Money::from_cents(200000));
        let entry = AuditEntry::applied(AccountNumber::FIRST, &txn, Money::from_cents(200000));

        assert_eq!(entry.operation, Operation::Deposit);
        assert_eq!(entry.entity_id, "1");
        assert_eq!(entry.amount, Some(Money::from_cents(200000)));
        assert_eq!(entry.balance, Some(Money::from_cents(200000)));
    }

    #[test]
    fn test_rejected_entry() {
        let txn = Transaction::withdrawal(Money::from_cents(60000));
        let reason = TransactionError::WithdrawalLimitExceeded {
            limit: Money::from_cents(50000),
        };
        let entry = AuditEntry::rejected(AccountNumber::new(2), &txn, &reason);

        assert_eq!(entry.operation, Operation::Withdrawal);
        assert_eq!(entry.outcome, Outcome::Rejected);
        assert!(entry.balance.is_none());
        assert_eq!(entry.detail.as_deref(), Some(reason.to_string().as_str()));
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::withdrawal(Money::from_cents(100));
        let entry = AuditEntry::applied(AccountNumber::FIRST, &txn, Money::zero());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("detail"));
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Withdrawal);
        assert_eq!(deserialized.entity_type, EntityType::Account);
    }

    #[test]
    fn test_human_readable_format() {
        let txn = Transaction::withdrawal(Money::from_cents(250000));
        let reason = TransactionError::InsufficientFunds {
            balance: Money::from_cents(200000),
            requested: Money::from_cents(250000),
        };
        let formatted = AuditEntry::rejected(AccountNumber::FIRST, &txn, &reason)
            .format_human_readable();

        assert!(formatted.contains("WITHDRAWAL"));
        assert!(formatted.contains("R$ 2500.00"));
        assert!(formatted.contains("REJECTED"));
        assert!(formatted.contains("Insufficient funds"));
    }
}
