//! Transaction history
//!
//! An append-only, time-ordered log of the transactions successfully applied
//! to one account.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::HistoryError;
use super::transaction::{Transaction, TransactionKind};

/// One applied transaction and the moment it was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    timestamp: DateTime<Local>,
    #[serde(flatten)]
    transaction: Transaction,
}

impl HistoryEntry {
    /// Create an entry (used when rebuilding a history from stored records)
    pub fn new(timestamp: DateTime<Local>, transaction: Transaction) -> Self {
        Self {
            timestamp,
            transaction,
        }
    }

    /// When the transaction was applied
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// The applied transaction
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}

/// Append-only log of applied transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from stored entries, restoring chronological order
    ///
    /// The sort is stable, so entries sharing a timestamp keep their stored
    /// order.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.sort_by_key(|e| e.timestamp);
        Self { entries }
    }

    /// Record a transaction at the current local time
    pub fn append(&mut self, transaction: Transaction) {
        self.append_at(Local::now(), transaction);
    }

    /// Record a transaction at an explicit time
    pub fn append_at(&mut self, timestamp: DateTime<Local>, transaction: Transaction) {
        self.entries.push(HistoryEntry::new(timestamp, transaction));
    }

    /// An independent copy of all entries, oldest first
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of withdrawals recorded on the given calendar date
    pub fn withdrawals_on(&self, date: NaiveDate) -> usize {
        self.entries
            .iter()
            .filter(|e| e.transaction.is_withdrawal() && e.timestamp.date_naive() == date)
            .count()
    }

    /// Replay the log from a zero balance and return the resulting balance
    ///
    /// Every amount must be positive and the running balance may neither go
    /// negative nor overflow.
    pub fn replay(&self) -> Result<Money, HistoryError> {
        let mut balance = Money::zero();
        for (index, entry) in self.entries.iter().enumerate() {
            let amount = entry.transaction.amount();
            if !amount.is_positive() {
                return Err(HistoryError::NonPositiveAmount { index, amount });
            }
            balance = match entry.transaction.kind() {
                TransactionKind::Deposit => balance
                    .checked_add(amount)
                    .ok_or(HistoryError::Overflow { index })?,
                TransactionKind::Withdrawal => balance
                    .checked_sub(amount)
                    .filter(|b| !b.is_negative())
                    .ok_or(HistoryError::Overdrawn { index })?,
            };
        }
        Ok(balance)
    }
}
