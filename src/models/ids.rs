//! Strongly-typed identifiers
//!
//! Newtype wrappers keep tax ids and account numbers from being mixed up with
//! plain strings and integers at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a tax id (CPF)
pub const TAX_ID_LEN: usize = 11;

/// A customer's tax id (CPF), stored as its 11 digits
///
/// Unique across the customer roster and used as the join key between
/// customers and accounts in persisted data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
    /// Parse a tax id, accepting either bare digits or the punctuated
    /// `000.000.000-00` form
    pub fn parse(s: &str) -> Result<Self, TaxIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TaxIdError::Empty);
        }

        let mut digits = String::with_capacity(TAX_ID_LEN);
        for c in s.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '.' | '-' | ' ' => {}
                other => return Err(TaxIdError::InvalidCharacter(other)),
            }
        }

        if digits.len() != TAX_ID_LEN {
            return Err(TaxIdError::WrongLength(digits.len()));
        }

        Ok(Self(digits))
    }

    /// The bare digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The punctuated `000.000.000-00` form
    pub fn formatted(&self) -> String {
        format!(
            "{}.{}.{}-{}",
            &self.0[0..3],
            &self.0[3..6],
            &self.0[6..9],
            &self.0[9..11]
        )
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaxId {
    type Err = TaxIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxId {
    type Error = TaxIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaxId> for String {
    fn from(id: TaxId) -> Self {
        id.0
    }
}

/// Validation errors for tax ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxIdError {
    Empty,
    InvalidCharacter(char),
    WrongLength(usize),
}

impl fmt::Display for TaxIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Tax id cannot be empty"),
            Self::InvalidCharacter(c) => write!(f, "Tax id contains invalid character '{}'", c),
            Self::WrongLength(len) => write!(
                f,
                "Tax id must have {} digits (got {})",
                TAX_ID_LEN, len
            ),
        }
    }
}

impl std::error::Error for TaxIdError {}

/// Sequential account number (1, 2, 3, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(u32);

impl AccountNumber {
    /// The number given to the first account ever opened
    pub const FIRST: Self = Self(1);

    /// Wrap a raw number
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// The raw number
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The number that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
