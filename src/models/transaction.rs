//! Transaction model
//!
//! A transaction is one recorded income or expense event. The sign of the
//! amount is the kind: positive is income, negative is expense. Transactions
//! are never edited after creation.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Prefix that marks income categories in spending breakdowns
pub const INCOME_LABEL_PREFIX: &str = "Income:";

/// Income or expense, derived from the amount's sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Amount (positive for income, negative for expense)
    pub amount: Money,

    /// Category label, e.g. "Food" or "Salary"
    pub category: String,

    /// When the transaction happened
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Create a new transaction stamped now
    pub fn new(amount: Money, category: impl Into<String>) -> Self {
        Self::at(amount, category, Utc::now())
    }

    /// Create a new transaction with an explicit timestamp
    pub fn at(amount: Money, category: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            category: category.into().trim().to_string(),
            timestamp,
            note: None,
        }
    }

    /// Attach a note; blank notes are dropped
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        let note = note.trim();
        self.note = (!note.is_empty()).then(|| note.to_string());
        self
    }

    pub fn kind(&self) -> TransactionKind {
        if self.amount.is_negative() {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// Label used when grouping spending: income categories are prefixed
    pub fn spending_label(&self) -> String {
        match self.kind() {
            TransactionKind::Income => format!("{}{}", INCOME_LABEL_PREFIX, self.category),
            TransactionKind::Expense => self.category.clone(),
        }
    }

    /// Whether the transaction falls in the calendar month of `instant`,
    /// reckoned in `instant`'s own time zone
    pub fn in_month_of<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let local = self.timestamp.with_timezone(&instant.timezone());
        local.year() == instant.year() && local.month() == instant.month()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge);
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id,
            self.timestamp.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    ZeroAmount,
    AmountTooLarge,
    MissingCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAmount => write!(f, "Amount must not be zero"),
            Self::AmountTooLarge => write!(
                f,
                "Amount must not exceed {} in magnitude",
                Money::from_cents(Money::MAX_UNITS * 100)
            ),
            Self::MissingCategory => write!(f, "Category must not be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
