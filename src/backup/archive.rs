//! Backup archive format
//!
//! A backup is one JSON object with exactly three fields:
//!
//! ```json
//! { "transactions": [ ... ], "budget": "1000.00", "currency": "USD" }
//! ```
//!
//! Anything else (missing fields, extra fields, a negative budget, invalid
//! or duplicate transactions) makes the archive unusable for restore.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PocketError, PocketResult};
use crate::models::{Currency, Money, Transaction};

/// The full set of user data captured by a backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackupArchive {
    pub transactions: Vec<Transaction>,
    pub budget: Money,
    pub currency: Currency,
}

impl BackupArchive {
    pub fn new(transactions: Vec<Transaction>, budget: Money, currency: Currency) -> Self {
        Self {
            transactions,
            budget,
            currency,
        }
    }

    /// Serialize to the text stored in a backup unit
    pub fn to_text(&self) -> PocketResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PocketError::Backup(format!("Failed to serialize backup: {}", e)))
    }

    /// Parse and validate backup text
    pub fn from_text(text: &str) -> PocketResult<Self> {
        let archive: BackupArchive = serde_json::from_str(text)
            .map_err(|e| PocketError::Backup(format!("Failed to parse backup: {}", e)))?;
        archive.validate()?;
        Ok(archive)
    }

    /// Check the invariants user data must hold before it may replace the current state
    pub fn validate(&self) -> PocketResult<()> {
        if self.budget.is_negative() {
            return Err(PocketError::Backup(format!(
                "Backup has a negative budget: {}",
                self.budget
            )));
        }
        if !self.budget.is_within_limit() {
            return Err(PocketError::Backup(format!(
                "Backup budget is out of range: {}",
                self.budget
            )));
        }

        let mut seen = HashSet::with_capacity(self.transactions.len());
        for txn in &self.transactions {
            txn.validate().map_err(|e| {
                PocketError::Backup(format!("Backup has an invalid transaction {}: {}", txn.id, e))
            })?;
            if !seen.insert(txn.id) {
                return Err(PocketError::Backup(format!(
                    "Backup has a duplicate transaction id: {}",
                    txn.id
                )));
            }
        }

        Ok(())
    }
}
