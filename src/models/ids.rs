//! Transaction identifiers
//!
//! A newtype over a v4 UUID. Displayed short (`txn-1a2b3c4d`); lookups by
//! the user accept the full UUID, the short form, or any hex prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "txn-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Whether `query` names this id: full UUID, `txn-` short form, or hex prefix
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        let query = query.strip_prefix(DISPLAY_PREFIX).unwrap_or(query);
        if query.is_empty() {
            return false;
        }
        let query = query.to_ascii_lowercase();
        let full = self.0.to_string();
        full == query || full.starts_with(&query) || self.0.simple().to_string().starts_with(&query)
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.0.simple().to_string()[..8])
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let id = TransactionId::new();
        let display = id.to_string();
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_matches() {
        let id: TransactionId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();

        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(id.matches("txn-550e8400"));
        assert!(id.matches(&id.to_string()));
        assert!(id.matches("550E84"));
        assert!(id.matches("550e8400e29b"));
        assert!(!id.matches("txn-"));
        assert!(!id.matches(""));
        assert!(!id.matches("deadbeef"));
    }

    #[test]
    fn test_serialization_is_plain_uuid() {
        let id: TransactionId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");

        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
