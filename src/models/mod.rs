//! Core data models for pocket
//!
//! Transactions, money amounts, currency selection and the identifiers
//! that tie them together.

pub mod currency;
pub mod ids;
pub mod money;
pub mod transaction;

pub use currency::{Currency, UnknownCurrency};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{
    Transaction, TransactionKind, TransactionValidationError, INCOME_LABEL_PREFIX,
};
