//! Audit logging for pocket
//!
//! Records every durable change to user data (budget, currency,
//! transactions, backups and restores) in an append-only JSON-lines file.
//!
//! - `AuditEntry`: one operation with optional before/after values
//! - `AuditLogger`: appends entries and reads them back
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::update(EntityType::Budget, "monthly_budget", &old, &new))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
