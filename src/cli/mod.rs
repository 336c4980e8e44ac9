//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod budget;
pub mod currency;
pub mod dashboard;
pub mod history;
pub mod transaction;

pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use currency::{handle_currency_command, CurrencyCommands};
pub use dashboard::handle_dashboard_command;
pub use history::handle_history_command;
pub use transaction::{handle_transaction_command, TransactionCommands};
