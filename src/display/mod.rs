//! Display formatting for terminal output
//!
//! Turns service values into the text the command handlers print.

pub mod backup;
pub mod budget;
pub mod transaction;

pub use backup::{format_backup_list, format_duration, format_size};
pub use budget::{format_budget_status, format_dashboard, format_progress_bar};
pub use transaction::{format_transaction_details, format_transaction_list};
