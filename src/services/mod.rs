//! Service layer for pocket
//!
//! One state holder per screen. Each borrows the preference store, exposes
//! its values as observables, and never calls a peer service: after a
//! restore the caller refreshes each holder it keeps.

pub mod backup;
pub mod budget;
pub mod dashboard;
pub mod settings;

pub use backup::{BackupService, Confirmation, RestoreOutcome};
pub use budget::BudgetService;
pub use dashboard::{CategoryKind, CategorySpending, DashboardService, DashboardSummary};
pub use settings::SettingsService;
