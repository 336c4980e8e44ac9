//! pocket - local-only personal finance tracker
//!
//! This library provides the data and state layer behind the `pocket`
//! command: a monthly budget with spending progress, a dashboard of totals
//! and per-category spending, currency selection, and backup/restore of
//! everything the user has entered.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, currency, transactions)
//! - `storage`: The preference store and atomic JSON file I/O
//! - `audit`: Audit logging system
//! - `backup`: Backup archive format and backup file management
//! - `observable`: Value cells with change callbacks
//! - `services`: One state holder per screen
//! - `display`: Text formatting for terminal output
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket::config::paths::PocketPaths;
//! use pocket::services::BudgetService;
//! use pocket::storage::PreferenceStore;
//!
//! let paths = PocketPaths::new()?;
//! let store = PreferenceStore::open(&paths)?;
//! let budget = BudgetService::new(&store)?;
//! println!("{}", budget.status_text());
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod observable;
pub mod services;
pub mod storage;

pub use error::PocketError;
