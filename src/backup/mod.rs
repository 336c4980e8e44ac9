//! Backup system for pocket
//!
//! - `BackupArchive`: the serialized snapshot of user data
//!   (`transactions`, `budget`, `currency`)
//! - `BackupManager`: writes, lists and prunes backup units on disk
//!
//! Restoring is done by the preference store, which swaps in a validated
//! archive in one atomic write.
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket::backup::{BackupArchive, BackupManager};
//!
//! let manager = BackupManager::new(paths.backup_dir());
//! let unit = manager.write_unit(&archive.to_text()?)?;
//! let archive = BackupArchive::from_text(&manager.read_unit(&unit)?)?;
//! ```

mod archive;
mod manager;

pub use archive::BackupArchive;
pub use manager::{BackupManager, BackupUnit};
