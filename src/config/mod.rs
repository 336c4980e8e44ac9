//! Configuration module for pocket
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Settings persistence for the tool itself

pub mod paths;
pub mod settings;

pub use paths::PocketPaths;
pub use settings::{BackupRetention, Settings};
