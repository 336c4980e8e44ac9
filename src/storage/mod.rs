//! Storage layer for pocket
//!
//! JSON file storage with atomic writes. The preference store is the only
//! component holding durable user data.

pub mod file_io;
pub mod preferences;

pub use file_io::{read_json, write_json_atomic, write_text_atomic};
pub use preferences::{PreferenceStore, Preferences, RestoreResult};
