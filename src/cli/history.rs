//! History CLI command
//!
//! Prints the most recent audit log entries.

use crate::audit::AuditLogger;
use crate::config::paths::PocketPaths;
use crate::error::PocketResult;

/// Show the last `limit` changes, oldest first
pub fn handle_history_command(paths: &PocketPaths, limit: usize) -> PocketResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
