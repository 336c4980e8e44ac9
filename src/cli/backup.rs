//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use chrono::Utc;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_backup_list, format_size};
use crate::error::{PocketError, PocketResult};
use crate::services::{BackupService, RestoreOutcome};
use crate::storage::PreferenceStore;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List,

    /// Restore from a backup
    Restore {
        /// Backup name, list number, or 'latest'
        backup: String,

        /// Confirm overwriting current data
        #[arg(short, long)]
        force: bool,
    },

    /// Delete old backups according to retention policy
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    store: &PreferenceStore,
    settings: &Settings,
    cmd: BackupCommands,
) -> PocketResult<()> {
    let service = BackupService::new(store);

    match cmd {
        BackupCommands::Create => {
            let unit = service.try_backup()?;
            println!("Backup created: {}", unit.name);
            println!("Location: {}", unit.path.display());
        }

        BackupCommands::List => {
            let units = service.available_backups()?;

            if units.is_empty() {
                println!("No backup files found");
                println!("Create one with: pocket backup create");
                return Ok(());
            }

            println!("{}", format_backup_list(&units, Utc::now()));
            println!("Total: {} backup(s)", units.len());
        }

        BackupCommands::Restore { backup, force } => {
            if service.available_backups()?.is_empty() {
                println!("No backup files found");
                return Ok(());
            }

            let unit = service.select(&backup)?;

            match service.restore(&unit, force.into()) {
                RestoreOutcome::Cancelled => {
                    println!(
                        "Are you sure you want to restore from {}? This will overwrite your current data.",
                        unit.name
                    );
                    println!(
                        "Created: {} ({})",
                        unit.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(unit.size_bytes)
                    );
                    println!("To proceed, run again with --force flag:");
                    println!("  pocket backup restore {} --force", backup);
                }
                RestoreOutcome::Restored(result) => {
                    println!("Restore complete!");
                    println!("{}", result.summary());
                }
                RestoreOutcome::Failed(e) => {
                    return Err(PocketError::Backup(format!(
                        "Restore from {} failed, current data was left unchanged: {}",
                        unit.name, e
                    )));
                }
            }
        }

        BackupCommands::Prune { force } => {
            let retention = &settings.backup_retention;
            let candidates = service.prune_candidates(retention)?;

            if candidates.is_empty() {
                println!("No backups to prune.");
                println!("Current retention policy: keep {} newest", retention.keep);
                return Ok(());
            }

            println!("Prune Summary");
            println!("=============");
            println!("Retention policy: keep {} newest", retention.keep);
            println!("To be deleted: {} backup(s)", candidates.len());
            for unit in &candidates {
                println!("  {}", unit.name);
            }
            println!();

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  pocket backup prune --force");
                return Ok(());
            }

            let deleted = service.prune(retention)?;
            println!("Deleted {} backup(s).", deleted.len());
        }
    }

    Ok(())
}
