use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocket::cli::{
    handle_backup_command, handle_budget_command, handle_currency_command,
    handle_dashboard_command, handle_history_command, handle_transaction_command, BackupCommands,
    BudgetCommands, CurrencyCommands, TransactionCommands,
};
use pocket::config::{paths::PocketPaths, settings::Settings};
use pocket::storage::PreferenceStore;

/// Environment variable holding the log filter, e.g. `POCKET_LOG=debug`
const LOG_ENV: &str = "POCKET_LOG";

#[derive(Parser)]
#[command(
    name = "pocket",
    author = "Kaylee Beyene",
    version,
    about = "Local-only personal finance tracker",
    long_about = "pocket keeps a monthly budget, records income and expenses, \
                  summarizes spending by category, and backs up or restores \
                  everything from local JSON files."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show totals and spending by category
    Dashboard,

    /// Currency selection commands
    #[command(subcommand)]
    Currency(CurrencyCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Backup and restore commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PocketPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    // Initialize storage
    let store = PreferenceStore::open(&paths)?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "store opened");

    match cli.command {
        Some(Commands::Budget(cmd)) => handle_budget_command(&store, cmd)?,
        Some(Commands::Dashboard) => handle_dashboard_command(&store)?,
        Some(Commands::Currency(cmd)) => handle_currency_command(&store, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&store, &settings, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&store, &settings, cmd)?,
        Some(Commands::History { limit }) => handle_history_command(&paths, limit)?,
        Some(Commands::Config) => {
            println!("pocket Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Preferences file: {}", paths.preferences_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Backups kept by prune: {}", settings.backup_retention.keep);
            println!("  Date format:           {}", settings.date_format);
        }
        None => {
            println!("pocket - local personal finance tracker");
            println!();
            println!("Run 'pocket --help' for usage information.");
        }
    }

    Ok(())
}
