//! Transaction CLI commands
//!
//! Implements CLI commands for recording, listing and deleting
//! transactions.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::{PocketError, PocketResult};
use crate::models::{Money, Transaction};
use crate::storage::PreferenceStore;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount (positive for income, negative for expense, e.g. "-12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name
        category: String,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
        /// Transaction date (YYYY-MM-DD, defaults to now)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete a transaction
    Remove {
        /// Transaction ID (full, "txn-..." or a unique prefix)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &PreferenceStore,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PocketResult<()> {
    let currency = store.get_selected_currency()?;

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            note,
            date,
        } => {
            let amount = Money::parse(&amount).map_err(|e| PocketError::Validation(e.to_string()))?;
            let timestamp = match date {
                Some(d) => parse_date(&d)?,
                None => Utc::now(),
            };

            let mut txn = Transaction::at(amount, category, timestamp);
            if let Some(note) = note {
                txn = txn.with_note(note);
            }

            let txn = store.add_transaction(txn)?;
            println!("Recorded {}", txn.kind().to_string().to_lowercase());
            print!("{}", format_transaction_details(&txn, currency));
        }

        TransactionCommands::List { limit } => {
            let transactions = store.get_transactions()?;
            let total = transactions.len();
            let shown: Vec<Transaction> = transactions.into_iter().take(limit).collect();

            println!(
                "{}",
                format_transaction_list(&shown, currency, &settings.date_format)
            );
            if total > shown.len() {
                println!("Showing {} of {} transactions", shown.len(), total);
            }
        }

        TransactionCommands::Remove { id } => {
            let txn = store.find_transaction(&id)?;
            let removed = store.remove_transaction(txn.id)?;
            println!(
                "Deleted transaction {} ({} {})",
                removed.id,
                removed.category,
                currency.format(removed.amount)
            );
        }
    }

    Ok(())
}

/// Parse a YYYY-MM-DD date as local midnight
fn parse_date(s: &str) -> PocketResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| PocketError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))?;

    // A DST gap can swallow midnight; take the earliest instant of that day
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .or_else(|| date.and_hms_opt(1, 0, 0)?.and_local_timezone(Local).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| PocketError::Validation(format!("Date '{}' does not exist locally", s)))
}
