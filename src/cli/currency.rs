//! Currency CLI commands
//!
//! The currency picker of the settings screen.

use clap::Subcommand;

use crate::error::{PocketError, PocketResult};
use crate::models::Currency;
use crate::services::SettingsService;
use crate::storage::PreferenceStore;

/// Currency subcommands
#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// Show the selected currency
    Show,

    /// List supported currencies
    List,

    /// Select a currency
    Set {
        /// Currency code or label (e.g., "LKR" or "LKR - Sri Lankan Rupee")
        code: String,
    },
}

/// Handle a currency command
pub fn handle_currency_command(store: &PreferenceStore, cmd: CurrencyCommands) -> PocketResult<()> {
    let service = SettingsService::new(store)?;

    match cmd {
        CurrencyCommands::Show => {
            println!("{}", service.selected_currency().get().label());
        }

        CurrencyCommands::List => {
            let selected = service.selected_currency().get();
            for currency in service.supported_currencies() {
                let marker = if *currency == selected { "*" } else { " " };
                println!("{} {}", marker, currency.label());
            }
        }

        CurrencyCommands::Set { code } => {
            let currency = code
                .parse::<Currency>()
                .map_err(|e| PocketError::Validation(e.to_string()))?;

            service.set_selected_currency(currency)?;
            println!("Currency updated to {}", currency.label());
        }
    }

    Ok(())
}
