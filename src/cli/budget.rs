//! Budget CLI commands
//!
//! The budget screen: show the monthly budget with this month's progress,
//! or save a new budget.

use clap::Subcommand;

use crate::display::format_budget_status;
use crate::error::{PocketError, PocketResult};
use crate::models::Money;
use crate::services::BudgetService;
use crate::storage::PreferenceStore;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the monthly budget and this month's spending
    Show,

    /// Set the monthly budget
    Set {
        /// Amount (e.g., "1000" or "1,000.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(store: &PreferenceStore, cmd: BudgetCommands) -> PocketResult<()> {
    let service = BudgetService::new(store)?;
    let currency = store.get_selected_currency()?;

    match cmd {
        BudgetCommands::Show => {
            print!(
                "{}",
                format_budget_status(
                    service.budget().get(),
                    service.monthly_expenses().get(),
                    service.progress().get(),
                    currency,
                )
            );
        }

        BudgetCommands::Set { amount } => {
            let amount = Money::parse(&amount)
                .map_err(|_| PocketError::Validation(format!("Invalid budget amount: '{}'", amount)))?;

            service.update_budget(amount)?;

            println!("Budget updated");
            println!();
            print!(
                "{}",
                format_budget_status(
                    service.budget().get(),
                    service.monthly_expenses().get(),
                    service.progress().get(),
                    currency,
                )
            );
        }
    }

    Ok(())
}
