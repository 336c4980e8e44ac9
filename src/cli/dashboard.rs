//! Dashboard CLI command

use crate::display::format_dashboard;
use crate::error::PocketResult;
use crate::services::DashboardService;
use crate::storage::PreferenceStore;

/// Print totals and the spending breakdown across all transactions
pub fn handle_dashboard_command(store: &PreferenceStore) -> PocketResult<()> {
    let service = DashboardService::new(store);
    let summary = service.load_dashboard_data()?;
    let currency = service.currency()?;

    println!("Dashboard");
    println!("=========");
    print!("{}", format_dashboard(&summary, currency));

    Ok(())
}
