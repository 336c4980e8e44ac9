//! Budget and dashboard display formatting
//!
//! Plain-text renderings of what the budget and dashboard screens show:
//! a progress bar, the totals, and the spending breakdown.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Currency, Money};
use crate::services::{CategoryKind, DashboardSummary};

const BAR_WIDTH: usize = 20;

/// Text progress bar, e.g. `[#####---------------]`; full above 100%
pub fn format_progress_bar(percent: u64, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Budget screen: budget, spending this month, progress
pub fn format_budget_status(
    budget: Money,
    expenses: Money,
    progress: u64,
    currency: Currency,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Monthly budget:  {}\n", currency.format(budget)));
    output.push_str(&format!("Spent this month: {}\n", currency.format(expenses)));

    if budget.is_positive() {
        let remaining = budget - expenses;
        output.push_str(&format!("Remaining:       {}\n", currency.format(remaining)));
    }

    output.push_str(&format!(
        "{} {}%\n",
        format_progress_bar(progress, BAR_WIDTH),
        progress
    ));

    if budget.is_positive() && expenses > budget {
        output.push_str("Over budget!\n");
    }

    output
}

#[derive(Tabled)]
struct SpendingRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Dashboard screen: totals then the per-category breakdown
pub fn format_dashboard(summary: &DashboardSummary, currency: Currency) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Total balance: {}\n",
        currency.format(summary.total_balance)
    ));
    output.push_str(&format!(
        "Income:        {}\n",
        currency.format(summary.total_income)
    ));
    output.push_str(&format!(
        "Expenses:      {}\n",
        currency.format(summary.total_expense)
    ));
    output.push('\n');

    let categories = summary.categories();
    if categories.is_empty() {
        output.push_str("No spending recorded yet.\n");
        return output;
    }

    let total: Money = categories.iter().map(|c| c.amount).sum();
    let rows = categories.iter().map(|c| {
        let share = c.amount.percent_of(total);
        SpendingRow {
            category: c.display_name().to_string(),
            kind: match c.kind {
                CategoryKind::Income => "Income",
                CategoryKind::Expense => "Expense",
            },
            amount: currency.format(c.amount),
            share: format!("{} {:>3}%", format_progress_bar(share, 10), share),
        }
    });

    output.push_str(&Table::new(rows).with(Style::psql()).to_string());
    output.push('\n');
    output
}
