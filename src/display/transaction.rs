//! Transaction display formatting
//!
//! Register-style listing and a detail view for single transactions.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::DEFAULT_DATE_FORMAT;
use crate::models::{Currency, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: Currency, date_format: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: format_date(&txn.timestamp, date_format),
            category: truncate(&txn.category, 24),
            amount: currency.format(txn.amount),
            note: txn.note.as_deref().map(|n| truncate(n, 30)).unwrap_or_default(),
        }
    }
}

/// Format transactions (already ordered) as a table
pub fn format_transaction_list(
    transactions: &[Transaction],
    currency: Currency,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions
        .iter()
        .map(|t| TransactionRow::new(t, currency, date_format));
    Table::new(rows).with(Style::psql()).to_string()
}

/// Format one transaction for display
pub fn format_transaction_details(txn: &Transaction, currency: Currency) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("Type:        {}\n", txn.kind()));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", currency.format(txn.amount)));

    if let Some(note) = &txn.note {
        output.push_str(&format!("Note:        {}\n", note));
    }

    output
}

/// Render a timestamp on the local calendar
///
/// Falls back to the default format if `date_format` cannot be rendered.
fn format_date(timestamp: &DateTime<Utc>, date_format: &str) -> String {
    let local = timestamp.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(date_format)).is_err() {
        out.clear();
        out.push_str(&local.format(DEFAULT_DATE_FORMAT).to_string());
    }
    out
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
