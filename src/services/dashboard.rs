//! Dashboard service
//!
//! Aggregates every stored transaction into the dashboard totals and the
//! per-category spending map that feeds the chart.

use std::collections::BTreeMap;

use crate::error::PocketResult;
use crate::models::{Currency, Money, Transaction, INCOME_LABEL_PREFIX};
use crate::observable::Observable;
use crate::storage::PreferenceStore;

/// Whether a spending label belongs to an income or an expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn from_label(label: &str) -> Self {
        if label.starts_with(INCOME_LABEL_PREFIX) {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

/// One slice of the spending chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpending {
    pub label: String,
    pub amount: Money,
    pub kind: CategoryKind,
}

impl CategorySpending {
    /// Label without the income prefix
    pub fn display_name(&self) -> &str {
        self.label
            .strip_prefix(INCOME_LABEL_PREFIX)
            .unwrap_or(&self.label)
    }
}

/// Totals computed in one pass over the transaction set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub total_balance: Money,
    pub category_spending: BTreeMap<String, Money>,
}

impl DashboardSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self::default();

        for txn in transactions {
            let magnitude = txn.amount.abs();
            if txn.is_income() {
                summary.total_income += magnitude;
            } else if txn.is_expense() {
                summary.total_expense += magnitude;
            }

            *summary
                .category_spending
                .entry(txn.spending_label())
                .or_insert_with(Money::zero) += magnitude;
        }

        summary.total_balance = summary.total_income - summary.total_expense;
        summary
    }

    /// Spending entries with their presentation kind, ordered by label
    pub fn categories(&self) -> Vec<CategorySpending> {
        self.category_spending
            .iter()
            .map(|(label, amount)| CategorySpending {
                label: label.clone(),
                amount: *amount,
                kind: CategoryKind::from_label(label),
            })
            .collect()
    }
}

/// State holder for the dashboard screen
pub struct DashboardService<'a> {
    store: &'a PreferenceStore,
    total_income: Observable<Money>,
    total_expense: Observable<Money>,
    total_balance: Observable<Money>,
    category_spending: Observable<BTreeMap<String, Money>>,
}

impl<'a> DashboardService<'a> {
    /// Create a dashboard service; values stay zero until `load_dashboard_data`
    pub fn new(store: &'a PreferenceStore) -> Self {
        Self {
            store,
            total_income: Observable::default(),
            total_expense: Observable::default(),
            total_balance: Observable::default(),
            category_spending: Observable::default(),
        }
    }

    pub fn total_income(&self) -> &Observable<Money> {
        &self.total_income
    }

    pub fn total_expense(&self) -> &Observable<Money> {
        &self.total_expense
    }

    pub fn total_balance(&self) -> &Observable<Money> {
        &self.total_balance
    }

    pub fn category_spending(&self) -> &Observable<BTreeMap<String, Money>> {
        &self.category_spending
    }

    /// Recompute every figure from the full transaction set and publish it
    pub fn load_dashboard_data(&self) -> PocketResult<DashboardSummary> {
        let transactions = self.store.get_transactions()?;
        let summary = DashboardSummary::from_transactions(&transactions);

        self.total_income.set(summary.total_income);
        self.total_expense.set(summary.total_expense);
        self.total_balance.set(summary.total_balance);
        self.category_spending.set(summary.category_spending.clone());

        tracing::debug!(
            transactions = transactions.len(),
            categories = summary.category_spending.len(),
            "dashboard recomputed"
        );
        Ok(summary)
    }

    /// Currency used to format dashboard amounts
    pub fn currency(&self) -> PocketResult<Currency> {
        self.store.get_selected_currency()
    }
}
