//! Budget service
//!
//! Holds the monthly budget and this month's spending for the budget
//! screen, and keeps the derived progress percentage in step with both.

use chrono::{DateTime, Local, TimeZone};

use crate::error::{PocketError, PocketResult};
use crate::models::{Money, Transaction};
use crate::observable::Observable;
use crate::storage::PreferenceStore;

/// State holder for the budget screen
pub struct BudgetService<'a> {
    store: &'a PreferenceStore,
    budget: Observable<Money>,
    monthly_expenses: Observable<Money>,
    progress: Observable<u64>,
}

impl<'a> BudgetService<'a> {
    /// Create a budget service seeded from the store, using the current
    /// month of the local calendar
    pub fn new(store: &'a PreferenceStore) -> PocketResult<Self> {
        Self::as_of(store, Local::now())
    }

    /// Create a budget service whose month is the one containing `now`,
    /// in `now`'s time zone
    pub fn as_of<Tz: TimeZone>(store: &'a PreferenceStore, now: DateTime<Tz>) -> PocketResult<Self> {
        let service = Self {
            store,
            budget: Observable::default(),
            monthly_expenses: Observable::default(),
            progress: Observable::default(),
        };
        service.refresh_as_of(now)?;
        Ok(service)
    }

    pub fn budget(&self) -> &Observable<Money> {
        &self.budget
    }

    pub fn monthly_expenses(&self) -> &Observable<Money> {
        &self.monthly_expenses
    }

    pub fn progress(&self) -> &Observable<u64> {
        &self.progress
    }

    /// Re-read budget and spending from the store
    pub fn refresh(&self) -> PocketResult<()> {
        self.refresh_as_of(Local::now())
    }

    pub fn refresh_as_of<Tz: TimeZone>(&self, now: DateTime<Tz>) -> PocketResult<()> {
        let budget = self.store.get_monthly_budget()?;
        let expenses = monthly_expenses(&self.store.get_transactions()?, &now);

        self.budget.set(budget);
        self.monthly_expenses.set(expenses);
        self.publish_progress();
        Ok(())
    }

    /// Persist a new budget and republish it
    ///
    /// Negative amounts are rejected before the store is touched.
    pub fn update_budget(&self, amount: Money) -> PocketResult<()> {
        if amount.is_negative() {
            return Err(PocketError::Validation("Budget cannot be negative".into()));
        }

        self.store.set_monthly_budget(amount)?;
        self.budget.set(amount);
        self.publish_progress();

        tracing::debug!(budget = %amount, "budget updated");
        Ok(())
    }

    /// Text shown next to the progress bar, e.g. "25%"
    pub fn status_text(&self) -> String {
        format!("{}%", self.progress.get())
    }

    fn publish_progress(&self) {
        let progress = self.monthly_expenses.get().percent_of(self.budget.get());
        self.progress.set(progress);
    }
}

/// Sum of expense magnitudes in the calendar month containing `now`
pub fn monthly_expenses<Tz: TimeZone>(transactions: &[Transaction], now: &DateTime<Tz>) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.in_month_of(now))
        .map(|t| t.amount.abs())
        .sum()
}
