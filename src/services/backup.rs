//! Backup service
//!
//! The backup and restore actions of the settings screen: snapshot the
//! store into a backup unit, pick a unit, and restore it once the user has
//! confirmed.

use crate::backup::BackupUnit;
use crate::config::settings::BackupRetention;
use crate::error::{PocketError, PocketResult};
use crate::storage::{PreferenceStore, RestoreResult};

/// The user's answer to the restore confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// What happened to a restore request
#[derive(Debug)]
pub enum RestoreOutcome {
    /// No confirmation; nothing was touched
    Cancelled,
    Restored(RestoreResult),
    /// The unit could not be read, parsed or applied; data is unchanged
    Failed(PocketError),
}

impl RestoreOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored(_))
    }
}

/// Service for backup and restore
pub struct BackupService<'a> {
    store: &'a PreferenceStore,
}

impl<'a> BackupService<'a> {
    pub fn new(store: &'a PreferenceStore) -> Self {
        Self { store }
    }

    /// Snapshot budget, currency and transactions into a new backup unit
    pub fn backup(&self) -> bool {
        match self.store.snapshot().and_then(|archive| archive.to_text()) {
            Ok(text) => self.store.create_backup(&text),
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize backup");
                false
            }
        }
    }

    /// Like [`backup`](Self::backup), but reports the unit or the failure
    pub fn try_backup(&self) -> PocketResult<BackupUnit> {
        let text = self.store.snapshot()?.to_text()?;
        self.store.write_backup(&text)
    }

    /// Backup units to choose from, newest first
    pub fn available_backups(&self) -> PocketResult<Vec<BackupUnit>> {
        self.store.get_backup_files()
    }

    /// Resolve a user selection: a file name, a 1-based list index, or `latest`
    pub fn select(&self, selector: &str) -> PocketResult<BackupUnit> {
        let selector = selector.trim();
        let units = self.available_backups()?;

        if selector.eq_ignore_ascii_case("latest") {
            return units
                .into_iter()
                .next()
                .ok_or_else(|| PocketError::backup_not_found("latest"));
        }

        if let Ok(index) = selector.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| units.get(i).cloned())
                .ok_or_else(|| PocketError::backup_not_found(selector));
        }

        self.store
            .backups()
            .get_unit(selector)?
            .ok_or_else(|| PocketError::backup_not_found(selector))
    }

    /// Replace all user data from `unit`, if the user confirmed
    ///
    /// Dependent state holders must be refreshed by the caller afterwards.
    pub fn restore(&self, unit: &BackupUnit, confirmation: Confirmation) -> RestoreOutcome {
        if confirmation == Confirmation::Declined {
            tracing::debug!(backup = %unit.name, "restore not confirmed");
            return RestoreOutcome::Cancelled;
        }

        match self.store.restore(unit) {
            Ok(result) => RestoreOutcome::Restored(result),
            Err(e) => {
                tracing::warn!(backup = %unit.name, error = %e, "restore failed");
                RestoreOutcome::Failed(e)
            }
        }
    }

    /// Units that `prune` would delete under `retention`
    pub fn prune_candidates(&self, retention: &BackupRetention) -> PocketResult<Vec<BackupUnit>> {
        self.store.backups().units_beyond(retention)
    }

    /// Delete all but the newest `retention.keep` units
    pub fn prune(&self, retention: &BackupRetention) -> PocketResult<Vec<BackupUnit>> {
        let deleted = self.store.backups().enforce_retention(retention)?;
        if !deleted.is_empty() {
            tracing::info!(count = deleted.len(), "pruned old backups");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketPaths;
    use crate::models::{Currency, Money, Transaction};
    use crate::services::{BudgetService, DashboardService, SettingsService};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (PreferenceStore, PocketPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = PreferenceStore::open(&paths).unwrap();
        (store, paths, temp_dir)
    }

    fn seed(store: &PreferenceStore) {
        store.set_monthly_budget(Money::from_cents(100_000)).unwrap();
        store.set_selected_currency(Currency::Lkr).unwrap();
        store
            .add_transaction(Transaction::new(Money::from_cents(50_000), "Salary"))
            .unwrap();
        store
            .add_transaction(Transaction::new(Money::from_cents(-12_000), "Food"))
            .unwrap();
    }

    #[test]
    fn test_backup_writes_three_field_archive() {
        let (store, _paths, _temp) = create_test_store();
        seed(&store);
        let service = BackupService::new(&store);

        assert!(service.backup());

        let units = service.available_backups().unwrap();
        assert_eq!(units.len(), 1);
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&units[0].path).unwrap()).unwrap();
        assert_eq!(value["budget"], "1000.00");
        assert_eq!(value["currency"], "LKR");
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_restore_requires_confirmation() {
        let (store, _paths, _temp) = create_test_store();
        seed(&store);
        let service = BackupService::new(&store);
        let unit = service.try_backup().unwrap();

        store.set_monthly_budget(Money::from_cents(1)).unwrap();

        let outcome = service.restore(&unit, Confirmation::Declined);
        assert!(matches!(outcome, RestoreOutcome::Cancelled));
        assert_eq!(store.get_monthly_budget().unwrap(), Money::from_cents(1));
    }

    #[test]
    fn test_restore_then_refresh_holders() {
        let (store, _paths, _temp) = create_test_store();
        seed(&store);
        let service = BackupService::new(&store);
        let unit = service.try_backup().unwrap();

        let budget = BudgetService::new(&store).unwrap();
        let settings = SettingsService::new(&store).unwrap();
        let dashboard = DashboardService::new(&store);

        budget.update_budget(Money::from_cents(5_000)).unwrap();
        settings.set_selected_currency(Currency::Usd).unwrap();
        store
            .add_transaction(Transaction::new(Money::from_cents(-999), "Coffee"))
            .unwrap();

        let outcome = service.restore(&unit, Confirmation::Confirmed);
        let result = match outcome {
            RestoreOutcome::Restored(result) => result,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(result.transaction_count, 2);

        budget.refresh().unwrap();
        settings.refresh().unwrap();
        let summary = dashboard.load_dashboard_data().unwrap();

        assert_eq!(budget.budget().get(), Money::from_cents(100_000));
        assert_eq!(settings.selected_currency().get(), Currency::Lkr);
        assert_eq!(summary.total_balance, Money::from_cents(38_000));
    }

    #[test]
    fn test_restore_corrupt_unit_fails() {
        let (store, paths, _temp) = create_test_store();
        seed(&store);
        let before = fs::read(paths.preferences_file()).unwrap();
        let unit = store.backups().write_unit("{ truncated").unwrap();

        let outcome = BackupService::new(&store).restore(&unit, Confirmation::Confirmed);
        assert!(matches!(outcome, RestoreOutcome::Failed(PocketError::Backup(_))));
        assert_eq!(fs::read(paths.preferences_file()).unwrap(), before);
    }

    #[test]
    fn test_select() {
        let (store, _paths, _temp) = create_test_store();
        let service = BackupService::new(&store);

        assert!(service.select("latest").unwrap_err().is_not_found());

        let first = service.try_backup().unwrap();
        let second = service.try_backup().unwrap();

        assert_eq!(service.select("latest").unwrap(), second);
        assert_eq!(service.select("1").unwrap(), second);
        assert_eq!(service.select("2").unwrap(), first);
        assert_eq!(service.select(&first.name).unwrap(), first);
        assert!(service.select("0").unwrap_err().is_not_found());
        assert!(service.select("3").unwrap_err().is_not_found());
        assert!(service.select("backup-nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_prune() {
        let (store, _paths, _temp) = create_test_store();
        let service = BackupService::new(&store);
        for _ in 0..4 {
            service.try_backup().unwrap();
        }

        let retention = BackupRetention { keep: 2 };
        assert_eq!(service.prune_candidates(&retention).unwrap().len(), 2);
        assert_eq!(service.prune(&retention).unwrap().len(), 2);
        assert_eq!(service.available_backups().unwrap().len(), 2);
        assert!(service.prune(&retention).unwrap().is_empty());
    }
}
