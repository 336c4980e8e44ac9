//! Preference store
//!
//! The single durable record of user data: the monthly budget, the selected
//! currency and the transaction list, kept in `data/preferences.json`.
//!
//! Every mutation works on a copy, writes it atomically, and only then
//! replaces the in-memory record, so a failed write leaves both the file and
//! the store as they were.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::backup::{BackupArchive, BackupManager, BackupUnit};
use crate::config::paths::PocketPaths;
use crate::error::{PocketError, PocketResult};
use crate::models::{Currency, Money, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk shape of the preference record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub monthly_budget: Money,
    #[serde(default)]
    pub selected_currency: Currency,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Preferences {
    fn sort_transactions(&mut self) {
        self.transactions
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    }
}

impl From<BackupArchive> for Preferences {
    fn from(archive: BackupArchive) -> Self {
        let mut prefs = Self {
            monthly_budget: archive.budget,
            selected_currency: archive.currency,
            transactions: archive.transactions,
        };
        prefs.sort_transactions();
        prefs
    }
}

/// Outcome of a successful restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    /// Name of the backup unit that was restored
    pub unit_name: String,
    /// When that backup was created
    pub backup_date: DateTime<Utc>,
    pub transaction_count: usize,
    pub budget: Money,
    pub currency: Currency,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        format!(
            "Restored {} transaction(s), budget {}, currency {}",
            self.transaction_count, self.budget, self.currency
        )
    }
}

/// Durable store for budget, currency and transactions
pub struct PreferenceStore {
    path: PathBuf,
    data: RwLock<Preferences>,
    backups: BackupManager,
    audit: AuditLogger,
}

impl PreferenceStore {
    /// Open the store under `paths`, creating directories as needed
    ///
    /// A missing preferences file yields defaults (budget 0.00, USD, no
    /// transactions). A corrupt one is an error, never a silent reset.
    pub fn open(paths: &PocketPaths) -> PocketResult<Self> {
        paths.ensure_directories()?;

        let store = Self {
            path: paths.preferences_file(),
            data: RwLock::new(Preferences::default()),
            backups: BackupManager::new(paths.backup_dir()),
            audit: AuditLogger::new(paths.audit_log()),
        };
        store.load()?;
        Ok(store)
    }

    /// Reload the record from disk
    pub fn load(&self) -> PocketResult<()> {
        let mut file_data: Preferences = read_json(&self.path)?;
        file_data.sort_transactions();

        let mut data = self.data.write().map_err(lock_error)?;
        *data = file_data;
        Ok(())
    }

    pub fn get_monthly_budget(&self) -> PocketResult<Money> {
        Ok(self.read()?.monthly_budget)
    }

    /// Persist a new monthly budget; negative values are rejected untouched
    pub fn set_monthly_budget(&self, budget: Money) -> PocketResult<()> {
        if budget.is_negative() {
            return Err(PocketError::Validation("Budget cannot be negative".into()));
        }
        if !budget.is_within_limit() {
            return Err(PocketError::Validation("Budget is too large".into()));
        }

        let before = self.mutate(|prefs| {
            Ok(std::mem::replace(&mut prefs.monthly_budget, budget))
        })?;

        if before != budget {
            self.audit(AuditEntry::update(
                EntityType::Budget,
                "monthly_budget",
                &before,
                &budget,
            ));
        }
        Ok(())
    }

    pub fn get_selected_currency(&self) -> PocketResult<Currency> {
        Ok(self.read()?.selected_currency)
    }

    pub fn set_selected_currency(&self, currency: Currency) -> PocketResult<()> {
        let before = self.mutate(|prefs| {
            Ok(std::mem::replace(&mut prefs.selected_currency, currency))
        })?;

        if before != currency {
            self.audit(AuditEntry::update(
                EntityType::Currency,
                "selected_currency",
                &before,
                &currency,
            ));
        }
        Ok(())
    }

    /// All transactions, newest first
    pub fn get_transactions(&self) -> PocketResult<Vec<Transaction>> {
        Ok(self.read()?.transactions.clone())
    }

    /// Record a new transaction
    pub fn add_transaction(&self, txn: Transaction) -> PocketResult<Transaction> {
        txn.validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.mutate(|prefs| {
            if prefs.transactions.iter().any(|t| t.id == txn.id) {
                return Err(PocketError::Duplicate {
                    entity_type: "Transaction",
                    identifier: txn.id.to_string(),
                });
            }
            prefs.transactions.push(txn.clone());
            prefs.sort_transactions();
            Ok(())
        })?;

        self.audit(AuditEntry::create(
            EntityType::Transaction,
            txn.id.to_string(),
            &txn,
        ));
        Ok(txn)
    }

    /// Find one transaction by full id, short id or unique prefix
    pub fn find_transaction(&self, query: &str) -> PocketResult<Transaction> {
        let data = self.read()?;
        let mut matches = data.transactions.iter().filter(|t| t.id.matches(query));

        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn.clone()),
            (Some(_), Some(_)) => Err(PocketError::Validation(format!(
                "'{}' matches more than one transaction",
                query.trim()
            ))),
            (None, _) => Err(PocketError::transaction_not_found(query.trim())),
        }
    }

    /// Delete a transaction by id
    pub fn remove_transaction(&self, id: TransactionId) -> PocketResult<Transaction> {
        let removed = self.mutate(|prefs| {
            let index = prefs
                .transactions
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| PocketError::transaction_not_found(id.to_string()))?;
            Ok(prefs.transactions.remove(index))
        })?;

        self.audit(AuditEntry::delete(
            EntityType::Transaction,
            removed.id.to_string(),
            &removed,
        ));
        Ok(removed)
    }

    /// Current user data as a backup archive
    pub fn snapshot(&self) -> PocketResult<BackupArchive> {
        let data = self.read()?;
        Ok(BackupArchive::new(
            data.transactions.clone(),
            data.monthly_budget,
            data.selected_currency,
        ))
    }

    /// Write serialized backup text as a new unit; false on any failure
    pub fn create_backup(&self, serialized: &str) -> bool {
        match self.write_backup(serialized) {
            Ok(unit) => {
                tracing::info!(backup = %unit.name, "backup created");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "backup failed");
                false
            }
        }
    }

    /// Write serialized backup text as a new unit
    ///
    /// The text must be a valid archive, so every unit written here can be
    /// restored later.
    pub fn write_backup(&self, serialized: &str) -> PocketResult<BackupUnit> {
        let archive = BackupArchive::from_text(serialized)?;
        let unit = self.backups.write_unit(serialized)?;

        self.audit(AuditEntry::backup(
            unit.name.clone(),
            format!("{} transaction(s)", archive.transactions.len()),
        ));
        Ok(unit)
    }

    /// Available backup units, newest first
    pub fn get_backup_files(&self) -> PocketResult<Vec<BackupUnit>> {
        self.backups.list_units()
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Replace all user data from `unit`; false (with state unchanged) on any failure
    pub fn restore_from_backup(&self, unit: &BackupUnit) -> bool {
        match self.restore(unit) {
            Ok(result) => {
                tracing::info!(backup = %unit.name, "{}", result.summary());
                true
            }
            Err(e) => {
                tracing::warn!(backup = %unit.name, error = %e, "restore failed");
                false
            }
        }
    }

    /// Replace all user data from `unit` in one atomic write
    pub fn restore(&self, unit: &BackupUnit) -> PocketResult<RestoreResult> {
        let text = self.backups.read_unit(unit)?;
        let archive = BackupArchive::from_text(&text)?;

        let result = RestoreResult {
            unit_name: unit.name.clone(),
            backup_date: unit.created_at,
            transaction_count: archive.transactions.len(),
            budget: archive.budget,
            currency: archive.currency,
        };

        let restored = Preferences::from(archive);
        self.mutate(|prefs| {
            *prefs = restored;
            Ok(())
        })?;

        self.audit(AuditEntry::restore(unit.name.clone(), result.summary()));
        Ok(result)
    }

    fn read(&self) -> PocketResult<std::sync::RwLockReadGuard<'_, Preferences>> {
        self.data.read().map_err(lock_error)
    }

    /// Apply `f` to a copy of the record, persist it, then publish it in memory
    fn mutate<T>(&self, f: impl FnOnce(&mut Preferences) -> PocketResult<T>) -> PocketResult<T> {
        let mut data = self.data.write().map_err(lock_error)?;

        let mut next = data.clone();
        let out = f(&mut next)?;
        write_json_atomic(&self.path, &next)?;
        *data = next;

        Ok(out)
    }

    fn audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            tracing::warn!(error = %e, "failed to write audit entry");
        }
    }
}

fn lock_error<T>(e: std::sync::PoisonError<T>) -> PocketError {
    PocketError::Storage(format!("Preference store lock poisoned: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (PreferenceStore, PocketPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = PreferenceStore::open(&paths).unwrap();
        (store, paths, temp_dir)
    }

    fn txn(cents: i64, category: &str, day: u32) -> Transaction {
        let ts = Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap();
        Transaction::at(Money::from_cents(cents), category, ts)
    }

    #[test]
    fn test_defaults_without_file() {
        let (store, paths, _temp) = create_test_store();

        assert_eq!(store.get_monthly_budget().unwrap(), Money::zero());
        assert_eq!(store.get_selected_currency().unwrap(), Currency::Usd);
        assert!(store.get_transactions().unwrap().is_empty());
        assert!(!paths.preferences_file().exists());
    }

    #[test]
    fn test_budget_persists_across_reopen() {
        let (store, paths, _temp) = create_test_store();

        store.set_monthly_budget(Money::from_cents(100_000)).unwrap();

        let reopened = PreferenceStore::open(&paths).unwrap();
        assert_eq!(reopened.get_monthly_budget().unwrap(), Money::from_cents(100_000));

        let raw = fs::read_to_string(paths.preferences_file()).unwrap();
        assert!(raw.contains("\"monthly_budget\": \"1000.00\""));
    }

    #[test]
    fn test_negative_budget_rejected() {
        let (store, _paths, _temp) = create_test_store();
        store.set_monthly_budget(Money::from_cents(5_000)).unwrap();

        let err = store.set_monthly_budget(Money::from_cents(-1)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get_monthly_budget().unwrap(), Money::from_cents(5_000));
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let (store, _paths, _temp) = create_test_store();
        let big = Money::parse("90,000,000,000,000,000.00").unwrap();

        assert!(store.set_monthly_budget(big).unwrap_err().is_validation());
        let err = store
            .add_transaction(Transaction::new(big, "Salary"))
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(store.get_monthly_budget().unwrap(), Money::zero());
        assert!(store.get_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_currency_persists() {
        let (store, paths, _temp) = create_test_store();

        store.set_selected_currency(Currency::Lkr).unwrap();

        let reopened = PreferenceStore::open(&paths).unwrap();
        assert_eq!(reopened.get_selected_currency().unwrap(), Currency::Lkr);
    }

    #[test]
    fn test_transactions_newest_first() {
        let (store, _paths, _temp) = create_test_store();

        store.add_transaction(txn(-1_000, "Food", 3)).unwrap();
        store.add_transaction(txn(50_000, "Salary", 1)).unwrap();
        store.add_transaction(txn(-2_000, "Transport", 5)).unwrap();

        let categories: Vec<String> = store
            .get_transactions()
            .unwrap()
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(categories, ["Transport", "Food", "Salary"]);
    }

    #[test]
    fn test_add_rejects_invalid_and_duplicate() {
        let (store, _paths, _temp) = create_test_store();

        assert!(store.add_transaction(txn(0, "Food", 1)).unwrap_err().is_validation());

        let food = store.add_transaction(txn(-1_000, "Food", 1)).unwrap();
        let err = store.add_transaction(food).unwrap_err();
        assert!(matches!(err, PocketError::Duplicate { .. }));
        assert_eq!(store.get_transactions().unwrap().len(), 1);
    }

    #[test]
    fn test_find_and_remove() {
        let (store, paths, _temp) = create_test_store();
        let food = store.add_transaction(txn(-1_000, "Food", 1)).unwrap();

        let found = store.find_transaction(&food.id.to_string()).unwrap();
        assert_eq!(found, food);

        let removed = store.remove_transaction(food.id).unwrap();
        assert_eq!(removed, food);
        assert!(store.get_transactions().unwrap().is_empty());
        assert!(store.find_transaction(&food.id.to_string()).unwrap_err().is_not_found());
        assert!(store.remove_transaction(food.id).unwrap_err().is_not_found());

        let reopened = PreferenceStore::open(&paths).unwrap();
        assert!(reopened.get_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_backup_then_restore_round_trip() {
        let (store, _paths, _temp) = create_test_store();
        store.set_monthly_budget(Money::from_cents(100_000)).unwrap();
        store.set_selected_currency(Currency::Lkr).unwrap();
        store.add_transaction(txn(50_000, "Salary", 1)).unwrap();
        store
            .add_transaction(txn(-12_000, "Food", 2).with_note("weekly shop"))
            .unwrap();

        let before = store.snapshot().unwrap();
        assert!(store.create_backup(&before.to_text().unwrap()));

        store.set_monthly_budget(Money::from_cents(1)).unwrap();
        store.set_selected_currency(Currency::Usd).unwrap();
        store.add_transaction(txn(-500, "Coffee", 3)).unwrap();

        let units = store.get_backup_files().unwrap();
        assert_eq!(units.len(), 1);
        assert!(store.restore_from_backup(&units[0]));

        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn test_restore_corrupt_unit_leaves_state_unchanged() {
        let (store, paths, _temp) = create_test_store();
        store.set_monthly_budget(Money::from_cents(100_000)).unwrap();
        store.add_transaction(txn(-12_000, "Food", 2)).unwrap();
        let file_before = fs::read(paths.preferences_file()).unwrap();
        let snapshot_before = store.snapshot().unwrap();

        let unit = store.backups().write_unit("{\"transactions\": [").unwrap();
        assert!(!store.restore_from_backup(&unit));

        assert_eq!(fs::read(paths.preferences_file()).unwrap(), file_before);
        assert_eq!(store.snapshot().unwrap(), snapshot_before);
    }

    #[test]
    fn test_restore_missing_unit_fails() {
        let (store, _paths, _temp) = create_test_store();
        let unit = store.backups().write_unit("{}").unwrap();
        fs::remove_file(&unit.path).unwrap();

        let err = store.restore(&unit).unwrap_err();
        assert!(matches!(err, PocketError::Backup(_)));
    }

    #[test]
    fn test_create_backup_rejects_invalid_text() {
        let (store, _paths, _temp) = create_test_store();

        assert!(!store.create_backup("not a backup"));
        assert!(store.get_backup_files().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_preferences_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        fs::write(paths.preferences_file(), "garbage").unwrap();

        assert!(matches!(
            PreferenceStore::open(&paths),
            Err(PocketError::Storage(_))
        ));
    }

    #[test]
    fn test_mutations_are_audited() {
        let (store, paths, _temp) = create_test_store();
        store.set_monthly_budget(Money::from_cents(100_000)).unwrap();
        store.set_monthly_budget(Money::from_cents(100_000)).unwrap();
        let food = store.add_transaction(txn(-1_000, "Food", 1)).unwrap();
        store.remove_transaction(food.id).unwrap();
        assert!(store.create_backup(&store.snapshot().unwrap().to_text().unwrap()));

        let entries = AuditLogger::new(paths.audit_log()).read_all().unwrap();
        let ops: Vec<Operation> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            ops,
            [
                Operation::Update,
                Operation::Create,
                Operation::Delete,
                Operation::Backup
            ]
        );
        assert_eq!(entries[0].summary.as_deref(), Some("0.00 -> 1000.00"));
    }
}
