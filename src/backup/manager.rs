//! Backup manager for pocket
//!
//! Owns the backup directory. Each backup unit is one JSON file named after
//! its creation time (UTC): `backup-YYYYMMDD-HHMMSS-mmm.json`, with a `-N`
//! suffix when several backups land in the same millisecond.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::Serialize;

use crate::config::settings::BackupRetention;
use crate::error::{PocketError, PocketResult};
use crate::storage::file_io::write_text_atomic;

const NAME_PREFIX: &str = "backup-";
const NAME_SUFFIX: &str = ".json";
const MAX_SEQUENCE: u32 = 999;

/// One named, timestamped snapshot on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupUnit {
    /// File name, e.g. `backup-20250127-143022-456.json`
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
    /// Disambiguates backups created in the same millisecond
    pub sequence: u32,
}

/// Creates, enumerates and prunes backup units
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(backup_dir: PathBuf) -> Self {
        Self { backup_dir }
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Write `contents` as a new backup unit
    pub fn write_unit(&self, contents: &str) -> PocketResult<BackupUnit> {
        self.write_unit_at(contents, Utc::now())
    }

    fn write_unit_at(&self, contents: &str, now: DateTime<Utc>) -> PocketResult<BackupUnit> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| PocketError::Io(format!("Failed to create backup directory: {}", e)))?;

        let stem = format!(
            "{}{}-{:03}",
            NAME_PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );

        let (name, path) = (0..=MAX_SEQUENCE)
            .map(|seq| {
                let name = if seq == 0 {
                    format!("{}{}", stem, NAME_SUFFIX)
                } else {
                    format!("{}-{}{}", stem, seq, NAME_SUFFIX)
                };
                let path = self.backup_dir.join(&name);
                (name, path)
            })
            .find(|(_, path)| !path.exists())
            .ok_or_else(|| PocketError::Backup(format!("Too many backups named {}", stem)))?;

        write_text_atomic(&path, contents)
            .map_err(|e| PocketError::Backup(format!("Failed to write backup {}: {}", name, e)))?;

        self.parse_unit(&path)
            .ok_or_else(|| PocketError::Backup(format!("Backup {} was not readable after write", name)))
    }

    /// List all backup units, newest first
    pub fn list_units(&self) -> PocketResult<Vec<BackupUnit>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut units = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| PocketError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| PocketError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.is_file() {
                if let Some(unit) = self.parse_unit(&path) {
                    units.push(unit);
                }
            }
        }

        units.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.sequence.cmp(&a.sequence))
        });

        Ok(units)
    }

    /// Find a unit by file name (with or without the `.json` extension)
    pub fn get_unit(&self, name: &str) -> PocketResult<Option<BackupUnit>> {
        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Ok(None);
        }

        let file_name = if name.ends_with(NAME_SUFFIX) {
            name.to_string()
        } else {
            format!("{}{}", name, NAME_SUFFIX)
        };

        let path = self.backup_dir.join(file_name);
        if path.is_file() {
            Ok(self.parse_unit(&path))
        } else {
            Ok(None)
        }
    }

    pub fn latest(&self) -> PocketResult<Option<BackupUnit>> {
        Ok(self.list_units()?.into_iter().next())
    }

    /// Read the text stored in a unit
    pub fn read_unit(&self, unit: &BackupUnit) -> PocketResult<String> {
        fs::read_to_string(&unit.path)
            .map_err(|e| PocketError::Backup(format!("Failed to read backup {}: {}", unit.name, e)))
    }

    /// Delete all but the `retention.keep` newest units, returning what was deleted
    pub fn enforce_retention(&self, retention: &BackupRetention) -> PocketResult<Vec<BackupUnit>> {
        if retention.keep == 0 {
            return Err(PocketError::Config(
                "backup_retention.keep must be at least 1".into(),
            ));
        }

        let mut deleted = Vec::new();
        for unit in self.list_units()?.into_iter().skip(retention.keep as usize) {
            fs::remove_file(&unit.path)
                .map_err(|e| PocketError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(unit);
        }

        Ok(deleted)
    }

    /// Units that `enforce_retention` would delete
    pub fn units_beyond(&self, retention: &BackupRetention) -> PocketResult<Vec<BackupUnit>> {
        Ok(self
            .list_units()?
            .into_iter()
            .skip(retention.keep as usize)
            .collect())
    }

    fn parse_unit(&self, path: &Path) -> Option<BackupUnit> {
        let name = path.file_name()?.to_str()?.to_string();
        let (created_at, sequence) = parse_backup_name(&name)?;
        let size_bytes = fs::metadata(path).ok()?.len();

        Some(BackupUnit {
            name,
            path: path.to_path_buf(),
            created_at,
            size_bytes,
            sequence,
        })
    }
}

/// Parse `backup-YYYYMMDD-HHMMSS[-mmm[-N]].json` into its timestamp and sequence
fn parse_backup_name(name: &str) -> Option<(DateTime<Utc>, u32)> {
    let stem = name.strip_prefix(NAME_PREFIX)?.strip_suffix(NAME_SUFFIX)?;
    let parts: Vec<&str> = stem.split('-').collect();
    if !(2..=4).contains(&parts.len()) {
        return None;
    }

    let (date_part, time_part) = (parts[0], parts[1]);
    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let millis: u32 = match parts.get(2) {
        Some(m) if m.len() == 3 => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    let sequence: u32 = match parts.get(3) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let time = time.with_nanosecond(millis * 1_000_000)?;

    Some((
        DateTime::from_naive_utc_and_offset(NaiveDateTime::new(date, time), Utc),
        sequence,
    ))
}
