//! Append-only JSON-lines audit log

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;

use crate::error::PocketResult;

use super::entry::AuditEntry;

#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry; the line is flushed before returning
    pub fn log(&self, entry: &AuditEntry) -> PocketResult<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Every readable entry, oldest first
    pub fn read_all(&self) -> PocketResult<Vec<AuditEntry>> {
        self.read_recent(usize::MAX)
    }

    /// The last `count` readable entries, oldest first
    ///
    /// A line that does not parse, such as an append cut short by a crash,
    /// is skipped with a warning.
    pub fn read_recent(&self, count: usize) -> PocketResult<Vec<AuditEntry>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut recent = VecDeque::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => {
                    if recent.len() == count {
                        recent.pop_front();
                    }
                    recent.push_back(entry);
                }
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "skipping unreadable audit entry")
                }
            }
        }

        Ok(recent.into())
    }
}
