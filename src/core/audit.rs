//! Append-only audit log of mutations applied during a run.
//!
//! One line per mutation, UTF-8, formatted as `<Action>: <old> -> <new>`.
//! The log is never read back by the tool.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{FixError, Result};

/// Kind of mutation recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Renamed,
    RenamedDirectory,
    BackupCreated,
    ConvertedContent,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::Renamed => write!(f, "Renamed"),
            AuditAction::RenamedDirectory => write!(f, "Renamed directory"),
            AuditAction::BackupCreated => write!(f, "Backup created"),
            AuditAction::ConvertedContent => write!(f, "Converted and replaced content"),
        }
    }
}

/// A single logged mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub old: PathBuf,
    pub new: PathBuf,
}

impl AuditEntry {
    pub fn new(action: AuditAction, old: impl Into<PathBuf>, new: impl Into<PathBuf>) -> Self {
        Self {
            action,
            old: old.into(),
            new: new.into(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.action,
            self.old.display(),
            self.new.display()
        )
    }
}

/// Handle to the audit log file.
///
/// The file is created by the first [`AuditLog::record`], so a run with nothing
/// to log leaves no file behind.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Start a fresh log at `path`, removing one left by an earlier run.
    pub fn reset(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(FixError::io(&path, e)),
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. The file is opened and closed around each write.
    pub fn record(&self, entry: &AuditEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FixError::io(&self.path, e))?;
        writeln!(file, "{}", entry).map_err(|e| FixError::io(&self.path, e))
    }
}
