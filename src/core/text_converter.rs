//! Plain-text content repair.
//!
//! A `.txt` file whose bytes decode as GB2312 is left alone. Otherwise, if the
//! bytes decode as SHIFT-JIS, the original is moved to `<name>.bak` and the
//! decoded text is written back as UTF-8 under the original name.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::{Config, BACKUP_SUFFIX, TEXT_EXTENSION};
use crate::core::audit::{AuditAction, AuditEntry, AuditLog};
use crate::core::repair::CandidateKind;
use crate::error::{FixError, Result};
use crate::utils::encoding::LegacyEncoding;
use crate::utils::file_helper;

/// Result of converting a single text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Content already valid GB2312; untouched.
    AlreadyValid,
    /// Content rewritten as UTF-8, original kept at `backup`.
    Converted { backup: PathBuf },
    /// Neither GB2312 nor SHIFT-JIS; untouched.
    Undecodable,
}

/// Counts from one content-repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub converted: usize,
    pub already_valid: usize,
    pub undecodable: usize,
}

impl ConversionReport {
    fn add(&mut self, outcome: &ConversionOutcome) {
        match outcome {
            ConversionOutcome::AlreadyValid => self.already_valid += 1,
            ConversionOutcome::Converted { .. } => self.converted += 1,
            ConversionOutcome::Undecodable => self.undecodable += 1,
        }
    }
}

/// Converts garbled plain-text files under the working directory.
pub struct TextConverter<'a> {
    config: &'a Config,
    audit: &'a AuditLog,
}

impl<'a> TextConverter<'a> {
    pub fn new(config: &'a Config, audit: &'a AuditLog) -> Self {
        Self { config, audit }
    }

    /// Every `.txt` file under the working directory, except the audit log.
    pub fn find_text_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.config.work_dir)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() || self.config.is_log_file(entry.path()) {
                continue;
            }
            if is_text_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Convert each file in turn, stopping at the first filesystem error.
    pub fn convert_all(&self, files: &[PathBuf]) -> Result<ConversionReport> {
        let mut report = ConversionReport::default();
        for path in files {
            let outcome = self.convert_file(path)?;
            report.add(&outcome);
        }
        Ok(report)
    }

    /// Convert one file.
    pub fn convert_file(&self, path: &Path) -> Result<ConversionOutcome> {
        let data = fs::read(path).map_err(|e| FixError::io(path, e))?;

        let kind = CandidateKind::TextContent;

        if LegacyEncoding::Gb2312.decode_strict(&data).is_some() {
            debug!(path = %path.display(), %kind, encoding = %LegacyEncoding::Gb2312, "already valid");
            return Ok(ConversionOutcome::AlreadyValid);
        }
        let Some(text) = LegacyEncoding::ShiftJis.decode_strict(&data) else {
            debug!(path = %path.display(), %kind, "not decodable");
            return Ok(ConversionOutcome::Undecodable);
        };

        let backup = file_helper::append_suffix(path, BACKUP_SUFFIX);
        file_helper::rename_no_clobber(path, &backup)?;
        self.audit
            .record(&AuditEntry::new(AuditAction::BackupCreated, path, &backup))?;

        fs::write(path, text.as_bytes()).map_err(|e| FixError::io(path, e))?;
        self.audit
            .record(&AuditEntry::new(AuditAction::ConvertedContent, path, path))?;

        info!(
            path = %path.display(),
            backup = %backup.display(),
            from = %LegacyEncoding::ShiftJis,
            "converted {}",
            kind
        );
        Ok(ConversionOutcome::Converted { backup })
    }
}

/// Whether the file name ends with the plain-text extension.
pub fn is_text_file(path: &Path) -> bool {
    file_helper::leaf_name(path).is_some_and(|name| name.ends_with(TEXT_EXTENSION))
}
