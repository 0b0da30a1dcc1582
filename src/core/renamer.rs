//! File and directory name repair.
//!
//! Files are renamed as the walk meets them. Directories are only collected
//! during the walk and renamed afterwards, deepest first: renaming a directory
//! mid-walk would invalidate the paths of everything still queued beneath it.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::Config;
use crate::core::audit::{AuditAction, AuditEntry, AuditLog};
use crate::core::repair::{CandidateKind, NameCandidate, RepairVerdict};
use crate::error::Result;
use crate::utils::file_helper;

/// A directory found by the walk, awaiting its rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirWorkItem {
    pub path: PathBuf,
    /// Number of path segments below the working directory.
    pub depth: usize,
}

/// Counts from one name-repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub files_renamed: usize,
    pub dirs_renamed: usize,
    /// Names that looked garbled but could not be recovered.
    pub unrecoverable: usize,
    /// Names skipped because they are not valid Unicode.
    pub non_unicode: usize,
}

impl RenameReport {
    pub fn total_renamed(&self) -> usize {
        self.files_renamed + self.dirs_renamed
    }
}

/// Repairs garbled file and directory names under the working directory.
pub struct NameRepairer<'a> {
    config: &'a Config,
    audit: &'a AuditLog,
}

impl<'a> NameRepairer<'a> {
    pub fn new(config: &'a Config, audit: &'a AuditLog) -> Self {
        Self { config, audit }
    }

    /// Walk the tree once, renaming files, then rename the collected directories.
    pub fn run(&self) -> Result<RenameReport> {
        let mut report = RenameReport::default();
        let directories = self.repair_files(&mut report)?;
        self.repair_directories(directories, &mut report)?;
        Ok(report)
    }

    /// Rename files during the walk and return every directory below the root.
    ///
    /// Sorting makes walkdir read each directory fully before yielding its
    /// entries, so renaming a file never disturbs an open directory listing.
    fn repair_files(&self, report: &mut RenameReport) -> Result<Vec<DirWorkItem>> {
        let mut directories = Vec::new();

        for entry in WalkDir::new(&self.config.work_dir)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            // Links are not followed, so a linked directory is never walked
            // into and keeps its name.
            if entry.path_is_symlink() && entry.path().is_dir() {
                debug!(path = %entry.path().display(), "skipping directory symlink");
                continue;
            }
            if entry.file_type().is_dir() {
                directories.push(DirWorkItem {
                    path: entry.path().to_path_buf(),
                    depth: entry.depth(),
                });
                continue;
            }
            if self.config.is_log_file(entry.path()) {
                continue;
            }
            if self.repair_entry(entry.path(), CandidateKind::FileName, report)? {
                report.files_renamed += 1;
            }
        }

        Ok(directories)
    }

    /// Rename directories deepest first.
    ///
    /// By the time a directory is renamed, everything below it has been handled
    /// and its own path is still the one the walk recorded.
    fn repair_directories(
        &self,
        mut directories: Vec<DirWorkItem>,
        report: &mut RenameReport,
    ) -> Result<()> {
        directories.sort_by_key(|dir| Reverse(dir.depth));

        for dir in &directories {
            if self.repair_entry(&dir.path, CandidateKind::DirName, report)? {
                report.dirs_renamed += 1;
            }
        }
        Ok(())
    }

    /// Repair one leaf name in place. Returns whether a rename happened.
    fn repair_entry(
        &self,
        path: &Path,
        kind: CandidateKind,
        report: &mut RenameReport,
    ) -> Result<bool> {
        let Some(name) = file_helper::leaf_name(path) else {
            debug!(path = %path.display(), "skipping name that is not valid Unicode");
            report.non_unicode += 1;
            return Ok(false);
        };

        let new_name = match NameCandidate::new(name, path, kind).repair() {
            RepairVerdict::Repaired(new_name) => new_name,
            RepairVerdict::Unrecoverable => {
                report.unrecoverable += 1;
                return Ok(false);
            }
            RepairVerdict::Unchanged => return Ok(false),
        };

        let new_path = file_helper::sibling(path, &new_name);
        file_helper::rename_no_clobber(path, &new_path)?;

        let action = match kind {
            CandidateKind::DirName => AuditAction::RenamedDirectory,
            _ => AuditAction::Renamed,
        };
        self.audit.record(&AuditEntry::new(action, path, &new_path))?;
        info!(from = %path.display(), to = %new_path.display(), "{}", action);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::garble;
    use crate::error::FixError;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path());
        (dir, config)
    }

    fn log_lines(config: &Config) -> Vec<String> {
        fs::read_to_string(&config.log_file)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_renames_garbled_file() {
        let (_dir, config) = setup();
        let garbled = garble("あ");
        fs::write(config.work_dir.join(&garbled), "data").unwrap();

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let report = NameRepairer::new(&config, &audit).run().unwrap();

        assert_eq!(report.files_renamed, 1);
        assert!(!config.work_dir.join(&garbled).exists());
        assert_eq!(fs::read_to_string(config.work_dir.join("あ")).unwrap(), "data");
        assert_eq!(
            log_lines(&config),
            vec![format!(
                "Renamed: {} -> {}",
                config.work_dir.join(&garbled).display(),
                config.work_dir.join("あ").display()
            )]
        );
    }

    #[test]
    fn test_nested_directories_deepest_first() {
        let (_dir, config) = setup();
        let deep = config
            .work_dir
            .join(garble("テスト"))
            .join(garble("資料"))
            .join(garble("音楽"));
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join(format!("{}.mp3", garble("新しいフォルダ"))), "x").unwrap();
        fs::create_dir(config.work_dir.join(garble("テスト")).join("plain")).unwrap();

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let report = NameRepairer::new(&config, &audit).run().unwrap();

        assert_eq!(report.files_renamed, 1);
        assert_eq!(report.dirs_renamed, 3);
        assert_eq!(report.total_renamed(), 4);
        let repaired = config.work_dir.join("テスト").join("資料").join("音楽");
        assert!(repaired.join("新しいフォルダ.mp3").is_file());
        assert!(config.work_dir.join("テスト").join("plain").is_dir());

        let lines = log_lines(&config);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Renamed: "));
        assert!(lines[0].ends_with("新しいフォルダ.mp3"));
        // Directory renames run from the deepest level up
        assert!(lines[1].starts_with("Renamed directory: "));
        assert!(lines[1].ends_with("音楽"));
        assert!(lines[2].ends_with("資料"));
        assert!(lines[3].ends_with(&format!("-> {}", config.work_dir.join("テスト").display())));
    }

    #[test]
    fn test_sibling_directories_at_same_depth() {
        let (_dir, config) = setup();
        for name in ["テスト", "資料", "音楽"] {
            fs::create_dir_all(config.work_dir.join(garble(name)).join(garble("カタカナ"))).unwrap();
        }

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let report = NameRepairer::new(&config, &audit).run().unwrap();

        assert_eq!(report.dirs_renamed, 6);
        for name in ["テスト", "資料", "音楽"] {
            assert!(config.work_dir.join(name).join("カタカナ").is_dir());
        }
    }

    #[test]
    fn test_clean_names_untouched() {
        let (_dir, config) = setup();
        fs::create_dir(config.work_dir.join("中文目录")).unwrap();
        fs::write(config.work_dir.join("中文目录").join("日本語.doc"), "x").unwrap();
        fs::write(config.work_dir.join("readme.md"), "x").unwrap();

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let report = NameRepairer::new(&config, &audit).run().unwrap();

        assert_eq!(report, RenameReport::default());
        assert!(config.work_dir.join("中文目录").join("日本語.doc").is_file());
        assert!(!config.log_file.exists());
    }

    #[test]
    fn test_unrecoverable_name_left_alone() {
        let (_dir, config) = setup();
        fs::write(config.work_dir.join("侢.dat"), "x").unwrap();

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let report = NameRepairer::new(&config, &audit).run().unwrap();

        assert_eq!(report.unrecoverable, 1);
        assert_eq!(report.total_renamed(), 0);
        assert!(config.work_dir.join("侢.dat").is_file());
    }

    #[test]
    fn test_refuses_to_overwrite_existing_entry() {
        let (_dir, config) = setup();
        fs::write(config.work_dir.join(garble("あ")), "garbled").unwrap();
        fs::write(config.work_dir.join("あ"), "existing").unwrap();

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let err = NameRepairer::new(&config, &audit).run().unwrap_err();

        assert!(matches!(err, FixError::TargetExists { .. }));
        assert_eq!(fs::read_to_string(config.work_dir.join("あ")).unwrap(), "existing");
        assert_eq!(
            fs::read_to_string(config.work_dir.join(garble("あ"))).unwrap(),
            "garbled"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlinks_keep_their_names() {
        use std::os::unix::fs::symlink;

        let (_dir, config) = setup();
        let target = config.work_dir.join(garble("資料"));
        fs::create_dir(&target).unwrap();
        fs::write(config.work_dir.join("data.bin"), "x").unwrap();
        symlink(&target, config.work_dir.join(garble("テスト"))).unwrap();
        symlink(config.work_dir.join("data.bin"), config.work_dir.join(garble("音楽"))).unwrap();

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let report = NameRepairer::new(&config, &audit).run().unwrap();

        assert_eq!(report.dirs_renamed, 1);
        assert_eq!(report.files_renamed, 1);
        assert!(config.work_dir.join("資料").is_dir());
        assert!(fs::symlink_metadata(config.work_dir.join(garble("テスト"))).is_ok());
        assert!(!config.work_dir.join("テスト").exists());
        assert!(fs::symlink_metadata(config.work_dir.join("音楽")).is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_unicode_names_are_counted_and_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_dir, config) = setup();
        let name = OsStr::from_bytes(b"\xFFname");
        fs::write(config.work_dir.join(name), "x").unwrap();

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let report = NameRepairer::new(&config, &audit).run().unwrap();

        assert_eq!(report.non_unicode, 1);
        assert_eq!(report.total_renamed(), 0);
        assert!(config.work_dir.join(name).is_file());
    }

    #[test]
    fn test_root_is_never_renamed() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join(garble("テスト"));
        fs::create_dir(&root).unwrap();
        let config = Config::new(&root);

        let audit = AuditLog::reset(&config.log_file).unwrap();
        let report = NameRepairer::new(&config, &audit).run().unwrap();

        assert_eq!(report.dirs_renamed, 0);
        assert!(root.is_dir());
    }
}
