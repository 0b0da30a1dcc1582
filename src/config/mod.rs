//! Run configuration.
//!
//! The tool has no configuration file or flags; the working directory and the
//! audit log location are resolved once and passed down explicitly.

use std::path::{Path, PathBuf};

/// Name of the audit log written into the working directory.
pub const LOG_FILE_NAME: &str = "conversion_log.txt";

/// File name suffix selecting plain-text files for content repair (case-sensitive).
pub const TEXT_EXTENSION: &str = ".txt";

/// Suffix appended to a converted text file's original name for its backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Paths a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the tree to repair. Never renamed itself.
    pub work_dir: PathBuf,
    /// Audit log location.
    pub log_file: PathBuf,
}

impl Config {
    /// Configuration rooted at `work_dir`, with the audit log inside it.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        let log_file = work_dir.join(LOG_FILE_NAME);
        Self { work_dir, log_file }
    }

    /// Configuration rooted at the process's current working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn is_log_file(&self, path: &Path) -> bool {
        path == self.log_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_in_work_dir() {
        let config = Config::new("/data/downloads");
        assert_eq!(config.work_dir, PathBuf::from("/data/downloads"));
        assert_eq!(config.log_file, PathBuf::from("/data/downloads/conversion_log.txt"));
        assert!(config.is_log_file(Path::new("/data/downloads/conversion_log.txt")));
        assert!(!config.is_log_file(Path::new("/data/downloads/sub/conversion_log.txt")));
    }

    #[test]
    fn test_from_current_dir() {
        let config = Config::from_current_dir().unwrap();
        assert_eq!(config.log_file.file_name().unwrap(), LOG_FILE_NAME);
    }
}
