//! File system utility functions.
//!
//! Provides small wrappers around std::fs used by the repair passes.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FixError, Result};

/// Get the last path segment as UTF-8, if it is valid Unicode.
pub fn leaf_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Append `suffix` to the file name, keeping any existing extension.
///
/// `notes.txt` + `.bak` gives `notes.txt.bak`.
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Sibling of `path` with leaf name `new_name`.
pub fn sibling(path: &Path, new_name: &str) -> PathBuf {
    path.with_file_name(new_name)
}

/// Check if anything, including a dangling symlink, exists at the given path.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Rename `from` to `to`, failing instead of replacing an existing `to`.
pub fn rename_no_clobber(from: &Path, to: &Path) -> Result<()> {
    if entry_exists(to) {
        return Err(FixError::TargetExists {
            path: to.to_path_buf(),
        });
    }
    fs::rename(from, to).map_err(|e| FixError::io(from, e))
}
