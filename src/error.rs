//! Error type for filesystem work during a repair run.
//!
//! Failed transcodes are not errors; only filesystem and prompt failures end up here.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixError {
    /// Filesystem operation failed on `path`.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A rename would have replaced an existing entry.
    #[error("refusing to overwrite existing path '{}'", path.display())]
    TargetExists { path: PathBuf },

    /// Reading the operator's answer failed.
    #[error("failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
}

impl FixError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixError>;
