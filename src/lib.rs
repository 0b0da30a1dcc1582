//! Repairs Japanese file names, directory names and text files that were
//! garbled by reading SHIFT-JIS bytes as GBK.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::app::{App, RunOutcome, RunSummary};
pub use crate::config::Config;
pub use crate::core::repair::{repair, RepairVerdict};
pub use crate::error::{FixError, Result};
