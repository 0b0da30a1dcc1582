//! Utility modules for encoding, file system access, and operator prompts.

pub mod encoding;
pub mod file_helper;
pub mod prompt;
