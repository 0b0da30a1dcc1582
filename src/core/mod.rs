//! Repair engine and the passes that apply it to a directory tree.

pub mod audit;
pub mod renamer;
pub mod repair;
pub mod text_converter;
