//! Mojibake repair engine.
//!
//! Recovers Japanese text whose SHIFT-JIS bytes were decoded as GBK. The engine
//! works on already-decoded strings: it re-encodes the garbled text with GBK to
//! get the original bytes back, then decodes those bytes as SHIFT-JIS.
//!
//! Whether a string is garbled at all is a heuristic. Anything that still fits
//! GB2312 is taken to be genuine Chinese, and anything that already fits SHIFT-JIS
//! needs no repair. Both checks can misjudge real text; they are kept as-is so
//! repeated runs behave the same.

use std::path::Path;

use tracing::debug;

use crate::utils::encoding::LegacyEncoding;

/// Encoding a healthy name is expected to fit on the corrupting system.
const NATIVE: LegacyEncoding = LegacyEncoding::Gb2312;
/// Encoding the garbled text was decoded with.
const MISREAD_AS: LegacyEncoding = LegacyEncoding::Gbk;
/// Encoding the original bytes were written in.
const ORIGINAL: LegacyEncoding = LegacyEncoding::ShiftJis;

/// Outcome of testing one candidate string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairVerdict {
    /// Not mojibake, or already usable as-is.
    Unchanged,
    /// Mojibake with a recovered value.
    Repaired(String),
    /// Looks garbled but the bytes do not form valid SHIFT-JIS.
    Unrecoverable,
}

impl RepairVerdict {
    pub fn is_repaired(&self) -> bool {
        matches!(self, RepairVerdict::Repaired(_))
    }

    /// The recovered value, if any.
    pub fn repaired(&self) -> Option<&str> {
        match self {
            RepairVerdict::Repaired(value) => Some(value),
            _ => None,
        }
    }
}

/// Decide whether `candidate` is SHIFT-JIS-read-as-GBK mojibake and recover it.
///
/// Pure function of its input.
pub fn repair(candidate: &str) -> RepairVerdict {
    if NATIVE.encode_strict(candidate).is_some() {
        return RepairVerdict::Unchanged;
    }
    if ORIGINAL.encode_strict(candidate).is_some() {
        return RepairVerdict::Unchanged;
    }

    let Some(bytes) = MISREAD_AS.encode_strict(candidate) else {
        return RepairVerdict::Unrecoverable;
    };
    match ORIGINAL.decode_strict(&bytes) {
        Some(recovered) if recovered == candidate => RepairVerdict::Unchanged,
        Some(recovered) => RepairVerdict::Repaired(recovered),
        None => RepairVerdict::Unrecoverable,
    }
}

/// What a candidate string was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    FileName,
    DirName,
    TextContent,
}

impl std::fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateKind::FileName => write!(f, "file name"),
            CandidateKind::DirName => write!(f, "directory name"),
            CandidateKind::TextContent => write!(f, "text content"),
        }
    }
}

/// A string taken from the filesystem, with where it came from.
#[derive(Debug, Clone, Copy)]
pub struct NameCandidate<'a> {
    pub value: &'a str,
    pub path: &'a Path,
    pub kind: CandidateKind,
}

impl<'a> NameCandidate<'a> {
    pub fn new(value: &'a str, path: &'a Path, kind: CandidateKind) -> Self {
        Self { value, path, kind }
    }

    pub fn repair(&self) -> RepairVerdict {
        let verdict = repair(self.value);
        debug!(path = %self.path.display(), kind = %self.kind, ?verdict, "checked candidate");
        verdict
    }
}
