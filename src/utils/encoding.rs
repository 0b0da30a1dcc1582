//! Strict codecs for the two legacy encodings involved in GBK/SHIFT-JIS mojibake.
//!
//! Uses encoding_rs crate instead of platform code pages for portability. Every
//! conversion here is lossless or fails: no replacement characters, no numeric
//! character references.

use encoding_rs::{Encoding, GBK, SHIFT_JIS};
use std::borrow::Cow;

/// Legacy byte encodings known to the repair engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyEncoding {
    /// GB2312 (EUC-CN), the narrow Simplified Chinese set.
    Gb2312,
    /// GBK, the extended superset of GB2312.
    Gbk,
    /// SHIFT-JIS limited to JIS X 0208 (no Windows-31J extensions).
    ShiftJis,
}

impl LegacyEncoding {
    pub fn label(self) -> &'static str {
        match self {
            LegacyEncoding::Gb2312 => "GB2312",
            LegacyEncoding::Gbk => "GBK",
            LegacyEncoding::ShiftJis => "SHIFT_JIS",
        }
    }

    // encoding_rs follows WHATWG: "gb2312" is just a label for GBK and
    // "shift_jis" is Windows-31J. Both narrow encodings are the wide codec
    // restricted to the code positions of the narrow one.
    fn codec(self) -> &'static Encoding {
        match self {
            LegacyEncoding::Gb2312 | LegacyEncoding::Gbk => GBK,
            LegacyEncoding::ShiftJis => SHIFT_JIS,
        }
    }

    /// Encode `text`, or `None` if any character falls outside the repertoire.
    pub fn encode_strict(self, text: &str) -> Option<Vec<u8>> {
        let (bytes, _, had_errors) = self.codec().encode(text);
        if had_errors {
            return None;
        }
        if !self.fits_layout(&bytes) {
            return None;
        }
        Some(bytes.into_owned())
    }

    /// Decode `data`, or `None` on the first malformed or unmapped sequence.
    pub fn decode_strict(self, data: &[u8]) -> Option<String> {
        if !self.fits_layout(data) {
            return None;
        }
        self.codec()
            .decode_without_bom_handling_and_without_replacement(data)
            .map(Cow::into_owned)
    }

    fn fits_layout(self, data: &[u8]) -> bool {
        match self {
            LegacyEncoding::Gb2312 => is_euc_cn_layout(data),
            LegacyEncoding::Gbk => true,
            LegacyEncoding::ShiftJis => is_jis_x0208_layout(data),
        }
    }
}

impl std::fmt::Display for LegacyEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Cells inside the GB2312 rows that GB2312 leaves empty but GBK fills
/// (small roman numerals, vertical forms, pinyin additions, PUA).
const GB2312_UNASSIGNED: &[(u16, u16)] = &[
    (0xA2A1, 0xA2B0),
    (0xA2E3, 0xA2E4),
    (0xA2EF, 0xA2F0),
    (0xA2FD, 0xA2FE),
    (0xA4F4, 0xA4FE),
    (0xA5F7, 0xA5FE),
    (0xA6B9, 0xA6C0),
    (0xA6D9, 0xA6FE),
    (0xA7C2, 0xA7D0),
    (0xA7F2, 0xA7FE),
    (0xA8BB, 0xA8C4),
    (0xA8EA, 0xA8FE),
    (0xA9A1, 0xA9A3),
    (0xA9F0, 0xA9FE),
    (0xD7FA, 0xD7FE),
];

/// Check that `data` only uses GB2312 code positions: ASCII, or a lead byte in
/// rows `A1..=A9` / `B0..=F7` followed by a trail byte in `A1..=FE`, minus the
/// cells in `GB2312_UNASSIGNED`.
///
/// Rows `AA..=AF` and `F8..=FE` are user-defined in GBK and unassigned in GB2312.
pub fn is_euc_cn_layout(data: &[u8]) -> bool {
    let mut i = 0;
    while i < data.len() {
        let lead = data[i];
        if lead < 0x80 {
            i += 1;
            continue;
        }
        if !matches!(lead, 0xA1..=0xA9 | 0xB0..=0xF7) {
            return false;
        }
        let Some(trail @ 0xA1..=0xFE) = data.get(i + 1).copied() else {
            return false;
        };
        let cell = u16::from_be_bytes([lead, trail]);
        if GB2312_UNASSIGNED
            .iter()
            .any(|&(start, end)| (start..=end).contains(&cell))
        {
            return false;
        }
        i += 2;
    }
    true
}

/// Check that `data` only uses JIS X 0208 SHIFT-JIS code positions: ASCII,
/// half-width katakana `A1..=DF`, or a lead in `81..=84` / `88..=9F` /
/// `E0..=EA` followed by a trail in `40..=7E` / `80..=FC`.
///
/// Leads `85..=87` (NEC row 13), `ED..=EE` and `FA..=FC` (IBM extensions) and
/// `F0..=F9` (user-defined) exist only in Windows-31J.
pub fn is_jis_x0208_layout(data: &[u8]) -> bool {
    let mut i = 0;
    while i < data.len() {
        let lead = data[i];
        if lead < 0x80 || matches!(lead, 0xA1..=0xDF) {
            i += 1;
            continue;
        }
        if !matches!(lead, 0x81..=0x84 | 0x88..=0x9F | 0xE0..=0xEA) {
            return false;
        }
        match data.get(i + 1).copied() {
            Some(0x40..=0x7E | 0x80..=0xFC) => i += 2,
            _ => return false,
        }
    }
    true
}
