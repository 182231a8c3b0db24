//! Canonical ZIP join keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Width every canonical ZIP is padded to.
pub const CANONICAL_ZIP_WIDTH: usize = 5;

/// A normalized ZIP code used as the join key against the reference table.
///
/// Construction goes through [`CanonicalZip::normalize`], which is total:
/// every input, including the empty string, produces a key of at least
/// [`CANONICAL_ZIP_WIDTH`] characters. Keys longer than that are kept as-is
/// and simply never match the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalZip(String);

impl CanonicalZip {
    /// Normalizes a raw ZIP-like value.
    ///
    /// Steps, in order:
    /// 1. keep the text before the first `.` (float artifacts such as `90210.0`)
    /// 2. keep the text before the first `-` (ZIP+4 suffixes such as `90210-1234`)
    /// 3. trim surrounding whitespace
    /// 4. left-pad with `0` to five characters; longer values are not truncated
    pub fn normalize(raw: &str) -> Self {
        let before_dot = raw.split('.').next().unwrap_or_default();
        let before_dash = before_dot.split('-').next().unwrap_or_default();
        let trimmed = before_dash.trim();
        let missing = CANONICAL_ZIP_WIDTH.saturating_sub(trimmed.chars().count());
        let mut key = String::with_capacity(trimmed.len() + missing);
        key.extend(std::iter::repeat_n('0', missing));
        key.push_str(trimmed);
        Self(key)
    }

    /// Normalizes a cell from a parsed table.
    ///
    /// Numeric cells are rendered in their shortest decimal form first, so a
    /// ZIP parsed as `2134` or `2134.0` both become `02134`.
    pub fn from_cell(cell: &CellValue) -> Self {
        match cell {
            CellValue::Text(value) => Self::normalize(value),
            other => Self::normalize(&other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the key is exactly five ASCII digits.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == CANONICAL_ZIP_WIDTH && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalZip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalZip {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain() {
        assert_eq!(CanonicalZip::normalize("90210").as_str(), "90210");
    }

    #[test]
    fn test_normalize_zip_plus_four() {
        assert_eq!(CanonicalZip::normalize("90210-1234").as_str(), "90210");
    }

    #[test]
    fn test_normalize_float_artifact() {
        assert_eq!(CanonicalZip::normalize("2134.0").as_str(), "02134");
    }

    #[test]
    fn test_normalize_whitespace_and_padding() {
        assert_eq!(CanonicalZip::normalize("  501 ").as_str(), "00501");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(CanonicalZip::normalize("").as_str(), "00000");
    }

    #[test]
    fn test_normalize_no_truncation() {
        assert_eq!(CanonicalZip::normalize("SW1A 1AA").as_str(), "SW1A 1AA");
        assert_eq!(CanonicalZip::normalize("902101234").as_str(), "902101234");
    }

    #[test]
    fn test_from_cell() {
        assert_eq!(
            CanonicalZip::from_cell(&CellValue::Integer(2134)).as_str(),
            "02134"
        );
        assert_eq!(
            CanonicalZip::from_cell(&CellValue::Float(90210.0)).as_str(),
            "90210"
        );
        assert_eq!(CanonicalZip::from_cell(&CellValue::Empty).as_str(), "00000");
    }

    #[test]
    fn test_well_formed() {
        assert!(CanonicalZip::normalize("501").is_well_formed());
        assert!(!CanonicalZip::normalize("abc").is_well_formed());
        assert!(!CanonicalZip::normalize("123456").is_well_formed());
    }
}
