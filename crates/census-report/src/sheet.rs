//! Worksheet addressing and column geometry.

use std::borrow::Cow;

/// Zero-based index of column `J`, the default side panel column.
pub const PANEL_COLUMN: usize = 9;
/// Blank columns kept between the data and the side panel.
pub const SPACER_COLUMNS: usize = 4;

/// Worksheet limits of the xlsx format.
pub const MAX_SHEET_ROWS: usize = 1_048_576;
pub const MAX_SHEET_COLUMNS: usize = 16_384;
pub const MAX_CELL_CHARS: usize = 32_767;

pub const DATA_COLUMN_WIDTH: f64 = 18.0;
pub const SPACER_COLUMN_WIDTH: f64 = 5.0;
pub const PANEL_COLUMN_WIDTH: f64 = 70.0;

/// Spreadsheet letters for a zero-based column index: 0 → `A`, 26 → `AA`.
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Drops characters XML 1.0 cannot carry, such as `\x0B`. Tab, newline and
/// carriage return are kept.
pub fn sheet_text(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

fn is_xml_char(c: char) -> bool {
    !matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
    )
}

/// A1-style reference for a zero-based column and one-based row.
pub fn cell_ref(column: usize, row: u32) -> String {
    format!("{}{row}", column_letter(column))
}

/// Column placement for a sheet holding `data_width` data columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    pub data_width: usize,
    /// Zero-based side panel column.
    pub panel_column: usize,
}

impl SheetGeometry {
    /// Panel stays in `J` unless the data would reach into the spacer.
    pub fn for_width(data_width: usize) -> Self {
        Self {
            data_width,
            panel_column: PANEL_COLUMN.max(data_width + SPACER_COLUMNS),
        }
    }

    /// Zero-based range of spacer columns.
    pub fn spacer_columns(&self) -> std::ops::Range<usize> {
        self.panel_column - SPACER_COLUMNS..self.panel_column
    }
}
