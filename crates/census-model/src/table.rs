//! User-supplied tables with arbitrary headers.

use crate::cell::CellValue;

/// One input row, aligned with the owning table's header row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    cells: Vec<CellValue>,
}

impl RawRecord {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Returns the cell at `index`, or [`CellValue::Empty`] for short rows.
    pub fn get(&self, index: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.cells.get(index).unwrap_or(EMPTY)
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<CellValue>> for RawRecord {
    fn from(cells: Vec<CellValue>) -> Self {
        Self::new(cells)
    }
}

/// An input table: ordered header names plus rows of opaque cells.
///
/// Header names are kept exactly as supplied (after trimming by the reader);
/// lookups by name are exact, while ZIP detection applies its own
/// case-insensitive comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    records: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, records: Vec<RawRecord>) -> Self {
        Self { headers, records }
    }

    /// Builds a table from string rows. Mostly useful in tests.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<CellValue>,
    {
        let headers = headers.into_iter().map(Into::into).collect();
        let records = rows
            .into_iter()
            .map(|row| RawRecord::new(row.into_iter().map(Into::into).collect()))
            .collect();
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.records.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the position of the column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Renames the column at `index`. Out-of-range indices are ignored.
    pub fn rename_column(&mut self, index: usize, name: impl Into<String>) {
        if let Some(header) = self.headers.get_mut(index) {
            *header = name.into();
        }
    }

    /// Iterates over the cells of one column in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.records.iter().map(move |record| record.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        RawTable::from_rows(
            ["customer_id", "zip"],
            vec![
                vec![CellValue::Integer(1), CellValue::text("90210")],
                vec![CellValue::Integer(2)],
            ],
        )
    }

    #[test]
    fn test_shape() {
        let table = sample();
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 2);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let table = sample();
        let zips: Vec<&CellValue> = table.column(1).collect();
        assert_eq!(zips[0], &CellValue::text("90210"));
        assert_eq!(zips[1], &CellValue::Empty);
    }

    #[test]
    fn test_rename_column() {
        let mut table = sample();
        table.rename_column(0, "Unnamed: 0");
        table.rename_column(9, "ignored");
        assert_eq!(table.headers(), ["Unnamed: 0", "zip"]);
    }

    #[test]
    fn test_column_index_is_exact() {
        let table = sample();
        assert_eq!(table.column_index("zip"), Some(1));
        assert_eq!(table.column_index("ZIP"), None);
    }
}
