//! Enriched output rows and their presentation layout.

use crate::cell::CellValue;
use crate::reference::ReferenceRecord;
use crate::table::RawRecord;

/// Presentation name of the joined median household income.
pub const HOUSEHOLD_INCOME_COLUMN: &str = "Estimated household income";
/// Presentation name of the joined median age.
pub const MEDIAN_AGE_COLUMN: &str = "Median age";
/// Presentation name of the joined ZIP population.
pub const ZIP_POPULATION_COLUMN: &str = "Zip population";

/// Demographic values copied from a matching reference row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Demographics {
    pub household_income: Option<f64>,
    pub median_age: Option<f64>,
    pub zip_population: u64,
}

impl From<&ReferenceRecord> for Demographics {
    fn from(record: &ReferenceRecord) -> Self {
        Self {
            household_income: record.median_income,
            median_age: record.median_age,
            zip_population: record.population,
        }
    }
}

/// An input row plus the demographics of its ZIP, when one matched.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub source: RawRecord,
    pub demographics: Option<Demographics>,
}

impl EnrichedRecord {
    pub fn is_matched(&self) -> bool {
        self.demographics.is_some()
    }

    pub fn household_income(&self) -> Option<f64> {
        self.demographics.and_then(|d| d.household_income)
    }

    pub fn median_age(&self) -> Option<f64> {
        self.demographics.and_then(|d| d.median_age)
    }

    pub fn zip_population(&self) -> Option<u64> {
        self.demographics.map(|d| d.zip_population)
    }

    /// Resolves one output column to a cell.
    pub fn cell(&self, column: OutputColumn) -> CellValue {
        match column {
            OutputColumn::Source(index) => self.source.get(index).clone(),
            OutputColumn::HouseholdIncome => self.household_income().into(),
            OutputColumn::MedianAge => self.median_age().into(),
            OutputColumn::ZipPopulation => match self.zip_population() {
                Some(population) => i64::try_from(population)
                    .map_or(CellValue::Float(population as f64), CellValue::Integer),
                None => CellValue::Empty,
            },
        }
    }
}

/// Where an output column's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputColumn {
    /// A column of the input table, by its original index.
    Source(usize),
    HouseholdIncome,
    MedianAge,
    ZipPopulation,
}

impl OutputColumn {
    /// True for the three columns joined from the reference table.
    pub fn is_demographic(self) -> bool {
        !matches!(self, Self::Source(_))
    }
}

/// The enriched table in presentation order.
///
/// Column headers and layout are fixed when the table is built; rows keep
/// input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichedTable {
    headers: Vec<String>,
    layout: Vec<OutputColumn>,
    records: Vec<EnrichedRecord>,
}

impl EnrichedTable {
    /// Assembles a table from a presentation layout.
    ///
    /// `headers` and `layout` must have the same length.
    pub fn new(
        headers: Vec<String>,
        layout: Vec<OutputColumn>,
        records: Vec<EnrichedRecord>,
    ) -> Self {
        debug_assert_eq!(headers.len(), layout.len());
        Self {
            headers,
            layout,
            records,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn layout(&self) -> &[OutputColumn] {
        &self.layout
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn height(&self) -> usize {
        self.records.len()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Returns the presentation-ordered cells of one row.
    pub fn row(&self, index: usize) -> Option<Vec<CellValue>> {
        let record = self.records.get(index)?;
        Some(self.layout.iter().map(|&column| record.cell(column)).collect())
    }

    /// Iterates over all rows in presentation order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<CellValue>> + '_ {
        self.records
            .iter()
            .map(|record| self.layout.iter().map(|&column| record.cell(column)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched() -> EnrichedRecord {
        EnrichedRecord {
            source: RawRecord::new(vec![CellValue::Integer(1), CellValue::text("90210")]),
            demographics: Some(Demographics {
                household_income: Some(120_000.0),
                median_age: Some(41.2),
                zip_population: 34_000,
            }),
        }
    }

    #[test]
    fn test_cells_for_matched_record() {
        let record = matched();
        assert_eq!(
            record.cell(OutputColumn::HouseholdIncome),
            CellValue::Float(120_000.0)
        );
        assert_eq!(record.cell(OutputColumn::MedianAge), CellValue::Float(41.2));
        assert_eq!(
            record.cell(OutputColumn::ZipPopulation),
            CellValue::Integer(34_000)
        );
        assert_eq!(record.cell(OutputColumn::Source(1)), CellValue::text("90210"));
    }

    #[test]
    fn test_cells_for_unmatched_record() {
        let record = EnrichedRecord {
            source: RawRecord::new(vec![CellValue::text("00000")]),
            demographics: None,
        };
        assert!(!record.is_matched());
        assert_eq!(record.cell(OutputColumn::HouseholdIncome), CellValue::Empty);
        assert_eq!(record.cell(OutputColumn::ZipPopulation), CellValue::Empty);
    }

    #[test]
    fn test_table_rows_follow_layout() {
        let table = EnrichedTable::new(
            vec!["zip".to_string(), ZIP_POPULATION_COLUMN.to_string()],
            vec![OutputColumn::Source(1), OutputColumn::ZipPopulation],
            vec![matched()],
        );
        assert_eq!(
            table.row(0),
            Some(vec![CellValue::text("90210"), CellValue::Integer(34_000)])
        );
        assert_eq!(table.row(1), None);
        assert_eq!(table.column_index(ZIP_POPULATION_COLUMN), Some(1));
    }
}
