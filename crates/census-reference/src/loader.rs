//! Reference CSV parsing.

use std::collections::HashSet;
use std::path::Path;

use census_model::{CanonicalZip, ReferenceRecord};
use csv::{ReaderBuilder, StringRecord};

use crate::error::{ReferenceError, Result};

pub const ZIP_CODE_COLUMN: &str = "zip_code";
pub const MEDIAN_INCOME_COLUMN: &str = "median_income";
pub const MEDIAN_AGE_COLUMN: &str = "median_age";
pub const POPULATION_COLUMN: &str = "population";

/// Tokens read as a missing number, matching common spreadsheet exports.
const MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "-"];

struct ColumnIndexes {
    zip: usize,
    income: usize,
    age: usize,
    population: usize,
}

fn column_index(headers: &StringRecord, column: &'static str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| {
            header
                .trim_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case(column)
        })
        .ok_or_else(|| ReferenceError::MissingColumn {
            column,
            path: path.to_path_buf(),
        })
}

fn resolve_columns(headers: &StringRecord, path: &Path) -> Result<ColumnIndexes> {
    Ok(ColumnIndexes {
        zip: column_index(headers, ZIP_CODE_COLUMN, path)?,
        income: column_index(headers, MEDIAN_INCOME_COLUMN, path)?,
        age: column_index(headers, MEDIAN_AGE_COLUMN, path)?,
        population: column_index(headers, POPULATION_COLUMN, path)?,
    })
}

fn parse_optional_number(raw: &str) -> Option<Option<f64>> {
    let trimmed = raw.trim();
    if MISSING_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
    {
        return Some(None);
    }
    let value: f64 = trimmed.parse().ok()?;
    Some(value.is_finite().then_some(value))
}

fn parse_population(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return Some(value);
    }
    // Exports that passed through a float column write "34000.0".
    let value: f64 = trimmed.parse().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then_some(value as u64)
}

/// Parses the reference table at `path`.
///
/// Keys are normalized with [`CanonicalZip::normalize`] as they are read;
/// two rows normalizing to the same key are rejected.
pub fn read_reference_csv(path: &Path) -> Result<Vec<ReferenceRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReferenceError::csv(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| ReferenceError::csv(path, e))?
        .clone();
    let columns = resolve_columns(&headers, path)?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for row in reader.records() {
        let row = row.map_err(|e| ReferenceError::csv(path, e))?;
        let line = row.position().map_or(0, csv::Position::line);
        let field = |index: usize| row.get(index).unwrap_or("");
        let invalid = |column: &'static str, value: &str| ReferenceError::InvalidValue {
            column,
            value: value.to_string(),
            line,
            path: path.to_path_buf(),
        };

        let zip = CanonicalZip::normalize(field(columns.zip));
        let median_income = parse_optional_number(field(columns.income))
            .ok_or_else(|| invalid(MEDIAN_INCOME_COLUMN, field(columns.income)))?;
        let median_age = parse_optional_number(field(columns.age))
            .ok_or_else(|| invalid(MEDIAN_AGE_COLUMN, field(columns.age)))?;
        let population = parse_population(field(columns.population))
            .ok_or_else(|| invalid(POPULATION_COLUMN, field(columns.population)))?;

        if !seen.insert(zip.clone()) {
            return Err(ReferenceError::DuplicateZip {
                zip: zip.into_string(),
                line,
                path: path.to_path_buf(),
            });
        }

        records.push(ReferenceRecord {
            zip,
            median_income,
            median_age,
            population,
        });
    }

    if records.is_empty() {
        return Err(ReferenceError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(records)
}
