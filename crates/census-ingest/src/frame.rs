//! Conversion from Polars DataFrames to opaque tables.

use census_model::{CellValue, RawRecord, RawTable};
use polars::prelude::*;

use crate::csv::normalize_header;
use crate::error::Result;

/// Converts a parsed DataFrame into a [`RawTable`].
///
/// Integer and float columns keep their numeric type; every other dtype is
/// rendered as text. Nulls become [`CellValue::Empty`].
pub fn dataframe_to_table(df: &DataFrame) -> Result<RawTable> {
    let headers: Vec<String> = df
        .get_columns()
        .iter()
        .map(|col| normalize_header(col.name().as_str()))
        .collect();

    let mut columns = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        columns.push(column_cells(col)?);
    }

    let mut records = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let cells = columns
            .iter()
            .map(|cells| cells.get(row_idx).cloned().unwrap_or_default())
            .collect();
        records.push(RawRecord::new(cells));
    }

    Ok(RawTable::new(headers, records))
}

fn column_cells(col: &Column) -> Result<Vec<CellValue>> {
    let series = col.as_materialized_series();
    let dtype = series.dtype();

    if dtype.is_integer() {
        let cast = series.cast(&DataType::Int64)?;
        let values = cast.i64()?;
        return Ok(values
            .iter()
            .map(|value| value.map_or(CellValue::Empty, CellValue::Integer))
            .collect());
    }

    if dtype.is_float() {
        let cast = series.cast(&DataType::Float64)?;
        let values = cast.f64()?;
        return Ok(values
            .iter()
            .map(|value| value.map_or(CellValue::Empty, CellValue::Float))
            .collect());
    }

    let cast = series.cast(&DataType::String)?;
    let values = cast.str()?;
    Ok(values
        .iter()
        .map(|value| value.map_or(CellValue::Empty, CellValue::text))
        .collect())
}
