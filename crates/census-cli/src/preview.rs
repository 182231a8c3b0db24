//! Terminal preview of the enriched table.

use comfy_table::{Cell, CellAlignment, Table};

use census_model::{CellValue, EnrichedTable, OutputColumn};
use census_report::{format_currency, format_decimal, format_thousands};

use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

/// Rows shown by default. The written report always holds every row.
pub const PREVIEW_ROWS: usize = 100;

/// Formats one cell for display. Demographic columns get currency,
/// one-decimal and thousands formatting; input columns are shown as-is.
pub fn display_value(column: OutputColumn, value: &CellValue) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let text = match (column, value.as_f64()) {
        (OutputColumn::HouseholdIncome, Some(income)) => format_currency(income),
        (OutputColumn::MedianAge, Some(age)) => format_decimal(age),
        (OutputColumn::ZipPopulation, Some(population)) => {
            format_thousands(population.max(0.0).round() as u64)
        }
        _ => value.to_string(),
    };
    Some(text)
}

/// Builds a preview of at most `limit` rows.
pub fn preview_table(table: &EnrichedTable, limit: usize) -> Table {
    let mut preview = Table::new();
    preview.set_header(table.headers().iter().map(|header| header_cell(header)));
    apply_table_style(&mut preview);
    for (index, column) in table.layout().iter().enumerate() {
        if column.is_demographic() {
            align_column(&mut preview, index, CellAlignment::Right);
        }
    }

    for row in table.rows().take(limit) {
        preview.add_row(
            row.iter()
                .zip(table.layout())
                .map(|(value, &column)| match display_value(column, value) {
                    Some(text) => Cell::new(text),
                    None => dim_cell("-"),
                }),
        );
    }
    preview
}

pub fn print_preview(table: &EnrichedTable, limit: usize) {
    let shown = table.height().min(limit);
    println!();
    if shown < table.height() {
        println!(
            "Enriched data preview (first {shown} of {} rows):",
            table.height()
        );
    } else {
        println!("Enriched data preview:");
    }
    println!("{}", preview_table(table, limit));
}
