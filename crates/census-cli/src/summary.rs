use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use census_model::SummaryMetrics;
use census_reference::{POPULATION_FLOOR, ReferenceStore};
use census_report::{format_age, format_currency, format_percent, format_thousands};

use crate::pipeline::EnrichRun;

/// Shown for an average with no contributing rows.
pub const NOT_AVAILABLE: &str = "N/A";

/// The one-line completion message.
pub fn success_line(metrics: &SummaryMetrics) -> String {
    format!(
        "Enrichment complete. Processed {} rows with a {:.1}% match rate.",
        metrics.total_rows,
        metrics.match_rate_percent()
    )
}

/// Labelled scorecard values: match rate, average income, average age.
pub fn scorecards(metrics: &SummaryMetrics) -> [(&'static str, String); 3] {
    [
        ("Match rate", format_percent(metrics.match_rate)),
        (
            "Avg. household income",
            metrics
                .mean_income
                .map_or_else(|| NOT_AVAILABLE.to_string(), format_currency),
        ),
        (
            "Avg. customer age",
            metrics
                .mean_age
                .map_or_else(|| NOT_AVAILABLE.to_string(), format_age),
        ),
    ]
}

pub fn scorecard_table(metrics: &SummaryMetrics) -> Table {
    let cards = scorecards(metrics);
    let mut table = Table::new();
    table.set_header(cards.iter().map(|(label, _)| header_cell(label)));
    table.add_row(cards.into_iter().map(|(_, value)| value_cell(value)));
    apply_summary_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Center);
    }
    table
}

pub fn print_summary(run: &EnrichRun) {
    let metrics = run.metrics();
    println!("{}", success_line(metrics));
    println!("Input: {}", run.input.display());
    println!("ZIP column: {}", run.enrichment.zip_column);
    println!("Output: {}", run.output.display());
    if run.exclude_low_population {
        println!("Excluded areas with population below {POPULATION_FLOOR}.");
    }
    println!("{}", scorecard_table(metrics));
}

pub fn reference_table(store: &ReferenceStore) -> Table {
    let with_income = store
        .records()
        .iter()
        .filter(|record| record.median_income.is_some())
        .count();
    let with_age = store
        .records()
        .iter()
        .filter(|record| record.median_age.is_some())
        .count();
    let below_floor = store.count_below(POPULATION_FLOOR);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let source = store
        .source()
        .map_or_else(|| "-".to_string(), |path| path.display().to_string());
    table.add_row(vec![Cell::new("Source"), Cell::new(source)]);
    table.add_row(vec![
        Cell::new("ZIP codes"),
        Cell::new(format_thousands(store.len() as u64)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new(format!("Population below {POPULATION_FLOOR}")),
        count_cell(below_floor, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("With median income"),
        Cell::new(format_thousands(with_income as u64)),
    ]);
    table.add_row(vec![
        Cell::new("With median age"),
        Cell::new(format_thousands(with_age as u64)),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub(crate) fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub(crate) fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub(crate) fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn value_cell(value: String) -> Cell {
    if value == NOT_AVAILABLE {
        dim_cell(value)
    } else {
        Cell::new(value).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(format_thousands(count as u64))
            .fg(color)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> SummaryMetrics {
        SummaryMetrics {
            total_rows: 10,
            matched_rows: 7,
            match_rate: 0.7,
            mean_income: Some(85_000.0),
            mean_age: Some(41.24),
        }
    }

    #[test]
    fn test_success_line() {
        assert_eq!(
            success_line(&metrics()),
            "Enrichment complete. Processed 10 rows with a 70.0% match rate."
        );
    }

    #[test]
    fn test_scorecards() {
        let cards = scorecards(&metrics());
        assert_eq!(cards[0], ("Match rate", "70.0%".to_string()));
        assert_eq!(cards[1], ("Avg. household income", "$85,000".to_string()));
        assert_eq!(cards[2], ("Avg. customer age", "41.2 years".to_string()));
    }

    #[test]
    fn test_scorecards_without_matches() {
        let cards = scorecards(&SummaryMetrics::default());
        assert_eq!(cards[0].1, "0.0%");
        assert_eq!(cards[1].1, NOT_AVAILABLE);
        assert_eq!(cards[2].1, NOT_AVAILABLE);
    }
}
