//! Tests for census-model types.

use census_model::{
    CellValue, Demographics, EnrichedRecord, EnrichedTable, HOUSEHOLD_INCOME_COLUMN,
    MEDIAN_AGE_COLUMN, OutputColumn, RawRecord, RawTable, SummaryMetrics, ZIP_POPULATION_COLUMN,
};

#[test]
fn raw_table_from_rows() {
    let table = RawTable::from_rows(
        ["customer_id", "email", "zip"],
        vec![vec!["1", "a@example.com", "90210"], vec!["2", "b@example.com", ""]],
    );
    assert_eq!(table.headers(), ["customer_id", "email", "zip"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.records()[1].get(2), &CellValue::Empty);
}

#[test]
fn enriched_rows_render_absent_demographics_as_empty() {
    let table = EnrichedTable::new(
        vec![
            "zip".to_string(),
            HOUSEHOLD_INCOME_COLUMN.to_string(),
            MEDIAN_AGE_COLUMN.to_string(),
            ZIP_POPULATION_COLUMN.to_string(),
        ],
        vec![
            OutputColumn::Source(0),
            OutputColumn::HouseholdIncome,
            OutputColumn::MedianAge,
            OutputColumn::ZipPopulation,
        ],
        vec![
            EnrichedRecord {
                source: RawRecord::new(vec![CellValue::text("90210")]),
                demographics: Some(Demographics {
                    household_income: None,
                    median_age: Some(41.2),
                    zip_population: 34_000,
                }),
            },
            EnrichedRecord {
                source: RawRecord::new(vec![CellValue::text("00000")]),
                demographics: None,
            },
        ],
    );

    let rows: Vec<Vec<CellValue>> = table.rows().collect();
    assert_eq!(
        rows[0],
        vec![
            CellValue::text("90210"),
            CellValue::Empty,
            CellValue::Float(41.2),
            CellValue::Integer(34_000),
        ]
    );
    assert_eq!(
        rows[1],
        vec![
            CellValue::text("00000"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
        ]
    );
}

#[test]
fn metrics_serialize() {
    let metrics = SummaryMetrics {
        total_rows: 10,
        matched_rows: 7,
        match_rate: 0.7,
        mean_income: Some(85_000.0),
        mean_age: None,
    };
    let json = serde_json::to_string(&metrics).expect("serialize metrics");
    let round: SummaryMetrics = serde_json::from_str(&json).expect("deserialize metrics");
    assert_eq!(round, metrics);
    assert!(json.contains("\"mean_age\":null"));
}
