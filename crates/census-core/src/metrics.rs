use census_model::{EnrichedRecord, SummaryMetrics};

/// Computes summary metrics over enriched records.
///
/// Averages include only matched rows that carry the value.
pub fn summarize(records: &[EnrichedRecord]) -> SummaryMetrics {
    let total_rows = records.len();
    let matched_rows = records.iter().filter(|r| r.is_matched()).count();
    let match_rate = if total_rows == 0 {
        0.0
    } else {
        matched_rows as f64 / total_rows as f64
    };

    SummaryMetrics {
        total_rows,
        matched_rows,
        match_rate,
        mean_income: mean(records.iter().filter_map(EnrichedRecord::household_income)),
        mean_age: mean(records.iter().filter_map(EnrichedRecord::median_age)),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use census_model::{CellValue, Demographics, RawRecord};

    use super::*;

    fn record(demographics: Option<Demographics>) -> EnrichedRecord {
        EnrichedRecord {
            source: RawRecord::new(vec![CellValue::text("90210")]),
            demographics,
        }
    }

    #[test]
    fn test_empty_records() {
        let metrics = summarize(&[]);
        assert_eq!(metrics.total_rows, 0);
        assert_eq!(metrics.match_rate, 0.0);
        assert_eq!(metrics.mean_income, None);
        assert_eq!(metrics.mean_age, None);
    }

    #[test]
    fn test_means_skip_absent_values() {
        let records = vec![
            record(Some(Demographics {
                household_income: Some(100_000.0),
                median_age: None,
                zip_population: 500,
            })),
            record(Some(Demographics {
                household_income: Some(50_000.0),
                median_age: Some(40.0),
                zip_population: 500,
            })),
            record(None),
        ];
        let metrics = summarize(&records);
        assert_eq!(metrics.matched_rows, 2);
        assert_eq!(metrics.mean_income, Some(75_000.0));
        assert_eq!(metrics.mean_age, Some(40.0));
        assert!((metrics.match_rate - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_matched_without_values_has_no_mean() {
        let metrics = summarize(&[record(Some(Demographics {
            household_income: None,
            median_age: None,
            zip_population: 500,
        }))]);
        assert_eq!(metrics.matched_rows, 1);
        assert_eq!(metrics.match_rate, 1.0);
        assert_eq!(metrics.mean_income, None);
    }
}
