use serde::{Deserialize, Serialize};

/// Summary of one enrichment pass.
///
/// Averages cover matched rows that carry a value; they are `None` when no
/// matched row has one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_rows: usize,
    pub matched_rows: usize,
    /// `matched_rows / total_rows`, or `0.0` for an empty input.
    pub match_rate: f64,
    pub mean_income: Option<f64>,
    pub mean_age: Option<f64>,
}

impl SummaryMetrics {
    /// Match rate as a percentage rounded to one decimal place.
    pub fn match_rate_percent(&self) -> f64 {
        (self.match_rate * 1000.0).round() / 10.0
    }

    pub fn unmatched_rows(&self) -> usize {
        self.total_rows - self.matched_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_rate_percent_rounds() {
        let metrics = SummaryMetrics {
            total_rows: 3,
            matched_rows: 2,
            match_rate: 2.0 / 3.0,
            ..SummaryMetrics::default()
        };
        assert_eq!(metrics.match_rate_percent(), 66.7);
        assert_eq!(metrics.unmatched_rows(), 1);
    }
}
