//! Report header data and side panel copy.

use chrono::{Local, NaiveDate};

/// Report type used when the caller does not name one.
pub const DEFAULT_REPORT_TYPE: &str = "Customer demographics";

/// Side panel heading.
pub const REPORT_TITLE: &str = "Systematik data — Customer enrichment report";

pub const WEBSITE_URL: &str = "https://go.systematikdata.com/ZA4N87";

/// Per-report values shown in the side panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    pub report_type: String,
    pub generated_on: NaiveDate,
}

impl ReportMetadata {
    /// Metadata dated today in the local timezone.
    pub fn new(report_type: impl Into<String>) -> Self {
        Self::with_date(report_type, Local::now().date_naive())
    }

    pub fn with_date(report_type: impl Into<String>, generated_on: NaiveDate) -> Self {
        Self {
            report_type: report_type.into(),
            generated_on,
        }
    }

    /// The `Report: ... | Date: YYYY-MM-DD` line under the title.
    pub fn subtitle(&self) -> String {
        format!(
            "Report: {} | Date: {}",
            self.report_type,
            self.generated_on.format("%Y-%m-%d")
        )
    }
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_TYPE)
    }
}

/// One titled block of the side panel. The title sits on `row`, the body on
/// the row below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelBlock {
    pub row: u32,
    pub title: &'static str,
    pub text: &'static str,
    pub link: Option<&'static str>,
}

pub const PANEL_BLOCKS: [PanelBlock; 6] = [
    PanelBlock {
        row: 4,
        title: "1. What this report shows",
        text: "We have matched your customer Zip Codes against the US Census Bureau database. \
               You now have the Median Household Income, Median Age, and Total Population for \
               the area where each customer lives.",
        link: None,
    },
    PanelBlock {
        row: 8,
        title: "2. Actionable strategies",
        text: "• Build 'High earner' segments: Filter this list for Income > $100k. Upload this \
               segment to Meta/Google as a Custom Audience for your premium products.\n\
               • Adjust creative strategy: If your Median Age is higher than expected (e.g., 45+), \
               test creative that resonates with an older demographic rather than Gen Z trends.\n\
               • Geographic targeting: Identify which specific Zip codes yield your highest value \
               customers and bid more aggressively in those locations.",
        link: None,
    },
    PanelBlock {
        row: 16,
        title: "3. Important caveats",
        text: "• Geographic Enrichment: This describes the neighborhood profile, not individual \
               credit data.\n\
               • Match Rates: Zip codes for PO Boxes or large commercial buildings may not have \
               Census data (showing as N/A).",
        link: None,
    },
    PanelBlock {
        row: 21,
        title: "4. Need deeper analysis?",
        text: "This is just the start. We can help you calculate Customer Lifetime Value (LTV) by \
               demographic segment to see exactly how much 'High Income' customers are actually \
               worth to your brand.",
        link: None,
    },
    PanelBlock {
        row: 25,
        title: "Powered by Systematik",
        text: "Full-stack data agency for ecommerce brands ($5M-$100M).",
        link: None,
    },
    PanelBlock {
        row: 28,
        title: "Visit our website",
        text: "systematikdata.com",
        link: Some(WEBSITE_URL),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let metadata = ReportMetadata::with_date(DEFAULT_REPORT_TYPE, date);
        assert_eq!(
            metadata.subtitle(),
            "Report: Customer demographics | Date: 2024-03-07"
        );
    }

    #[test]
    fn test_panel_blocks_do_not_overlap() {
        for pair in PANEL_BLOCKS.windows(2) {
            assert!(pair[0].row + 1 < pair[1].row);
        }
    }
}
