use serde::{Deserialize, Serialize};

use crate::zip::CanonicalZip;

/// One row of the census reference table, keyed by canonical ZIP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub zip: CanonicalZip,
    pub median_income: Option<f64>,
    pub median_age: Option<f64>,
    pub population: u64,
}

impl ReferenceRecord {
    /// True when the area's population is at or above `floor`.
    pub fn meets_population_floor(&self, floor: u64) -> bool {
        self.population >= floor
    }
}
