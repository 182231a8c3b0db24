//! In-memory reference store and population-floor views.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use census_model::{CanonicalZip, ReferenceRecord};

use crate::error::{ReferenceError, Result};
use crate::loader::read_reference_csv;

/// Minimum ZIP population for a reference row to survive the
/// low-population filter.
pub const POPULATION_FLOOR: u64 = 100;

/// The census reference table keyed by canonical ZIP.
///
/// Immutable after loading. Each canonical ZIP appears at most once.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    records: Vec<ReferenceRecord>,
    index: HashMap<CanonicalZip, usize>,
    source: Option<PathBuf>,
}

impl ReferenceStore {
    /// Loads the reference table from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let records = read_reference_csv(path)?;
        let mut store = Self::from_records(records)?;
        store.source = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            zips = store.len(),
            below_floor = store.count_below(POPULATION_FLOOR),
            "loaded census reference"
        );
        Ok(store)
    }

    /// Builds a store from already-parsed records.
    pub fn from_records(records: Vec<ReferenceRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.zip.clone(), position).is_some() {
                return Err(ReferenceError::DuplicateZip {
                    zip: record.zip.as_str().to_string(),
                    line: position as u64 + 1,
                    path: PathBuf::from("<memory>"),
                });
            }
        }
        Ok(Self {
            records,
            index,
            source: None,
        })
    }

    /// File the store was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    /// Looks up a ZIP without any population floor.
    pub fn get(&self, zip: &CanonicalZip) -> Option<&ReferenceRecord> {
        self.index.get(zip).map(|&position| &self.records[position])
    }

    /// Number of rows whose population is below `floor`.
    pub fn count_below(&self, floor: u64) -> usize {
        self.records
            .iter()
            .filter(|record| !record.meets_population_floor(floor))
            .count()
    }

    /// A read-only view restricted to rows with population at least
    /// `min_population`. `None` keeps every row.
    pub fn filtered(&self, min_population: Option<u64>) -> ReferenceView<'_> {
        ReferenceView {
            store: self,
            floor: min_population,
        }
    }
}

/// A population-floor view over a [`ReferenceStore`].
///
/// The view never copies rows; excluded ZIPs simply do not resolve.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceView<'a> {
    store: &'a ReferenceStore,
    floor: Option<u64>,
}

impl<'a> ReferenceView<'a> {
    pub fn floor(&self) -> Option<u64> {
        self.floor
    }

    fn admits(&self, record: &ReferenceRecord) -> bool {
        self.floor
            .is_none_or(|floor| record.meets_population_floor(floor))
    }

    pub fn get(&self, zip: &CanonicalZip) -> Option<&'a ReferenceRecord> {
        self.store.get(zip).filter(|record| self.admits(record))
    }

    pub fn contains(&self, zip: &CanonicalZip) -> bool {
        self.get(zip).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ReferenceRecord> + '_ {
        self.store
            .records
            .iter()
            .filter(move |record| self.admits(record))
    }

    pub fn len(&self) -> usize {
        match self.floor {
            Some(floor) => self.store.len() - self.store.count_below(floor),
            None => self.store.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(zip: &str, population: u64) -> ReferenceRecord {
        ReferenceRecord {
            zip: CanonicalZip::normalize(zip),
            median_income: Some(50_000.0),
            median_age: Some(35.0),
            population,
        }
    }

    fn store() -> ReferenceStore {
        ReferenceStore::from_records(vec![
            record("90210", 34_000),
            record("00501", 50),
            record("10001", 100),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_unfiltered() {
        let store = store();
        assert_eq!(store.len(), 3);
        assert!(store.get(&CanonicalZip::normalize("501")).is_some());
        assert!(store.get(&CanonicalZip::normalize("00000")).is_none());
    }

    #[test]
    fn test_filtered_view_applies_floor() {
        let store = store();
        let view = store.filtered(Some(POPULATION_FLOOR));
        assert!(view.get(&CanonicalZip::normalize("00501")).is_none());
        // The floor is inclusive.
        assert!(view.contains(&CanonicalZip::normalize("10001")));
        assert_eq!(view.len(), 2);
        assert_eq!(view.iter().count(), 2);
        assert_eq!(store.count_below(POPULATION_FLOOR), 1);
    }

    #[test]
    fn test_unfiltered_view_keeps_everything() {
        let store = store();
        let view = store.filtered(None);
        assert_eq!(view.len(), 3);
        assert!(view.contains(&CanonicalZip::normalize("00501")));
    }

    #[test]
    fn test_duplicate_records_rejected() {
        let result = ReferenceStore::from_records(vec![record("501", 10), record("00501", 20)]);
        assert!(matches!(result, Err(ReferenceError::DuplicateZip { .. })));
    }
}
