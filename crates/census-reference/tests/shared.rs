//! The process-wide store. Kept in its own test binary so the slot starts
//! empty.

use std::io::Write;
use std::path::Path;

use census_model::CanonicalZip;
use census_reference::shared;
use tempfile::NamedTempFile;

#[test]
fn first_successful_load_wins() {
    let missing = shared(Path::new("/nonexistent/census_reference.csv"));
    assert!(missing.is_err());

    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    file.write_all(b"zip_code,median_income,median_age,population\n90210,120000,41.2,34000\n")
        .unwrap();
    file.flush().unwrap();

    let store = shared(file.path()).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.get(&CanonicalZip::normalize("90210")).is_some());

    let again = shared(Path::new("/nonexistent/other.csv")).unwrap();
    assert!(std::ptr::eq(store, again));
}
