//! Census reference table.
//!
//! Loads the ZIP-level demographics CSV (`zip_code`, `median_income`,
//! `median_age`, `population`) into an immutable [`ReferenceStore`] and
//! exposes population-floor views over it.
//!
//! # Example
//!
//! ```ignore
//! use census_reference::{POPULATION_FLOOR, resolve_reference_path, shared};
//!
//! let store = shared(&resolve_reference_path(None))?;
//! let view = store.filtered(Some(POPULATION_FLOOR));
//! ```

mod error;
mod loader;
mod paths;
mod shared;
mod store;

pub use error::{ReferenceError, Result};
pub use loader::{
    MEDIAN_AGE_COLUMN, MEDIAN_INCOME_COLUMN, POPULATION_COLUMN, ZIP_CODE_COLUMN,
    read_reference_csv,
};
pub use paths::{DEFAULT_REFERENCE_FILE, REFERENCE_ENV_VAR, resolve_reference_path};
pub use shared::shared;
pub use store::{POPULATION_FLOOR, ReferenceStore, ReferenceView};
