//! Process-wide reference store.
//!
//! The reference table is loaded at most once per process and shared
//! read-only afterwards. The first successful load wins; later calls with a
//! different path get the already-loaded store.

use std::path::Path;
use std::sync::OnceLock;

use crate::error::Result;
use crate::store::ReferenceStore;

static SHARED_STORE: OnceLock<ReferenceStore> = OnceLock::new();

/// Returns the shared store, loading it from `path` on first use.
///
/// A failed load leaves the slot empty so a later call can retry.
pub fn shared(path: &Path) -> Result<&'static ReferenceStore> {
    if let Some(store) = SHARED_STORE.get() {
        return Ok(store);
    }
    let loaded = ReferenceStore::load(path)?;
    Ok(SHARED_STORE.get_or_init(|| loaded))
}
