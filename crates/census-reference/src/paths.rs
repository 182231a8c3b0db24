use std::path::{Path, PathBuf};

/// Environment variable naming the reference CSV.
pub const REFERENCE_ENV_VAR: &str = "CENSUS_REFERENCE_PATH";

/// Reference file looked up in the working directory when nothing else is set.
pub const DEFAULT_REFERENCE_FILE: &str = "census_reference.csv";

/// Resolves the reference CSV location.
///
/// Precedence: `explicit`, then [`REFERENCE_ENV_VAR`], then
/// [`DEFAULT_REFERENCE_FILE`] in the working directory.
pub fn resolve_reference_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    resolve_with_env(std::env::var_os(REFERENCE_ENV_VAR).map(PathBuf::from))
}

fn resolve_with_env(env_value: Option<PathBuf>) -> PathBuf {
    env_value
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REFERENCE_FILE))
}
