//! Input limits and path helpers.

use std::path::Path;

/// Maximum number of selected annotation features in one run
pub const MAX_FEATURES: usize = 1_000_000;

/// Default cap on the decoded size of a single input file (16 GiB)
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024 * 1024;

/// Check if adding another feature would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new feature.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```
/// use premir_extract::utils::validation::{check_feature_limit, MAX_FEATURES};
///
/// assert!(check_feature_limit(0).is_none());
/// assert!(check_feature_limit(MAX_FEATURES).is_some());
/// ```
#[must_use]
pub fn check_feature_limit(count: usize) -> Option<String> {
    if count >= MAX_FEATURES {
        Some(format!(
            "Too many features: adding another would exceed maximum of {MAX_FEATURES}"
        ))
    } else {
        None
    }
}

/// Check if the path is a gzipped file
#[must_use]
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Check if the path names standard input
#[must_use]
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
