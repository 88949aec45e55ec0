//! Test fixtures for the Firebase AI request layer.
//!
//! Recorded backend responses live next to this file, grouped by backend
//! (`vertexai/`, `googleai/`).

use std::path::PathBuf;

/// Get the path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("fixtures")
        .join(relative_path)
}

/// Load a fixture file as a string.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(relative_path: &str) -> String {
    std::fs::read_to_string(fixture_path(relative_path))
        .unwrap_or_else(|e| panic!("Failed to load fixture {relative_path}: {e}"))
}

/// Load a JSON fixture and parse it.
///
/// # Panics
///
/// Panics if the file cannot be read or is not valid JSON for `T`.
pub fn load_json_fixture<T: serde::de::DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse JSON fixture {relative_path}: {e}"))
}
