//! Common test utilities

use std::fs;

/// Test fixture directory
pub const FIXTURES_DIR: &str = "tests/fixtures/responses";

/// Load a fixture file as a string
pub fn load_fixture(filename: &str) -> String {
    let path = format!("{FIXTURES_DIR}/{filename}");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}
