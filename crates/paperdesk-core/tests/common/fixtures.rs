//! Test fixture loading utilities

use std::path::PathBuf;

use paperdesk_core::Article;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load a mock API response fixture
pub fn load_response_fixture(name: &str) -> String {
    load_fixture(&format!("responses/{}", name))
}

/// A minimal article shared across the integration tests
pub fn study_article() -> Article {
    Article::new(
        "2301.00001",
        "A Study",
        vec!["A. Smith".to_string()],
        "We study a thing.",
    )
}
