// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use hucha::application::TrackerService;
use hucha::config::{Config, HealthPolicy, Theme, UserProfile};
use tempfile::TempDir;

/// Profiles used throughout the integration tests: two household members
/// with different category lists, one PIN-gated and one open.
pub fn test_config() -> Config {
    Config {
        profiles: vec![
            UserProfile {
                id: "ana".into(),
                name: "Ana".into(),
                categories: ["food", "home", "leisure", "salary", "bar"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                theme: Theme::Sunset,
                pin: Some("4321".into()),
            },
            UserProfile {
                id: "bruno".into(),
                name: "Bruno".into(),
                categories: ["food", "transport", "salary"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                theme: Theme::Mono,
                pin: None,
            },
        ],
        health: HealthPolicy::default(),
    }
}

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(TrackerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = TrackerService::init(db_path.to_str().unwrap(), test_config()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}
