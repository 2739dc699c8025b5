use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Theme identifier attached to a profile. Rendering is a presentation
/// concern; the core only stores and round-trips the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Sunset,
    Ocean,
    Forest,
    Mono,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunset => "sunset",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
            Theme::Mono => "mono",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sunset" => Some(Theme::Sunset),
            "ocean" => Some(Theme::Ocean),
            "forest" => Some(Theme::Forest),
            "mono" => Some(Theme::Mono),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user settings: allowed categories, theme and the optional PIN.
/// Profiles are looked up by id; no behavior branches on literal user names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user identifier, also the owner key on ledger rows
    pub id: String,
    /// Display name
    pub name: String,
    /// Category labels movements may use
    pub categories: Vec<String>,
    pub theme: Theme,
    /// Cosmetic gate compared by exact string equality. Not a security
    /// boundary; swap for a real auth collaborator if one is ever needed.
    pub pin: Option<String>,
}

impl UserProfile {
    pub fn allows_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Tunables for the health score heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthPolicy {
    /// Savings-rate multiplier. 150 is the inherited rule of thumb.
    pub multiplier: f64,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self { multiplier: 150.0 }
    }
}

/// Application configuration: user profiles plus scoring policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub profiles: Vec<UserProfile>,
    #[serde(default)]
    pub health: HealthPolicy,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Look up a profile by user id.
    pub fn profile(&self, user: &str) -> Option<&UserProfile> {
        self.profiles.iter().find(|p| p.id == user)
    }
}

impl Default for Config {
    /// Starter configuration with two sample household members.
    /// The ids, categories and PINs are placeholders meant to be replaced.
    fn default() -> Self {
        let categories: Vec<String> = ["food", "home", "shopping", "leisure", "stocks", "savings"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Self {
            profiles: vec![
                UserProfile {
                    id: "pablo".into(),
                    name: "Pablo".into(),
                    categories: categories.clone(),
                    theme: Theme::Sunset,
                    pin: Some("1234".into()),
                },
                UserProfile {
                    id: "maria".into(),
                    name: "María".into(),
                    categories,
                    theme: Theme::Ocean,
                    pin: Some("5678".into()),
                },
            ],
            health: HealthPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_roundtrip() {
        for theme in [Theme::Sunset, Theme::Ocean, Theme::Forest, Theme::Mono] {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_str("neon"), None);
    }

    #[test]
    fn test_profile_lookup_by_id() {
        let config = Config::default();
        assert!(config.profile("pablo").is_some());
        assert!(config.profile("Pablo").is_none(), "lookup is by id, not display name");
    }

    #[test]
    fn test_category_membership() {
        let config = Config::default();
        let profile = config.profile("maria").unwrap();
        assert!(profile.allows_category("food"));
        assert!(!profile.allows_category("yachts"));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.profiles.len(), config.profiles.len());
        assert_eq!(parsed.health.multiplier, 150.0);
    }
}
