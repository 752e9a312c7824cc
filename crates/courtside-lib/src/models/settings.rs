// Team settings models
// The settings record is a singleton: exactly one row, updated in place

use serde::{Deserialize, Serialize};

/// The single team settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSettings {
    pub home_team_name: String,
    pub home_location: String,
    pub home_logo: Option<String>,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            home_team_name: "Home Team".to_string(),
            home_location: String::new(),
            home_logo: None,
        }
    }
}

/// Partial update applied to the settings singleton.
/// Empty or missing fields keep the stored value; a logo reference can be
/// replaced but not cleared through this path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default)]
    pub home_team_name: Option<String>,
    #[serde(default)]
    pub home_location: Option<String>,
    #[serde(default)]
    pub home_logo: Option<String>,
}

impl SettingsUpdate {
    /// Merge this update onto an existing record
    pub fn apply_to(&self, existing: &TeamSettings) -> TeamSettings {
        TeamSettings {
            home_team_name: merge_text(&self.home_team_name, &existing.home_team_name),
            home_location: merge_text(&self.home_location, &existing.home_location),
            home_logo: self
                .home_logo
                .clone()
                .or_else(|| existing.home_logo.clone()),
        }
    }
}

fn merge_text(incoming: &Option<String>, existing: &str) -> String {
    match incoming {
        Some(value) if !value.is_empty() => value.clone(),
        _ => existing.to_string(),
    }
}
