// Settings Repository
// Handles database access for the team settings singleton (row id 1).
// The row is seeded by the first migration and only ever updated in place.

use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{SettingsUpdate, TeamSettings};
use crate::utils::database::Database;

/// Repository for the settings singleton
pub struct SettingsRepository {
    db: Database,
}

impl SettingsRepository {
    /// Create a new SettingsRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get the settings record
    pub fn get(&self) -> Result<TeamSettings, String> {
        self.db.with_connection(get_settings)
    }

    /// Apply a partial update to the settings record
    pub fn update(&self, update: &SettingsUpdate) -> Result<(), String> {
        self.db
            .with_connection(|conn| update_settings(conn, update))
    }
}

/// Read the settings row; falls back to defaults if the seed row is missing
pub(crate) fn get_settings(conn: &Connection) -> Result<TeamSettings, String> {
    let row = conn
        .query_row(
            "SELECT home_team_name, home_location, home_logo FROM settings WHERE id = 1",
            [],
            |row| {
                Ok(TeamSettings {
                    home_team_name: row.get(0)?,
                    home_location: row.get(1)?,
                    home_logo: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(|e| format!("Failed to read settings: {}", e))?;

    Ok(row.unwrap_or_default())
}

/// Merge an update onto the stored row and write it back
pub(crate) fn update_settings(conn: &Connection, update: &SettingsUpdate) -> Result<(), String> {
    let merged = update.apply_to(&get_settings(conn)?);

    conn.execute(
        r#"
        UPDATE settings
        SET home_team_name = ?1,
            home_location = ?2,
            home_logo = ?3
        WHERE id = 1
        "#,
        params![
            merged.home_team_name,
            merged.home_location,
            merged.home_logo,
        ],
    )
    .map_err(|e| format!("Failed to update settings: {}", e))?;

    Ok(())
}
