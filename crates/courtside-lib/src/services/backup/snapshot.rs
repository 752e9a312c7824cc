// Snapshot Model
// The versioned document representing all relational state at one instant.
// Its shape is schema-stable and decoupled from the live storage layout:
// identifiers and optional fields are tolerated as absent on import, and
// boolean-like fields pass through the loose-coercion boundary.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{BackupError, BackupResult};
use crate::models::{Event, EventInput, SettingsUpdate, TeamSettings};
use crate::repositories::{event_repo, settings_repo};
use crate::utils::database::Database;
use crate::utils::form;

/// Snapshot schema revision written by this build
pub const SNAPSHOT_FORMAT_VERSION: &str = "1.0";

/// Serialized relational state: the settings singleton plus every event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub format_version: String,
    #[serde(default)]
    pub generated_at: String,
    pub settings: SnapshotSettings,
    #[serde(default)]
    pub events: Vec<SnapshotEvent>,
}

/// Settings as carried in a snapshot; every field tolerated as absent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSettings {
    #[serde(default)]
    pub home_team_name: Option<String>,
    #[serde(default)]
    pub home_location: Option<String>,
    #[serde(default)]
    pub home_logo: Option<String>,
}

/// An event as carried in a snapshot.
/// `id` is preserved on import when present and reassigned by the store
/// when absent (the empty-store import case).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEvent {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: String,
    pub opponent_name: String,
    #[serde(default)]
    pub opponent_logo: Option<String>,
    #[serde(default, deserialize_with = "form::boolish")]
    pub is_home: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time_7th: Option<String>,
    #[serde(default)]
    pub time_8th: Option<String>,
    #[serde(default)]
    pub score_7th_home: Option<i64>,
    #[serde(default)]
    pub score_7th_away: Option<i64>,
    #[serde(default)]
    pub score_8th_home: Option<i64>,
    #[serde(default)]
    pub score_8th_away: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "form::boolish")]
    pub is_non_conference: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Snapshot {
    /// Capture the current relational state.
    /// Reads the settings record and every event in one lock; never touches
    /// asset bytes.
    pub fn capture(db: &Database) -> BackupResult<Snapshot> {
        let (settings, events) = db
            .with_connection(|conn| {
                Ok((
                    settings_repo::get_settings(conn)?,
                    event_repo::list_events(conn)?,
                ))
            })
            .map_err(|message| BackupError::Store { message })?;

        Ok(Snapshot {
            format_version: SNAPSHOT_FORMAT_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            settings: settings.into(),
            events: events.into_iter().map(SnapshotEvent::from).collect(),
        })
    }

    /// Parse and validate snapshot bytes
    pub fn parse(bytes: &[u8]) -> BackupResult<Snapshot> {
        let doc: Value = serde_json::from_slice(bytes).map_err(|e| BackupError::Parse {
            message: e.to_string(),
        })?;
        Snapshot::from_value(doc)
    }

    /// Validate and deserialize an already-parsed JSON document
    pub fn from_value(doc: Value) -> BackupResult<Snapshot> {
        validate(&doc)?;
        serde_json::from_value(doc).map_err(|e| BackupError::Parse {
            message: e.to_string(),
        })
    }

    /// Canonical text encoding of the snapshot
    pub fn to_json(&self) -> BackupResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BackupError::Build {
            message: e.to_string(),
        })
    }
}

/// Check the required top-level shape: a `settings` object and an `events`
/// array. An unrecognized or missing `formatVersion` is accepted with a
/// warning; older exports predate the field and newer ones are restored
/// best-effort, field by field.
pub fn validate(doc: &Value) -> BackupResult<()> {
    let root = doc.as_object().ok_or_else(|| BackupError::Schema {
        message: "snapshot root must be an object".to_string(),
    })?;

    if !root.get("settings").is_some_and(Value::is_object) {
        return Err(BackupError::Schema {
            message: "missing settings object".to_string(),
        });
    }
    if !root.get("events").is_some_and(Value::is_array) {
        return Err(BackupError::Schema {
            message: "missing events array".to_string(),
        });
    }

    match root.get("formatVersion").and_then(Value::as_str) {
        Some(SNAPSHOT_FORMAT_VERSION) => {}
        Some(other) => {
            log::warn!("[backup] Unrecognized snapshot format version {:?}, restoring best-effort", other);
        }
        None => {
            log::warn!("[backup] Snapshot carries no format version, restoring best-effort");
        }
    }

    Ok(())
}

impl From<TeamSettings> for SnapshotSettings {
    fn from(settings: TeamSettings) -> Self {
        Self {
            home_team_name: Some(settings.home_team_name),
            home_location: Some(settings.home_location),
            home_logo: settings.home_logo,
        }
    }
}

impl SnapshotSettings {
    /// Convert into the partial-update form applied to the singleton
    pub(crate) fn into_update(self) -> SettingsUpdate {
        SettingsUpdate {
            home_team_name: self.home_team_name,
            home_location: self.home_location,
            home_logo: self.home_logo,
        }
    }
}

impl From<Event> for SnapshotEvent {
    fn from(event: Event) -> Self {
        Self {
            id: Some(event.id),
            date: event.date,
            opponent_name: event.opponent_name,
            opponent_logo: event.opponent_logo,
            is_home: event.is_home,
            location: event.location,
            time_7th: event.time_7th,
            time_8th: event.time_8th,
            score_7th_home: event.score_7th_home,
            score_7th_away: event.score_7th_away,
            score_8th_home: event.score_8th_home,
            score_8th_away: event.score_8th_away,
            notes: event.notes,
            is_non_conference: event.is_non_conference,
            created_at: Some(event.created_at),
        }
    }
}

impl SnapshotEvent {
    /// Split into the pieces the store insert expects
    pub(crate) fn into_parts(self) -> (Option<i64>, EventInput, Option<String>) {
        let input = EventInput {
            date: self.date,
            opponent_name: self.opponent_name,
            opponent_logo: self.opponent_logo,
            is_home: self.is_home,
            location: self.location,
            time_7th: self.time_7th,
            time_8th: self.time_8th,
            score_7th_home: self.score_7th_home,
            score_7th_away: self.score_7th_away,
            score_8th_home: self.score_8th_home,
            score_8th_away: self.score_8th_away,
            notes: self.notes,
            is_non_conference: self.is_non_conference,
        };
        (self.id, input, self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventInput;
    use crate::repositories::EventRepository;
    use tempfile::tempdir;

    fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn test_capture_wraps_settings_and_events() {
        let (_dir, db) = test_db();
        EventRepository::new(db.clone())
            .create(&EventInput {
                date: "2024-01-10".to_string(),
                opponent_name: "Eagles".to_string(),
                is_home: true,
                ..Default::default()
            })
            .unwrap();

        let snapshot = Snapshot::capture(&db).unwrap();
        assert_eq!(snapshot.format_version, SNAPSHOT_FORMAT_VERSION);
        assert!(!snapshot.generated_at.is_empty());
        assert_eq!(snapshot.settings.home_team_name.as_deref(), Some("Home Team"));
        assert_eq!(snapshot.events.len(), 1);
        assert!(snapshot.events[0].id.is_some());
        assert_eq!(snapshot.events[0].opponent_name, "Eagles");
    }

    #[test]
    fn test_parse_accepts_loose_flags_and_missing_optionals() {
        let snapshot = Snapshot::parse(
            br#"{
                "formatVersion": "1.0",
                "generatedAt": "2024-01-01T00:00:00Z",
                "settings": { "homeTeamName": "Wildcats" },
                "events": [
                    { "date": "2024-01-10", "opponentName": "Eagles", "isHome": "1", "isNonConference": 1 }
                ]
            }"#,
        )
        .unwrap();

        let event = &snapshot.events[0];
        assert!(event.id.is_none());
        assert!(event.is_home);
        assert!(event.is_non_conference);
        assert!(event.score_7th_home.is_none());
        assert!(event.created_at.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_required_shape() {
        let err = Snapshot::parse(br#"{ "settings": {} }"#).unwrap_err();
        assert!(matches!(err, BackupError::Schema { .. }));

        let err = Snapshot::parse(br#"{ "events": [] }"#).unwrap_err();
        assert!(matches!(err, BackupError::Schema { .. }));

        let err = Snapshot::parse(br#"[1, 2]"#).unwrap_err();
        assert!(matches!(err, BackupError::Schema { .. }));

        let err = Snapshot::parse(b"not json").unwrap_err();
        assert!(matches!(err, BackupError::Parse { .. }));
    }

    #[test]
    fn test_unknown_format_version_is_tolerated() {
        let snapshot = Snapshot::parse(
            br#"{ "formatVersion": "9.9", "settings": {}, "events": [] }"#,
        )
        .unwrap();
        assert_eq!(snapshot.format_version, "9.9");
    }

    #[test]
    fn test_json_roundtrip_preserves_flags_verbatim() {
        let (_dir, db) = test_db();
        EventRepository::new(db.clone())
            .create(&EventInput {
                date: "2024-01-10".to_string(),
                opponent_name: "Eagles".to_string(),
                is_home: false,
                is_non_conference: true,
                ..Default::default()
            })
            .unwrap();

        let snapshot = Snapshot::capture(&db).unwrap();
        let reparsed = Snapshot::parse(snapshot.to_json().unwrap().as_bytes()).unwrap();

        assert!(!reparsed.events[0].is_home);
        assert!(reparsed.events[0].is_non_conference);
        assert_eq!(reparsed.events[0].id, snapshot.events[0].id);
    }
}
