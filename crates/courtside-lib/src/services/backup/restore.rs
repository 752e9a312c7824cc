// Restore Orchestrator
// Destructively replaces live state from a validated archive. The sequence
// is linear and strictly ordered: relational replacement always happens
// before any asset-directory mutation, so a fatal database error never
// costs the operator their existing logo files. Per-file asset failures
// are absorbed into the returned counts. There is no rollback of the
// relational step once asset resynchronization has begun.

use super::archive::ArchiveReader;
use super::error::{BackupError, BackupResult};
use super::snapshot::Snapshot;
use crate::repositories::{event_repo, settings_repo};
use crate::services::assets::AssetDirectory;
use crate::utils::database::Database;

/// Outcome of a completed restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Asset files actually written back
    pub files_restored: u32,
    /// Asset files present in the archive
    pub files_in_archive: u32,
}

/// Replaces relational state and resynchronizes the asset directory
pub struct RestoreOrchestrator {
    db: Database,
    assets: AssetDirectory,
}

impl RestoreOrchestrator {
    pub fn new(db: Database, assets: AssetDirectory) -> Self {
        Self { db, assets }
    }

    /// Restore from an uploaded archive.
    ///
    /// The buffer is owned here: it is dropped on every exit path, fatal
    /// ones included, which is the whole of the cleanup step. Nothing is
    /// mutated until the archive has been opened and its snapshot parsed
    /// and validated.
    pub fn restore_archive(&self, archive: Vec<u8>) -> BackupResult<RestoreSummary> {
        let mut reader = ArchiveReader::open(archive)?;
        let snapshot = reader.parse_snapshot()?;

        log::info!(
            "[restore] Snapshot validated: {} events, {} archive entries",
            snapshot.events.len(),
            reader.entry_count()
        );

        self.replace_relational(snapshot)?;

        let cleared = self.assets.clear();
        if cleared.failed > 0 {
            log::warn!(
                "[restore] {} existing asset files could not be deleted",
                cleared.failed
            );
        }

        let entries = reader.asset_entries();
        let files_in_archive = entries.len() as u32;
        let mut files_restored = 0u32;

        for entry in entries {
            let bytes = match reader.read_asset(&entry.name) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("[restore] Failed to extract {}: {}", entry.name, e);
                    continue;
                }
            };
            match self.assets.write_file(&entry.name, &bytes) {
                Ok(()) => files_restored += 1,
                Err(e) => log::warn!("[restore] Failed to write {}: {}", entry.name, e),
            }
        }

        log::info!(
            "[restore] Restored {} of {} asset files",
            files_restored,
            files_in_archive
        );

        Ok(RestoreSummary {
            files_restored,
            files_in_archive,
        })
    }

    /// Legacy snapshot-only restore: relational replacement with no asset
    /// handling at all
    pub fn restore_snapshot(&self, snapshot: Snapshot) -> BackupResult<()> {
        self.replace_relational(snapshot)
    }

    /// Delete all events, update the settings singleton in place, and
    /// insert every snapshot event, preserving identifiers when present.
    /// Runs inside one transaction; a failure rolls back and is fatal to
    /// the restore.
    fn replace_relational(&self, snapshot: Snapshot) -> BackupResult<()> {
        let Snapshot {
            settings, events, ..
        } = snapshot;

        self.db
            .with_transaction(|conn| {
                event_repo::delete_all_events(conn)?;
                settings_repo::update_settings(conn, &settings.into_update())?;
                for event in events {
                    let (id, input, created_at) = event.into_parts();
                    event_repo::insert_event(conn, id, &input, created_at.as_deref())?;
                }
                Ok(())
            })
            .map_err(|message| BackupError::RelationalReplace { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventInput, SettingsUpdate};
    use crate::repositories::{EventRepository, SettingsRepository};
    use crate::services::backup::archive::{ArchiveBuilder, SNAPSHOT_ENTRY};
    use std::io::{Cursor, Write};
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    struct Fixture {
        _dir: tempfile::TempDir,
        db: Database,
        assets: AssetDirectory,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            let db = Database::new(dir.path().join("test.db")).unwrap();
            let assets = AssetDirectory::new(dir.path().join("uploads")).unwrap();
            Self {
                _dir: dir,
                db,
                assets,
            }
        }

        fn orchestrator(&self) -> RestoreOrchestrator {
            RestoreOrchestrator::new(self.db.clone(), self.assets.clone())
        }

        fn events(&self) -> Vec<crate::models::Event> {
            EventRepository::new(self.db.clone()).list().unwrap()
        }

        fn settings(&self) -> crate::models::TeamSettings {
            SettingsRepository::new(self.db.clone()).get().unwrap()
        }

        fn export(&self) -> Vec<u8> {
            let snapshot = Snapshot::capture(&self.db).unwrap();
            ArchiveBuilder::new(&self.assets)
                .build_to_vec(&snapshot)
                .unwrap()
        }
    }

    fn eagles_game() -> EventInput {
        EventInput {
            date: "2024-01-10".to_string(),
            opponent_name: "Eagles".to_string(),
            opponent_logo: Some("/uploads/eagles.png".to_string()),
            is_home: true,
            score_7th_home: Some(20),
            score_7th_away: Some(18),
            ..Default::default()
        }
    }

    /// Zip containing only the given named entries
    fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, bytes) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(bytes).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_round_trip_into_empty_store() {
        let source = Fixture::new();
        EventRepository::new(source.db.clone())
            .create(&eagles_game())
            .unwrap();
        SettingsRepository::new(source.db.clone())
            .update(&SettingsUpdate {
                home_team_name: Some("Wildcats".to_string()),
                home_location: Some("12 Gym Rd".to_string()),
                home_logo: None,
            })
            .unwrap();
        source.assets.write_file("eagles.png", b"png").unwrap();

        let archive = source.export();

        let target = Fixture::new();
        let summary = target.orchestrator().restore_archive(archive).unwrap();
        assert_eq!(summary.files_restored, 1);
        assert_eq!(summary.files_in_archive, 1);

        let events = target.events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.opponent_name, "Eagles");
        assert!(event.is_home);
        assert_eq!(event.score_7th(), Some((20, 18)));
        assert_eq!(event.score_8th(), None);
        assert_eq!(event.score_8th_home, None);
        assert_eq!(event.score_8th_away, None);
        assert!(!event.is_non_conference);

        assert_eq!(target.settings(), source.settings());
        assert_eq!(target.assets.read_file("eagles.png").unwrap(), b"png");
    }

    #[test]
    fn test_restore_is_idempotent() {
        let source = Fixture::new();
        EventRepository::new(source.db.clone())
            .create(&eagles_game())
            .unwrap();
        source.assets.write_file("eagles.png", b"png").unwrap();
        let archive = source.export();

        let target = Fixture::new();
        let first = target.orchestrator().restore_archive(archive.clone()).unwrap();
        let events_after_first = target.events();

        let second = target.orchestrator().restore_archive(archive).unwrap();
        assert_eq!(first, second);
        assert_eq!(target.events(), events_after_first);
        assert_eq!(target.assets.list_files().unwrap(), vec!["eagles.png"]);
    }

    #[test]
    fn test_identifiers_preserved_when_present() {
        let source = Fixture::new();
        let id = source
            .db
            .with_connection(|conn| event_repo::insert_event(conn, Some(42), &eagles_game(), None))
            .unwrap();
        assert_eq!(id, 42);
        let archive = source.export();

        let target = Fixture::new();
        target.orchestrator().restore_archive(archive).unwrap();
        assert_eq!(target.events()[0].id, 42);
    }

    #[test]
    fn test_identifiers_reassigned_when_absent() {
        let target = Fixture::new();
        let archive = zip_of(&[(
            SNAPSHOT_ENTRY,
            br#"{
                "formatVersion": "1.0",
                "settings": {},
                "events": [ { "date": "2024-01-10", "opponentName": "Eagles", "isHome": true } ]
            }"#,
        )]);

        target.orchestrator().restore_archive(archive).unwrap();
        let events = target.events();
        assert_eq!(events.len(), 1);
        assert!(events[0].id >= 1);
    }

    #[test]
    fn test_corrupt_blob_leaves_state_untouched() {
        let fixture = Fixture::new();
        EventRepository::new(fixture.db.clone())
            .create(&eagles_game())
            .unwrap();
        fixture.assets.write_file("eagles.png", b"png").unwrap();
        let events_before = fixture.events();

        let err = fixture
            .orchestrator()
            .restore_archive(b"garbage".to_vec())
            .unwrap_err();
        assert!(matches!(err, BackupError::CorruptArchive { .. }));
        assert!(err.is_pre_mutation());

        assert_eq!(fixture.events(), events_before);
        assert_eq!(fixture.assets.list_files().unwrap(), vec!["eagles.png"]);
    }

    #[test]
    fn test_archive_without_snapshot_leaves_state_untouched() {
        let fixture = Fixture::new();
        EventRepository::new(fixture.db.clone())
            .create(&eagles_game())
            .unwrap();
        fixture.assets.write_file("eagles.png", b"old").unwrap();
        let events_before = fixture.events();

        // Well-formed zip, asset entries only, no snapshot
        let archive = zip_of(&[("uploads/new.png", b"new")]);
        let err = fixture.orchestrator().restore_archive(archive).unwrap_err();
        assert!(matches!(err, BackupError::MissingSnapshot));

        assert_eq!(fixture.events(), events_before);
        assert_eq!(fixture.assets.list_files().unwrap(), vec!["eagles.png"]);
        assert_eq!(fixture.assets.read_file("eagles.png").unwrap(), b"old");
    }

    #[test]
    fn test_malformed_snapshot_leaves_state_untouched() {
        let fixture = Fixture::new();
        EventRepository::new(fixture.db.clone())
            .create(&eagles_game())
            .unwrap();
        let events_before = fixture.events();

        let archive = zip_of(&[(SNAPSHOT_ENTRY, br#"{ "events": [] }"#)]);
        let err = fixture.orchestrator().restore_archive(archive).unwrap_err();
        assert!(matches!(err, BackupError::Schema { .. }));
        assert_eq!(fixture.events(), events_before);
    }

    #[test]
    fn test_missing_referenced_asset_is_a_dangling_reference() {
        let fixture = Fixture::new();
        // Snapshot references eagles.png; the asset section is empty
        let archive = zip_of(&[(
            SNAPSHOT_ENTRY,
            br#"{
                "formatVersion": "1.0",
                "settings": { "homeTeamName": "Wildcats" },
                "events": [ {
                    "date": "2024-01-10",
                    "opponentName": "Eagles",
                    "opponentLogo": "/uploads/eagles.png",
                    "isHome": true
                } ]
            }"#,
        )]);

        let summary = fixture.orchestrator().restore_archive(archive).unwrap();
        assert_eq!(summary.files_restored, 0);
        assert_eq!(summary.files_in_archive, 0);

        // The reference is stored verbatim even though the file is absent
        let events = fixture.events();
        assert_eq!(
            events[0].opponent_logo.as_deref(),
            Some("/uploads/eagles.png")
        );
        assert!(!fixture.assets.contains("eagles.png"));
    }

    #[test]
    fn test_partial_asset_tolerance_counts_only_successes() {
        let fixture = Fixture::new();
        let archive = zip_of(&[
            (
                SNAPSHOT_ENTRY,
                br#"{ "formatVersion": "1.0", "settings": {}, "events": [] }"#,
            ),
            ("uploads/ok.png", b"fine"),
            // Escaping names are rejected before the write step and do not
            // count toward either total
            ("uploads/../escape.png", b"nope"),
        ]);

        let summary = fixture.orchestrator().restore_archive(archive).unwrap();
        assert_eq!(summary.files_in_archive, 1);
        assert_eq!(summary.files_restored, 1);
        assert_eq!(fixture.assets.read_file("ok.png").unwrap(), b"fine");
    }

    #[test]
    fn test_undeletable_entries_survive_alongside_new_writes() {
        let fixture = Fixture::new();
        // A nested directory stands in for an entry the clear step cannot
        // remove; the restore must proceed past it
        std::fs::create_dir(fixture.assets.root().join("stuck")).unwrap();
        fixture.assets.write_file("old.png", b"old").unwrap();

        let archive = zip_of(&[
            (
                SNAPSHOT_ENTRY,
                br#"{ "formatVersion": "1.0", "settings": {}, "events": [] }"#,
            ),
            ("uploads/new.png", b"new"),
        ]);

        let summary = fixture.orchestrator().restore_archive(archive).unwrap();
        assert_eq!(summary.files_restored, 1);
        assert!(fixture.assets.root().join("stuck").is_dir());
        assert_eq!(fixture.assets.list_files().unwrap(), vec!["new.png"]);
    }

    #[test]
    fn test_relational_failure_leaves_assets_untouched() {
        let fixture = Fixture::new();
        fixture.assets.write_file("keep.png", b"keep").unwrap();

        // Two events with the same explicit id force a constraint failure
        // inside the relational step
        let archive = zip_of(&[
            (
                SNAPSHOT_ENTRY,
                br#"{
                    "formatVersion": "1.0",
                    "settings": {},
                    "events": [
                        { "id": 1, "date": "2024-01-10", "opponentName": "Eagles", "isHome": true },
                        { "id": 1, "date": "2024-01-11", "opponentName": "Hawks", "isHome": false }
                    ]
                }"#,
            ),
            ("uploads/new.png", b"new"),
        ]);

        let err = fixture.orchestrator().restore_archive(archive).unwrap_err();
        assert!(matches!(err, BackupError::RelationalReplace { .. }));
        assert!(!err.is_pre_mutation());

        // Asset directory was never reached
        assert_eq!(fixture.assets.list_files().unwrap(), vec!["keep.png"]);
        assert!(!fixture.assets.contains("new.png"));
    }

    #[test]
    fn test_legacy_snapshot_restore_skips_assets() {
        let fixture = Fixture::new();
        fixture.assets.write_file("keep.png", b"keep").unwrap();

        let snapshot = Snapshot::parse(
            br#"{
                "formatVersion": "1.0",
                "settings": { "homeTeamName": "Wildcats" },
                "events": [ { "date": "2024-01-10", "opponentName": "Eagles", "isHome": 1 } ]
            }"#,
        )
        .unwrap();

        fixture.orchestrator().restore_snapshot(snapshot).unwrap();

        assert_eq!(fixture.settings().home_team_name, "Wildcats");
        assert_eq!(fixture.events().len(), 1);
        assert_eq!(fixture.assets.list_files().unwrap(), vec!["keep.png"]);
    }
}
