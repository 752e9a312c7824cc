// Database Schema Migrations
// Versioned, forward-only migrations tracked in the schema_version table

use rusqlite::Connection;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        [],
    )
    .map_err(|e| format!("Failed to create schema_version table: {}", e))?;

    let current: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| format!("Failed to read schema version: {}", e))?;

    if current < 1 {
        migrate_v1(conn)?;
        record_version(conn, 1)?;
    }

    Ok(())
}

/// v1: settings singleton + events table, seed the settings row
fn migrate_v1(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            home_team_name TEXT NOT NULL DEFAULT 'Home Team',
            home_location TEXT NOT NULL DEFAULT '',
            home_logo TEXT
        );

        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            opponent_name TEXT NOT NULL,
            opponent_logo TEXT,
            is_home INTEGER NOT NULL,
            location TEXT,
            time_7th TEXT,
            time_8th TEXT,
            score_7th_home INTEGER,
            score_7th_away INTEGER,
            score_8th_home INTEGER,
            score_8th_away INTEGER,
            notes TEXT,
            is_non_conference INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        INSERT OR IGNORE INTO settings (id, home_team_name, home_location, home_logo)
        VALUES (1, 'Home Team', '', NULL);
        "#,
    )
    .map_err(|e| format!("Failed to apply migration v1: {}", e))
}

fn record_version(conn: &Connection, version: i32) -> Result<(), String> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| format!("Failed to record schema version {}: {}", version, e))?;
    Ok(())
}
