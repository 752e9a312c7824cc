// Event Repository
// Handles all database operations for game events

use rusqlite::{params, Connection};

use crate::models::{Event, EventInput};
use crate::utils::database::Database;

const EVENT_COLUMNS: &str = r#"
    id, date, opponent_name, opponent_logo, is_home, location,
    time_7th, time_8th, score_7th_home, score_7th_away,
    score_8th_home, score_8th_away, notes, is_non_conference, created_at
"#;

/// Repository for game event data access
pub struct EventRepository {
    db: Database,
}

impl EventRepository {
    /// Create a new EventRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List all events ordered by date
    pub fn list(&self) -> Result<Vec<Event>, String> {
        self.db.with_connection(list_events)
    }

    /// Get an event by ID
    pub fn get(&self, id: i64) -> Result<Option<Event>, String> {
        self.db.with_connection(|conn| {
            let result = conn.query_row(
                &format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS),
                params![id],
                map_event_row,
            );

            match result {
                Ok(row) => Ok(Some(row.into_event())),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(format!("Failed to get event: {}", e)),
            }
        })
    }

    /// Create a new event, returning its assigned ID
    pub fn create(&self, input: &EventInput) -> Result<i64, String> {
        self.db
            .with_connection(|conn| insert_event(conn, None, input, None))
    }

    /// Update an existing event; returns false when the ID is unknown
    pub fn update(&self, id: i64, input: &EventInput) -> Result<bool, String> {
        self.db.with_connection(|conn| {
            let rows_affected = conn
                .execute(
                    r#"
                    UPDATE events
                    SET date = ?1,
                        opponent_name = ?2,
                        opponent_logo = ?3,
                        is_home = ?4,
                        location = ?5,
                        time_7th = ?6,
                        time_8th = ?7,
                        score_7th_home = ?8,
                        score_7th_away = ?9,
                        score_8th_home = ?10,
                        score_8th_away = ?11,
                        notes = ?12,
                        is_non_conference = ?13
                    WHERE id = ?14
                    "#,
                    params![
                        input.date,
                        input.opponent_name,
                        input.opponent_logo,
                        input.is_home as i32,
                        input.location,
                        input.time_7th,
                        input.time_8th,
                        input.score_7th_home,
                        input.score_7th_away,
                        input.score_8th_home,
                        input.score_8th_away,
                        input.notes,
                        input.is_non_conference as i32,
                        id,
                    ],
                )
                .map_err(|e| format!("Failed to update event: {}", e))?;

            Ok(rows_affected > 0)
        })
    }

    /// Delete an event by ID; returns false when the ID is unknown
    pub fn delete(&self, id: i64) -> Result<bool, String> {
        self.db.with_connection(|conn| {
            let rows_affected = conn
                .execute("DELETE FROM events WHERE id = ?1", params![id])
                .map_err(|e| format!("Failed to delete event: {}", e))?;

            Ok(rows_affected > 0)
        })
    }
}

/// List all events ordered by date
pub(crate) fn list_events(conn: &Connection) -> Result<Vec<Event>, String> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM events ORDER BY date ASC",
            EVENT_COLUMNS
        ))
        .map_err(|e| format!("Failed to prepare statement: {}", e))?;

    let rows = stmt
        .query_map([], map_event_row)
        .map_err(|e| format!("Failed to query events: {}", e))?;

    let mut events = Vec::new();
    for row in rows {
        let row = row.map_err(|e| format!("Failed to read row: {}", e))?;
        events.push(row.into_event());
    }

    Ok(events)
}

/// Delete every event row
pub(crate) fn delete_all_events(conn: &Connection) -> Result<(), String> {
    conn.execute("DELETE FROM events", [])
        .map_err(|e| format!("Failed to clear events: {}", e))?;
    Ok(())
}

/// Insert an event row.
/// `id` and `created_at` are preserved when provided (restore path) and
/// assigned by the store otherwise (CRUD path).
pub(crate) fn insert_event(
    conn: &Connection,
    id: Option<i64>,
    input: &EventInput,
    created_at: Option<&str>,
) -> Result<i64, String> {
    conn.execute(
        r#"
        INSERT INTO events (
            id, date, opponent_name, opponent_logo, is_home, location,
            time_7th, time_8th, score_7th_home, score_7th_away,
            score_8th_home, score_8th_away, notes, is_non_conference, created_at
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
            COALESCE(?15, CURRENT_TIMESTAMP)
        )
        "#,
        params![
            id,
            input.date,
            input.opponent_name,
            input.opponent_logo,
            input.is_home as i32,
            input.location,
            input.time_7th,
            input.time_8th,
            input.score_7th_home,
            input.score_7th_away,
            input.score_8th_home,
            input.score_8th_away,
            input.notes,
            input.is_non_conference as i32,
            created_at,
        ],
    )
    .map_err(|e| format!("Failed to insert event: {}", e))?;

    Ok(conn.last_insert_rowid())
}

fn map_event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        date: row.get(1)?,
        opponent_name: row.get(2)?,
        opponent_logo: row.get(3)?,
        is_home: row.get(4)?,
        location: row.get(5)?,
        time_7th: row.get(6)?,
        time_8th: row.get(7)?,
        score_7th_home: row.get(8)?,
        score_7th_away: row.get(9)?,
        score_8th_home: row.get(10)?,
        score_8th_away: row.get(11)?,
        notes: row.get(12)?,
        is_non_conference: row.get(13)?,
        created_at: row.get(14)?,
    })
}

/// Internal row structure for mapping database rows
struct EventRow {
    id: i64,
    date: String,
    opponent_name: String,
    opponent_logo: Option<String>,
    is_home: i32,
    location: Option<String>,
    time_7th: Option<String>,
    time_8th: Option<String>,
    score_7th_home: Option<i64>,
    score_7th_away: Option<i64>,
    score_8th_home: Option<i64>,
    score_8th_away: Option<i64>,
    notes: Option<String>,
    is_non_conference: i32,
    created_at: String,
}

impl EventRow {
    fn into_event(self) -> Event {
        Event {
            id: self.id,
            date: self.date,
            opponent_name: self.opponent_name,
            opponent_logo: self.opponent_logo,
            is_home: self.is_home != 0,
            location: self.location,
            time_7th: self.time_7th,
            time_8th: self.time_8th,
            score_7th_home: self.score_7th_home,
            score_7th_away: self.score_7th_away,
            score_8th_home: self.score_8th_home,
            score_8th_away: self.score_8th_away,
            notes: self.notes,
            is_non_conference: self.is_non_conference != 0,
            created_at: self.created_at,
        }
    }
}
