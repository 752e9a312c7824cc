// Backup Engine Error Types

use thiserror::Error;

/// Backup engine error
///
/// Everything except `RelationalReplace` is raised before any mutation has
/// happened. Per-file asset failures are never errors; they only reduce the
/// restored-file count.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The uploaded container cannot be opened at all
    #[error("Backup archive could not be opened: {message}")]
    CorruptArchive { message: String },

    /// The container opens but has no snapshot entry
    #[error("Invalid backup file: missing database.json")]
    MissingSnapshot,

    /// The snapshot entry is present but not parseable
    #[error("Backup snapshot is not valid JSON: {message}")]
    Parse { message: String },

    /// The snapshot parses but lacks the required top-level shape
    #[error("Backup snapshot is missing required fields: {message}")]
    Schema { message: String },

    /// Reading the live store during capture failed
    #[error("Failed to read database state: {message}")]
    Store { message: String },

    /// Writing the archive during export failed
    #[error("Failed to build backup archive: {message}")]
    Build { message: String },

    /// Replacing the relational state failed mid-restore.
    /// The asset directory is untouched, but callers should verify the
    /// database before trusting its contents.
    #[error("Failed to replace database contents: {message}")]
    RelationalReplace { message: String },
}

impl BackupError {
    /// True for errors raised before any live state was mutated
    pub fn is_pre_mutation(&self) -> bool {
        !matches!(self, BackupError::RelationalReplace { .. })
    }
}

/// Result type for backup operations
pub type BackupResult<T> = Result<T, BackupError>;
