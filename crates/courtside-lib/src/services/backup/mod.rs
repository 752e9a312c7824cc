// Backup Engine
// Captures the relational state plus the logo asset directory into one
// portable ZIP archive, and destructively restores from such an archive.
// Validation is strictly ordered before any mutation: a rejected archive
// leaves both the database and the asset directory untouched.

pub mod archive;
pub mod error;
pub mod restore;
pub mod snapshot;

pub use archive::{ArchiveBuilder, ArchiveReader, ASSET_PREFIX, SNAPSHOT_ENTRY};
pub use error::{BackupError, BackupResult};
pub use restore::{RestoreOrchestrator, RestoreSummary};
pub use snapshot::{Snapshot, SNAPSHOT_FORMAT_VERSION};
