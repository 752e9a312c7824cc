// Archive Builder and Reader
// One ZIP container carries the snapshot under a single well-known entry
// and the asset directory mirrored under a well-known prefix. The reader
// is the gatekeeper for restores: it must reject arbitrary bytes with a
// typed error, never an unrecoverable fault.

use std::io::{Cursor, Read, Seek, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::error::{BackupError, BackupResult};
use super::snapshot::Snapshot;
use crate::services::assets::AssetDirectory;

/// Well-known entry holding the serialized snapshot; exact-name lookup
pub const SNAPSHOT_ENTRY: &str = "database.json";

/// Well-known prefix under which asset files are mirrored
pub const ASSET_PREFIX: &str = "uploads/";

/// An asset entry found in an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    /// Bare filename, prefix stripped
    pub name: String,
    pub size: u64,
}

/// Builds one portable archive from a snapshot and the live asset directory
pub struct ArchiveBuilder<'a> {
    assets: &'a AssetDirectory,
}

impl<'a> ArchiveBuilder<'a> {
    pub fn new(assets: &'a AssetDirectory) -> Self {
        Self { assets }
    }

    /// Write the archive into the given sink and return it.
    /// Exports favor archive size over build time, so entries are deflated
    /// at the maximum compression level. An asset that cannot be read
    /// between listing and embedding is skipped rather than failing the
    /// whole export.
    pub fn build<W: Write + Seek>(&self, snapshot: &Snapshot, sink: W) -> BackupResult<W> {
        let mut zip = ZipWriter::new(sink);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(9));

        zip.start_file(SNAPSHOT_ENTRY, options)
            .map_err(build_error)?;
        zip.write_all(snapshot.to_json()?.as_bytes())
            .map_err(build_error)?;

        let names = self.assets.list_files().map_err(build_error)?;
        for name in names {
            let bytes = match self.assets.read_file(&name) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("[backup] Skipping asset {}: {}", name, e);
                    continue;
                }
            };
            zip.start_file(format!("{}{}", ASSET_PREFIX, name), options)
                .map_err(build_error)?;
            zip.write_all(&bytes).map_err(build_error)?;
        }

        zip.finish().map_err(build_error)
    }

    /// Build into an in-memory buffer
    pub fn build_to_vec(&self, snapshot: &Snapshot) -> BackupResult<Vec<u8>> {
        let cursor = self.build(snapshot, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }
}

fn build_error<E: std::fmt::Display>(e: E) -> BackupError {
    BackupError::Build {
        message: e.to_string(),
    }
}

/// Opens an uploaded container and exposes its snapshot and asset entries
#[derive(Debug)]
pub struct ArchiveReader {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl ArchiveReader {
    /// Open the container, rejecting anything structurally broken
    pub fn open(bytes: Vec<u8>) -> BackupResult<Self> {
        let archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| BackupError::CorruptArchive {
                message: e.to_string(),
            })?;
        Ok(Self { archive })
    }

    /// Number of entries in the container
    pub fn entry_count(&self) -> usize {
        self.archive.len()
    }

    /// Raw bytes of the well-known snapshot entry
    pub fn snapshot_bytes(&mut self) -> BackupResult<Vec<u8>> {
        let mut file = match self.archive.by_name(SNAPSHOT_ENTRY) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(BackupError::MissingSnapshot),
            Err(e) => {
                return Err(BackupError::CorruptArchive {
                    message: e.to_string(),
                })
            }
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| BackupError::CorruptArchive {
                message: e.to_string(),
            })?;
        Ok(bytes)
    }

    /// Locate, parse, and validate the embedded snapshot
    pub fn parse_snapshot(&mut self) -> BackupResult<Snapshot> {
        Snapshot::parse(&self.snapshot_bytes()?)
    }

    /// Entries under the asset prefix, directory markers excluded.
    /// Names that would escape the flat namespace are dropped here, before
    /// any write is attempted.
    pub fn asset_entries(&mut self) -> Vec<AssetEntry> {
        let mut entries = Vec::new();
        for index in 0..self.archive.len() {
            let file = match self.archive.by_index(index) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("[backup] Unreadable archive entry {}: {}", index, e);
                    continue;
                }
            };
            if file.is_dir() {
                continue;
            }

            let Some(name) = file.name().strip_prefix(ASSET_PREFIX) else {
                continue;
            };
            if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
                log::warn!("[backup] Ignoring unsafe archive entry {:?}", file.name());
                continue;
            }

            entries.push(AssetEntry {
                name: name.to_string(),
                size: file.size(),
            });
        }
        entries
    }

    /// Bytes of one asset entry
    pub fn read_asset(&mut self, name: &str) -> BackupResult<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(&format!("{}{}", ASSET_PREFIX, name))
            .map_err(|e| BackupError::CorruptArchive {
                message: e.to_string(),
            })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| BackupError::CorruptArchive {
                message: e.to_string(),
            })?;
        Ok(bytes)
    }
}
