// Asset Directory Accessor
// A flat, name-addressed namespace of uploaded logo files. Settings and
// events reference these files as /uploads/<name>; the directory itself
// holds no subdirectories and is rewritten wholesale on restore.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of a tolerant directory clear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearOutcome {
    pub deleted: u32,
    pub failed: u32,
}

/// Accessor for the flat upload directory
#[derive(Clone)]
pub struct AssetDirectory {
    root: PathBuf,
}

impl AssetDirectory {
    /// Open the directory, creating it if needed
    pub fn new(root: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every regular file in the namespace
    pub fn list_files(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read one file's bytes
    pub fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        validate_name(name)?;
        fs::read(self.root.join(name))
    }

    /// Create or overwrite one file
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        validate_name(name)?;
        fs::write(self.root.join(name), bytes)
    }

    /// Check whether a file exists in the namespace
    pub fn contains(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.root.join(name).is_file()
    }

    /// Delete every regular file, tolerating individual failures.
    /// A file the environment still holds open may refuse deletion; that is
    /// counted and logged, never fatal. Non-files are left alone.
    pub fn clear(&self) -> ClearOutcome {
        let mut outcome = ClearOutcome::default();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("[assets] Could not enumerate {}: {}", self.root.display(), e);
                return outcome;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => outcome.deleted += 1,
                Err(e) => {
                    outcome.failed += 1;
                    log::warn!("[assets] Could not delete {}: {}", path.display(), e);
                }
            }
        }

        outcome
    }
}

/// Reject names that would escape the flat namespace
fn validate_name(name: &str) -> io::Result<()> {
    let escapes = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if escapes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid asset name: {:?}", name),
        ));
    }
    Ok(())
}
