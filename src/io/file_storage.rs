//! File-backed account storage
//!
//! Persists the account store as a JSON document on disk.
//!
//! # Design
//!
//! - `open()` takes an exclusive advisory lock on a sibling `<file>.lock` and
//!   holds it until the storage is dropped, so two terminals cannot share a
//!   data file.
//! - `load()` treats a missing file as a fresh, empty store.
//! - `save()` rewrites the whole document: it writes `<file>.tmp` and renames
//!   it over the data file. A failed save removes the temporary file.
//!
//! Format concerns are delegated to the `json_format` module.

use crate::core::{AccountMap, AccountStorage};
use crate::io::json_format::{parse_store, render_store};
use crate::types::AtmError;
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON file storage with an exclusive process lock
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    // Dropping the handle releases the lock
    _lock: File,
}

impl JsonFileStorage {
    /// Open storage for the data file at `path`
    ///
    /// The data file itself does not need to exist yet; its parent
    /// directory does.
    ///
    /// # Errors
    ///
    /// - `StoreLocked` if another process (or another storage in this
    ///   process) holds the lock
    /// - `IoError` if the lock file cannot be created or locking itself fails
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AtmError> {
        let path = path.into();
        let lock_path = sibling(&path, ".lock");

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| AtmError::IoError {
                message: format!("Failed to open lock file '{}': {}", lock_path.display(), e),
            })?;

        lock.try_lock_exclusive().map_err(|e| lock_error(&path, e))?;

        debug!(path = %path.display(), "data file lock acquired");
        Ok(Self { path, _lock: lock })
    }

    /// Path of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountStorage for JsonFileStorage {
    fn load(&self) -> Result<AccountMap, AtmError> {
        let origin = self.location();
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %origin, "no data file yet, starting with an empty store");
                return Ok(AccountMap::new());
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(AtmError::corrupt_data(&origin, e));
            }
            Err(e) => return Err(e.into()),
        };

        parse_store(&content, &origin)
    }

    fn save(&mut self, accounts: &AccountMap) -> Result<(), AtmError> {
        let document = render_store(accounts)?;
        let tmp_path = sibling(&self.path, ".tmp");

        if let Err(e) = replace_file(&tmp_path, &self.path, document.as_bytes()) {
            // Best effort: the temp file may not exist
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), bytes = document.len(), "data file written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write `bytes` to `tmp_path`, sync it and rename it over `path`
fn replace_file(tmp_path: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp_path, path)
}

/// Only contention means another terminal; anything else is an I/O failure
fn lock_error(path: &Path, e: io::Error) -> AtmError {
    let contended = fs2::lock_contended_error().raw_os_error();
    if e.raw_os_error().is_some() && e.raw_os_error() == contended {
        AtmError::store_locked(&path.display().to_string())
    } else {
        AtmError::IoError {
            message: format!("Failed to lock data file '{}': {}", path.display(), e),
        }
    }
}

/// `path` with `suffix` appended to its file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
