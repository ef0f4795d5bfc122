//! In-memory account storage
//!
//! Holds the rendered JSON document in memory instead of on disk. Used by
//! tests and benchmarks that need a store without touching the filesystem;
//! it goes through the same `json_format` code as the file storage.

use crate::core::{AccountMap, AccountStorage};
use crate::io::json_format::{parse_store, render_store};
use crate::types::AtmError;

const LOCATION: &str = "<memory>";

/// Storage that keeps the last saved document in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Option<String>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStorage {
    /// Empty storage, as on first run
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a JSON document
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    /// Storage whose saves always fail with an I/O error
    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// The last saved document, if any
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl AccountStorage for MemoryStorage {
    fn load(&self) -> Result<AccountMap, AtmError> {
        match &self.document {
            Some(document) => parse_store(document, LOCATION),
            None => Ok(AccountMap::new()),
        }
    }

    fn save(&mut self, accounts: &AccountMap) -> Result<(), AtmError> {
        if self.fail_saves {
            return Err(AtmError::IoError {
                message: "storage is read-only".to_string(),
            });
        }
        self.document = Some(render_store(accounts)?);
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        LOCATION.to_string()
    }
}
