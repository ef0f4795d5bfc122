//! I/O module
//!
//! Handles persistence of the account store.
//!
//! # Components
//!
//! - `json_format` - Data file format handling (parsing, validation, rendering)
//! - `file_storage` - JSON file storage with an exclusive process lock
//! - `memory_storage` - In-memory storage for tests and benchmarks

pub mod file_storage;
pub mod json_format;
pub mod memory_storage;

pub use file_storage::JsonFileStorage;
pub use json_format::{parse_store, render_store, PersistedAccount, StoreDocument};
pub use memory_storage::MemoryStorage;
