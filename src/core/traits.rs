//! Core traits for account persistence
//!
//! This module defines the storage abstraction that lets the account store
//! be backed by a JSON file in production and by memory in tests.

use crate::types::{Account, AtmError};
use std::collections::BTreeMap;

/// Accounts keyed by normalized username
///
/// A `BTreeMap` keeps the persisted document in a stable, sorted order.
pub type AccountMap = BTreeMap<String, Account>;

/// Trait for loading and saving the full set of accounts
///
/// The store is always read and written wholesale; there are no partial
/// updates.
pub trait AccountStorage {
    /// Load every persisted account
    ///
    /// Returns an empty map when nothing has been persisted yet.
    fn load(&self) -> Result<AccountMap, AtmError>;

    /// Replace the persisted data with `accounts`
    fn save(&mut self, accounts: &AccountMap) -> Result<(), AtmError>;

    /// Human-readable location of the data, for logs and diagnostics
    fn location(&self) -> String;
}
