//! JSON format handling for the persisted account store
//!
//! This module centralizes all data file format concerns, providing:
//! - PersistedAccount structure for (de)serialization
//! - Conversion from the document to domain accounts, with validation
//! - Rendering of accounts back into the document
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Format
//!
//! ```json
//! {
//!     "alice": {
//!         "pin": "1234",
//!         "balance": 70
//!     }
//! }
//! ```
//!
//! Only the PIN and balance are stored. History is not part of the schema.

use crate::core::AccountMap;
use crate::types::{normalize_username, Account, AtmError, Balance, Pin};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;

/// Indentation used when writing the data file
const INDENT: &[u8] = b"    ";

/// One account as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAccount {
    pub pin: String,
    pub balance: Balance,
}

/// The whole data file: username to persisted account
pub type StoreDocument = BTreeMap<String, PersistedAccount>;

/// Parse the contents of a data file into accounts
///
/// An empty (or whitespace-only) document is an empty store.
///
/// # Arguments
///
/// * `content` - The raw file contents
/// * `origin` - Where the contents came from, used in error messages
///
/// # Errors
///
/// Returns `AtmError::CorruptData` if:
/// - The content is not a JSON object of `{pin, balance}` records
/// - A balance is negative, fractional or not a multiple of 10
/// - A PIN is not exactly 4 digits
/// - A username is blank or two usernames collide once lowercased
pub fn parse_store(content: &str, origin: &str) -> Result<AccountMap, AtmError> {
    if content.trim().is_empty() {
        return Ok(AccountMap::new());
    }

    let document: StoreDocument =
        serde_json::from_str(content).map_err(|e| AtmError::corrupt_data(origin, e))?;

    let mut accounts = AccountMap::new();
    for (key, record) in document {
        let username = normalize_username(&key)
            .map_err(|_| AtmError::corrupt_data(origin, "blank username"))?;

        let pin = Pin::parse(&record.pin).map_err(|_| {
            AtmError::corrupt_data(origin, format!("invalid PIN for user '{}'", username))
        })?;

        let account = Account::restore(username.clone(), pin, record.balance).map_err(|_| {
            AtmError::corrupt_data(
                origin,
                format!(
                    "balance {} for user '{}' is not a multiple of 10",
                    record.balance, username
                ),
            )
        })?;

        if accounts.insert(username.clone(), account).is_some() {
            return Err(AtmError::corrupt_data(
                origin,
                format!("duplicate user '{}'", username),
            ));
        }
    }

    Ok(accounts)
}

/// Render accounts as the pretty-printed data file document
pub fn render_store(accounts: &AccountMap) -> Result<String, AtmError> {
    let document: StoreDocument = accounts
        .iter()
        .map(|(username, account)| {
            (
                username.clone(),
                PersistedAccount {
                    pin: account.pin().as_str().to_string(),
                    balance: account.balance(),
                },
            )
        })
        .collect();

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    document
        .serialize(&mut serializer)
        .map_err(|e| AtmError::IoError {
            message: e.to_string(),
        })?;

    String::from_utf8(buffer).map_err(|e| AtmError::IoError {
        message: e.to_string(),
    })
}
