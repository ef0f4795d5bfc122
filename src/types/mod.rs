//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The Account entity and its mutation rules
//! - `amount`: Amount parsing for terminal input
//! - `history`: Tagged, timestamped history events
//! - `pin`: The validated PIN type
//! - `error`: Error types for the terminal

pub mod account;
pub mod amount;
pub mod error;
pub mod history;
pub mod pin;

pub use account::{normalize_username, Account, Balance};
pub use amount::{parse_amount, Amount, AMOUNT_UNIT};
pub use error::AtmError;
pub use history::{HistoryEntry, HistoryEvent, EMPTY_HISTORY_MESSAGE};
pub use pin::{Pin, PIN_LENGTH};
