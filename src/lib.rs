//! ATM Terminal Library
//! # Overview
//!
//! This library provides a single-user simulated teller terminal: accounts are
//! kept in a JSON data file and an interactive session lets a user log in,
//! deposit, withdraw, change their PIN and review their history.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Pin, history events, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Account store and the storage abstraction behind it
//! - [`io`] - Data file format and storage implementations
//! - [`session`] - Login state machine, menus and the interactive terminal
//!
//! # Account Rules
//!
//! - Deposits and withdrawals must be positive multiples of 10
//! - A withdrawal may not exceed the balance, so the balance never goes negative
//! - PINs are exactly 4 digits and are stored in plaintext
//! - Usernames are case-insensitive and unique
//!
//! # Persistence
//!
//! Only the username, PIN and balance are persisted. History lives for the
//! lifetime of the process and starts empty after every restart.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod session;
pub mod types;

pub use crate::core::{AccountMap, AccountStorage, AccountStore};
pub use io::{JsonFileStorage, MemoryStorage};
pub use session::{run_session, Terminal, TerminalConfig};
pub use types::{
    normalize_username, parse_amount, Account, Amount, AtmError, Balance, HistoryEntry,
    HistoryEvent, Pin,
};
