//! Error types for the ATM terminal
//!
//! This module defines all error types that can occur while operating the terminal.
//! Errors are designed to be descriptive and user-friendly for terminal output.
//!
//! # Error Categories
//!
//! - **Input Errors**: Unparsable amounts, malformed PINs, unknown menu options
//! - **Account Errors**: Insufficient funds, duplicate or unknown users, failed logins
//! - **Storage Errors**: Corrupt data file, lock held by another process, I/O failures

use super::account::Balance;
use thiserror::Error;

/// Main error type for the ATM terminal
///
/// Only `CorruptData`, `StoreLocked` and `IoError` are fatal; every other
/// variant is recovered by the session controller and shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// Amount is not a positive multiple of 10, or could not be parsed
    #[error("Invalid amount '{input}': amount must be a positive multiple of 10")]
    InvalidAmount {
        /// The rejected amount as entered
        input: String,
    },

    /// Withdrawal exceeds the current balance
    ///
    /// The account state remains unchanged.
    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Current balance
        available: Balance,
        /// Requested withdrawal amount
        requested: Balance,
    },

    /// PIN is not exactly 4 digits (or repeats the current PIN on change)
    #[error("Invalid PIN: {reason}")]
    InvalidPinFormat {
        /// Why the PIN was rejected
        reason: String,
    },

    /// PIN confirmation did not match the new PIN
    #[error("PIN mismatch")]
    PinMismatch,

    /// Username is empty after normalization
    #[error("Invalid username: username must not be empty")]
    InvalidUsername,

    /// Username already present in the store
    #[error("Username '{username}' already exists")]
    DuplicateUser {
        /// The normalized username
        username: String,
    },

    /// Username not present in the store
    #[error("User '{username}' not found")]
    UserNotFound {
        /// The normalized username
        username: String,
    },

    /// All PIN attempts were used up during login
    #[error("Authentication failed for '{username}' after {attempts} attempts")]
    AuthFailed {
        /// The username that failed to authenticate
        username: String,
        /// Number of attempts made
        attempts: u32,
    },

    /// Menu selection that does not name an option
    #[error("Invalid option '{input}'")]
    InvalidOption {
        /// The rejected selection
        input: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for '{username}'")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account the operation targeted
        username: String,
    },

    /// The persisted store could not be parsed
    ///
    /// Fatal at startup; the file is left untouched.
    #[error("Corrupt data in {path}: {message}")]
    CorruptData {
        /// Path of the data file
        path: String,
        /// Description of the problem
        message: String,
    },

    /// Another process holds the store lock
    #[error("Data file {path} is in use by another terminal")]
    StoreLocked {
        /// Path of the data file
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to AtmError
impl From<std::io::Error> for AtmError {
    fn from(error: std::io::Error) -> Self {
        AtmError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl AtmError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(input: impl ToString) -> Self {
        AtmError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: Balance, requested: Balance) -> Self {
        AtmError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create an InvalidPinFormat error
    pub fn invalid_pin_format(reason: &str) -> Self {
        AtmError::InvalidPinFormat {
            reason: reason.to_string(),
        }
    }

    /// Create a DuplicateUser error
    pub fn duplicate_user(username: &str) -> Self {
        AtmError::DuplicateUser {
            username: username.to_string(),
        }
    }

    /// Create a UserNotFound error
    pub fn user_not_found(username: &str) -> Self {
        AtmError::UserNotFound {
            username: username.to_string(),
        }
    }

    /// Create an AuthFailed error
    pub fn auth_failed(username: &str, attempts: u32) -> Self {
        AtmError::AuthFailed {
            username: username.to_string(),
            attempts,
        }
    }

    /// Create an InvalidOption error
    pub fn invalid_option(input: &str) -> Self {
        AtmError::InvalidOption {
            input: input.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, username: &str) -> Self {
        AtmError::ArithmeticOverflow {
            operation: operation.to_string(),
            username: username.to_string(),
        }
    }

    /// Create a CorruptData error
    pub fn corrupt_data(path: &str, message: impl ToString) -> Self {
        AtmError::CorruptData {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a StoreLocked error
    pub fn store_locked(path: &str) -> Self {
        AtmError::StoreLocked {
            path: path.to_string(),
        }
    }

    /// Whether the error should abort the process rather than be shown to the user
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AtmError::CorruptData { .. } | AtmError::StoreLocked { .. } | AtmError::IoError { .. }
        )
    }
}
