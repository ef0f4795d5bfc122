//! Session state machine and PIN authentication
//!
//! A terminal moves through three states:
//!
//! ```text
//! Anonymous ──login──▶ Authenticating ──PIN ok──▶ Authenticated
//!     ▲                      │                          │
//!     └──── attempts used ───┘                          │
//!     └────────────────────── logout (store saved) ─────┘
//! ```

use crate::types::{Account, AtmError};

/// PIN attempts allowed per login
pub const MAX_PIN_ATTEMPTS: u32 = 3;

/// Where a terminal is in the login/logout cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is logged in; the main menu is shown
    Anonymous,

    /// A username was accepted and PIN attempts are being collected
    Authenticating(LoginAttempt),

    /// A user is logged in; the account menu is shown
    Authenticated { username: String },
}

impl SessionState {
    /// The user this state concerns, if any
    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticating(attempt) => Some(attempt.username()),
            SessionState::Authenticated { username } => Some(username),
        }
    }
}

/// Result of submitting one PIN candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The PIN matched
    Granted,
    /// The PIN did not match; `remaining` attempts are left
    Rejected { remaining: u32 },
    /// The PIN did not match and no attempts are left
    LockedOut,
}

/// PIN attempts for one login, at most [`MAX_PIN_ATTEMPTS`]
///
/// Submitting a candidate never touches the account: a failed login leaves
/// balance, PIN and history exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    username: String,
    attempts: u32,
}

impl LoginAttempt {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            attempts: 0,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Failed attempts so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Check `candidate` against `account`'s PIN
    pub fn submit(&mut self, account: &Account, candidate: &str) -> AttemptOutcome {
        if self.attempts >= MAX_PIN_ATTEMPTS {
            return AttemptOutcome::LockedOut;
        }
        if account.verify_secret(candidate) {
            return AttemptOutcome::Granted;
        }

        self.attempts += 1;
        if self.attempts >= MAX_PIN_ATTEMPTS {
            AttemptOutcome::LockedOut
        } else {
            AttemptOutcome::Rejected {
                remaining: MAX_PIN_ATTEMPTS - self.attempts,
            }
        }
    }

    /// The error describing a locked-out login
    pub fn into_error(self) -> AtmError {
        AtmError::auth_failed(&self.username, self.attempts)
    }
}
