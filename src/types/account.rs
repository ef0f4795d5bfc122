//! Account-related types for the ATM terminal
//!
//! This module defines the Account entity and the rules for mutating it.
//! Every mutation either succeeds completely (balance and history updated
//! together) or fails without touching the account.

use super::amount::{Amount, AMOUNT_UNIT};
use super::error::AtmError;
use super::history::{HistoryEntry, HistoryEvent, EMPTY_HISTORY_MESSAGE};
use super::pin::Pin;
use tracing::debug;

/// Account balance in whole currency units
///
/// Unsigned, so a negative balance is unrepresentable.
pub type Balance = u64;

/// Normalize a username for lookup and storage
///
/// Usernames are case-insensitive: they are trimmed and lowercased.
///
/// # Errors
///
/// Returns `AtmError::InvalidUsername` if nothing is left after trimming.
pub fn normalize_username(input: &str) -> Result<String, AtmError> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(AtmError::InvalidUsername);
    }
    Ok(normalized)
}

/// A user's identity, secret, balance and history
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Lowercase username, immutable after creation
    username: String,

    /// Plaintext 4-digit PIN
    pin: Pin,

    /// Current balance, always a multiple of 10
    balance: Balance,

    /// Append-only log; not persisted across restarts
    history: Vec<HistoryEntry>,
}

impl Account {
    /// Create a new account with zero balance and empty history
    ///
    /// `username` is expected to be normalized already.
    pub fn new(username: String, pin: Pin) -> Self {
        Account {
            username,
            pin,
            balance: 0,
            history: Vec::new(),
        }
    }

    /// Rebuild an account from persisted fields
    ///
    /// History always starts empty because it is not persisted.
    ///
    /// # Errors
    ///
    /// Returns `AtmError::InvalidAmount` if `balance` is not a multiple of 10.
    pub fn restore(username: String, pin: Pin, balance: Balance) -> Result<Self, AtmError> {
        if balance % AMOUNT_UNIT as Balance != 0 {
            return Err(AtmError::invalid_amount(balance));
        }
        Ok(Account {
            username,
            pin,
            balance,
            history: Vec::new(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Check a PIN candidate against the stored PIN (plain string equality)
    pub fn verify_secret(&self, candidate: &str) -> bool {
        self.pin.matches(candidate)
    }

    /// Withdraw funds from the account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is not a positive multiple of 10
    /// - `InsufficientFunds` if `amount` exceeds the balance
    pub fn withdraw(&mut self, amount: Amount) -> Result<Balance, AtmError> {
        let amount = validate_amount(amount)?;

        if amount > self.balance {
            return Err(AtmError::insufficient_funds(self.balance, amount));
        }

        self.balance -= amount;
        self.history
            .push(HistoryEntry::now(HistoryEvent::Withdrawal { amount }));
        debug!(username = %self.username, amount, balance = self.balance, "withdrawal");

        Ok(self.balance)
    }

    /// Deposit funds into the account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is not a positive multiple of 10
    /// - `ArithmeticOverflow` if the balance cannot hold the result
    pub fn deposit(&mut self, amount: Amount) -> Result<Balance, AtmError> {
        let amount = validate_amount(amount)?;

        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("deposit", &self.username))?;

        self.balance = new_balance;
        self.history
            .push(HistoryEntry::now(HistoryEvent::Deposit { amount }));
        debug!(username = %self.username, amount, balance = self.balance, "deposit");

        Ok(self.balance)
    }

    /// Replace the PIN
    ///
    /// The caller validates format and confirmation. The history entry
    /// records that a change happened, never the PIN itself.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPinFormat` if `new_pin` equals the current PIN.
    pub fn change_secret(&mut self, new_pin: Pin) -> Result<(), AtmError> {
        if new_pin == self.pin {
            return Err(AtmError::invalid_pin_format(
                "new PIN must differ from the current PIN",
            ));
        }

        self.pin = new_pin;
        self.history.push(HistoryEntry::now(HistoryEvent::PinChange));
        debug!(username = %self.username, "PIN changed");

        Ok(())
    }

    /// History entries in insertion order
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// History rendered one entry per line, or the empty-state message
    pub fn history_report(&self, currency: &str) -> String {
        if self.history.is_empty() {
            return EMPTY_HISTORY_MESSAGE.to_string();
        }
        self.history
            .iter()
            .map(|entry| entry.describe(currency))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Check the numeric rules shared by deposit and withdrawal
fn validate_amount(amount: Amount) -> Result<Balance, AtmError> {
    if amount <= 0 || amount % AMOUNT_UNIT != 0 {
        return Err(AtmError::invalid_amount(amount));
    }
    Ok(amount as Balance)
}
