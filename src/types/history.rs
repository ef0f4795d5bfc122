//! Account history types
//!
//! History is an append-only log of tagged events. Each entry records what
//! happened and when; entries are rendered as text only for display.

use super::account::Balance;
use chrono::{DateTime, Local};

/// Timestamp layout used when rendering history entries
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message shown when an account has no history
pub const EMPTY_HISTORY_MESSAGE: &str = "No transactions found.";

/// Kind of balance- or security-affecting action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    /// Funds credited to the account
    Deposit { amount: Balance },

    /// Funds debited from the account
    Withdrawal { amount: Balance },

    /// The PIN was replaced. The new value is deliberately not recorded.
    PinChange,
}

/// One immutable, timestamped history record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub event: HistoryEvent,
    pub at: DateTime<Local>,
}

impl HistoryEntry {
    /// Create an entry stamped with the current local time
    pub fn now(event: HistoryEvent) -> Self {
        Self {
            event,
            at: Local::now(),
        }
    }

    /// Render the entry as a human-readable line
    ///
    /// `currency` is prefixed to monetary amounts, e.g. `Deposited €50 on ...`.
    pub fn describe(&self, currency: &str) -> String {
        let at = self.at.format(TIMESTAMP_FORMAT);
        match self.event {
            HistoryEvent::Deposit { amount } => format!("Deposited {currency}{amount} on {at}"),
            HistoryEvent::Withdrawal { amount } => format!("Withdrew {currency}{amount} on {at}"),
            HistoryEvent::PinChange => format!("Changed PIN on {at}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[rstest]
    #[case::deposit(HistoryEvent::Deposit { amount: 50 }, "€", "Deposited €50 on 2024-03-09 14:05:07")]
    #[case::withdrawal(HistoryEvent::Withdrawal { amount: 120 }, "$", "Withdrew $120 on 2024-03-09 14:05:07")]
    #[case::pin_change(HistoryEvent::PinChange, "€", "Changed PIN on 2024-03-09 14:05:07")]
    fn test_describe(#[case] event: HistoryEvent, #[case] currency: &str, #[case] expected: &str) {
        let entry = HistoryEntry {
            event,
            at: fixed_time(),
        };
        assert_eq!(entry.describe(currency), expected);
    }
}
