//! PIN type for the ATM terminal
//!
//! A `Pin` can only be constructed from exactly four ASCII digits, so an
//! `Account` can never hold a malformed secret. PINs are stored and compared
//! in plaintext.

use super::error::AtmError;
use std::fmt;
use std::str::FromStr;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// A validated 4-digit PIN
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Parse a PIN from user input or persisted data
    ///
    /// Surrounding whitespace is ignored. The remainder must be exactly
    /// four ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns `AtmError::InvalidPinFormat` if the input is not 4 digits.
    pub fn parse(input: &str) -> Result<Self, AtmError> {
        let trimmed = input.trim();
        if trimmed.len() != PIN_LENGTH || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AtmError::invalid_pin_format("PIN must be exactly 4 digits"));
        }
        Ok(Pin(trimmed.to_string()))
    }

    /// The PIN digits as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against a candidate entered at the terminal
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl FromStr for Pin {
    type Err = AtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pin::parse(s)
    }
}

// Keep the digits out of debug output and logs
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("1234", "1234")]
    #[case::leading_zeros("0007", "0007")]
    #[case::surrounding_whitespace("  4321\n", "4321")]
    fn test_parse_valid(#[case] input: &str, #[case] expected: &str) {
        let pin = Pin::parse(input).unwrap();
        assert_eq!(pin.as_str(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_short("123")]
    #[case::too_long("12345")]
    #[case::letters("12a4")]
    #[case::sign("+123")]
    #[case::inner_space("12 4")]
    #[case::non_ascii_digits("١٢٣٤")]
    fn test_parse_invalid(#[case] input: &str) {
        let result = Pin::parse(input);
        assert!(matches!(result, Err(AtmError::InvalidPinFormat { .. })));
    }

    #[test]
    fn test_matches_is_exact() {
        let pin = Pin::parse("1234").unwrap();
        assert!(pin.matches("1234"));
        assert!(!pin.matches("1235"));
        assert!(!pin.matches(" 1234"));
    }

    #[test]
    fn test_debug_hides_digits() {
        let pin: Pin = "9876".parse().unwrap();
        assert_eq!(format!("{:?}", pin), "Pin(****)");
    }
}
