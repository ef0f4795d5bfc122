//! Terminal configuration

use crate::types::Balance;
use tracing::warn;

/// Currency symbol shown before every amount
pub const DEFAULT_CURRENCY: &str = "€";

/// Configuration for an interactive terminal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Symbol prefixed to monetary amounts
    pub currency: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl TerminalConfig {
    /// Create a new TerminalConfig with a custom currency symbol
    ///
    /// A blank symbol falls back to the default with a warning.
    pub fn new(currency: &str) -> Self {
        let default = Self::default();

        let currency = if currency.trim().is_empty() {
            warn!(
                "Invalid currency symbol ({:?}), using default ({})",
                currency, default.currency
            );
            default.currency
        } else {
            currency.trim().to_string()
        };

        Self { currency }
    }

    /// Format an amount with the currency prefix, e.g. `€70`
    pub fn format_money(&self, amount: Balance) -> String {
        format!("{}{}", self.currency, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default() {
        let config = TerminalConfig::default();
        assert_eq!(config.currency, "€");
    }

    #[rstest]
    #[case::valid("$", "$")]
    #[case::trimmed(" £ ", "£")]
    #[case::multi_char("CHF ", "CHF")]
    #[case::blank_currency("  ", "€")]
    #[case::empty_currency("", "€")]
    fn test_new_validates(#[case] currency: &str, #[case] expected_currency: &str) {
        let config = TerminalConfig::new(currency);
        assert_eq!(config.currency, expected_currency);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(TerminalConfig::default().format_money(70), "€70");
        assert_eq!(TerminalConfig::new("$").format_money(0), "$0");
    }
}
