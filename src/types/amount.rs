//! Amount parsing for terminal input
//!
//! Parsing is a caller-level concern: the terminal turns text into an
//! `Amount` here, and the account only validates the numeric rules
//! (sign, multiple of 10, sufficiency).

use super::error::AtmError;

/// Signed amount as entered by the user
///
/// Kept signed so that `-10` reaches the account and is rejected as
/// non-positive rather than failing as unparsable text.
pub type Amount = i64;

/// Every deposit and withdrawal must be a multiple of this unit
pub const AMOUNT_UNIT: Amount = 10;

/// Parse an amount typed at the terminal
///
/// # Errors
///
/// Returns `AtmError::InvalidAmount` if the trimmed input is not an integer.
pub fn parse_amount(input: &str) -> Result<Amount, AtmError> {
    let trimmed = input.trim();
    trimmed
        .parse::<Amount>()
        .map_err(|_| AtmError::invalid_amount(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("50", 50)]
    #[case::whitespace(" 120\n", 120)]
    #[case::explicit_plus("+30", 30)]
    #[case::negative("-10", -10)]
    #[case::zero("0", 0)]
    fn test_parse_valid(#[case] input: &str, #[case] expected: Amount) {
        assert_eq!(parse_amount(input).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::letters("abc")]
    #[case::decimal("10.5")]
    #[case::currency_symbol("€10")]
    #[case::overflow("99999999999999999999999")]
    fn test_parse_invalid(#[case] input: &str) {
        let result = parse_amount(input);
        assert!(matches!(result, Err(AtmError::InvalidAmount { .. })));
    }
}
