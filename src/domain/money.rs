use std::fmt;

/// Format an amount for display with two decimal places.
/// Example: 42.5 -> "42.50", 7.0 -> "7.00"
///
/// Only presentation rounds; stored amounts keep their full precision.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into an amount.
/// Example: "42.50" -> 42.5, "7" -> 7.0, ".5" -> 0.5
///
/// Rejects anything that is not a finite number. Sign is accepted here;
/// whether a non-positive amount is allowed is a business rule enforced
/// when the expense is recorded.
pub fn parse_amount(input: &str) -> Result<f64, ParseAmountError> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !amount.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
