use std::fmt;

/// Money is stored as integer cents to avoid floating-point drift.
/// Entered amounts are always non-negative; derived balances may go below zero.
pub type Cents = i64;

/// Format cents as a decimal string: 5000 -> "50.00", -90 -> "-0.90"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents.abs() / 100, cents.abs() % 100)
}

/// Parse a decimal amount into cents. Accepts "50", "50.5" and "50.00";
/// anything beyond two decimal places is rejected rather than rounded.
pub fn parse_cents(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    let (sign, digits) = match input.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, input),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((u, d)) => (u, d),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseAmountError);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseAmountError)?
    };

    let cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str.parse::<i64>().map_err(|_| ParseAmountError)? * 10,
        2 => decimal_str.parse().map_err(|_| ParseAmountError)?,
        _ => return Err(ParseAmountError),
    };

    Ok(sign * (units * 100 + cents))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAmountError;

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid money amount")
    }
}

impl std::error::Error for ParseAmountError {}
