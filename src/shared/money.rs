//! Currency helpers.
//!
//! Amounts are carried as unrounded `Decimal`s through price resolution and
//! aggregation; rounding to the smallest currency unit happens only here, at
//! the point an amount is totalled or shown.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits of the smallest currency unit (cents).
pub const CURRENCY_DECIMALS: u32 = 2;

/// Round to the smallest currency unit, half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount
        .round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Format an amount the way the storefront shows it: `Rs.2,400` / `Rs.1,234.5`.
pub fn format_rupees(amount: Decimal) -> String {
    format!("Rs.{}", group_thousands(round_currency(amount).to_string()))
}

/// Trims trailing zeros, adds thousands separators.
fn group_thousands(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
