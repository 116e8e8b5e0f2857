//! Swiss-style money formatting.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{CURRENCY, DISPLAY_DECIMAL_PRECISION};

/// Formats an amount the way Swiss banks print it: `CHF 45'750.85`.
///
/// Thousands are separated with an apostrophe and the amount is rounded
/// half away from zero to two decimals. Negative amounts keep a leading minus
/// after the currency code (`CHF -2'150.60`).
pub fn format_chf(amount: Decimal) -> String {
    format!("{} {}", CURRENCY, format_amount(amount))
}

/// Formats an amount without the currency code.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", rounded.abs());
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("{}{}.{}", sign, group_thousands(integer), fraction)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\'');
        }
        grouped.push(ch);
    }
    grouped
}
