//! Display helpers for amounts quoted to Belgian customers.

use rust_decimal::{Decimal, RoundingStrategy};

const GROUP_SEPARATOR: char = '\u{202f}';
const CURRENCY_SEPARATOR: char = '\u{a0}';

/// Format an amount the way the client area shows euros (`1 234,56 €`).
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (units, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped},{cents}{CURRENCY_SEPARATOR}€")
}

/// Two-decimal percentage, e.g. `23.99%`.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}%")
}
