//! Display formatting for money and backend timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use rust_decimal::{Decimal, RoundingStrategy};
use time::macros::format_description;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::net::types::Transaction;

pub const CURRENCY_SYMBOL: &str = "₦";

/// `₦1,234.50`: thousands separators and exactly two decimals, halves
/// rounded away from zero.
#[must_use]
pub fn naira(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}{CURRENCY_SYMBOL}{}.{cents}", group_thousands(whole))
}

/// Signed amount for a history row: `+` for deposits, `-` for everything else.
#[must_use]
pub fn transaction_amount(transaction: &Transaction) -> String {
    let sign = if transaction.kind.is_outgoing() { '-' } else { '+' };
    format!("{sign}{}", naira(transaction.amount.abs()))
}

/// `Mar 5, 2024 14:07`. Accepts RFC 3339 or a naive ISO-8601 timestamp;
/// anything else is returned unchanged.
#[must_use]
pub fn timestamp(raw: &str) -> String {
    let display = format_description!("[month repr:short] [day padding:none], [year] [hour]:[minute]");
    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");

    let formatted = if let Ok(at) = OffsetDateTime::parse(raw.trim(), &Rfc3339) {
        at.format(display)
    } else if let Ok(at) = PrimitiveDateTime::parse(raw.trim(), naive) {
        at.format(display)
    } else {
        return raw.to_owned();
    };
    formatted.unwrap_or_else(|_| raw.to_owned())
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
