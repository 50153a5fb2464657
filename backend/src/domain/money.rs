//! Money rounding and currency formatting.
//!
//! Costs travel as `f64` across the API, but rounding happens on the decimal
//! value the user typed so that `12.345` becomes `12.35` rather than the
//! `12.34` that binary floating point would produce.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

pub const CURRENCY_SYMBOL: &str = "$";

/// Round an amount to two decimal places, half away from zero.
///
/// Values that cannot be represented as a `Decimal` (non-finite or out of
/// range) are returned unchanged and left for the shape check to judge.
pub fn round_to_cents(amount: f64) -> f64 {
    match to_decimal(amount) {
        Some(decimal) => decimal
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(amount),
        None => amount,
    }
}

/// Exact decimal value of an amount, `None` outside the `Decimal` range
pub fn to_decimal(amount: f64) -> Option<Decimal> {
    if !amount.is_finite() {
        return None;
    }

    // Display gives the shortest string that round-trips, i.e. what was typed
    Decimal::from_str(&amount.to_string()).ok()
}

/// Sum amounts and round to cents, saturating at the `Decimal` bounds.
///
/// The result is always finite, however large the inputs. NaN is skipped.
pub fn sum_to_cents<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let total = amounts
        .into_iter()
        .filter(|amount| !amount.is_nan())
        .fold(Decimal::ZERO, |acc, amount| {
            let value = to_decimal(amount).unwrap_or_else(|| saturated(amount));
            acc.checked_add(value).unwrap_or_else(|| saturated(amount))
        });

    total
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

fn saturated(amount: f64) -> Decimal {
    if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Whether an amount already has at most two decimal places
pub fn is_whole_cents(amount: f64) -> bool {
    amount.is_finite() && round_to_cents(amount) == amount
}

/// Format an amount as currency with two decimals, e.g. `$35.00`
pub fn format_currency(amount: f64) -> String {
    let rounded = round_to_cents(amount.abs());
    if amount < 0.0 {
        format!("-{}{:.2}", CURRENCY_SYMBOL, rounded)
    } else {
        format!("{}{:.2}", CURRENCY_SYMBOL, rounded)
    }
}
