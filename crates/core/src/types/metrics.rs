//! Derived numeric metrics.
//!
//! Averages and percentages are computed from integer sums and counts with
//! decimal arithmetic, then rounded to two places with round-half-up
//! (midpoint away from zero). An empty denominator yields zero, never NaN.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on every derived metric.
pub const METRIC_SCALE: u32 = 2;

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(METRIC_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Mean of `count` values summing to `sum`, rounded to two places.
///
/// ```rust
/// # use customer_insights_core::average;
/// # use rust_decimal::Decimal;
/// assert_eq!(average(5, 2), Decimal::new(250, 2));
/// assert_eq!(average(0, 0), Decimal::ZERO);
/// ```
#[must_use]
pub fn average(sum: i64, count: i64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    round(Decimal::from(sum) / Decimal::from(count))
}

/// `part` as a percentage of `whole`, rounded to two places.
#[must_use]
pub fn percentage(part: i64, whole: i64) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    round(Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole))
}
