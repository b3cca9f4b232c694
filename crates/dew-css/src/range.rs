//! Two-threshold masks: inside and outside a range.
//!
//! Threshold order never matters; the range is always
//! `[min(t1, t2), max(t1, t2)]`.
//!
//! ```text
//!   inside                 outside
//!        v ->  r           r  <- v
//!   |- - - - - - -|     - - -|       |- - - -
//!   t             t          t       t
//! ```

use std::ops::Not;

use crate::algebra::{abs, neg_abs, ZERO};
use crate::threshold::{value_above_threshold_to_result, value_below_threshold_to_result};

/// Strictness at each end of a range, lower bound first.
///
/// For an inside test `low` is the "above the lower bound" flag and `high`
/// the "below the upper bound" flag. For an outside test `low` is "below the
/// lower bound" and `high` is "above the upper bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeStrictness {
    pub low: bool,
    pub high: bool,
}

impl RangeStrictness {
    pub const STRICT: Self = Self {
        low: true,
        high: true,
    };

    pub const INCLUSIVE: Self = Self {
        low: false,
        high: false,
    };

    pub fn new(low: bool, high: bool) -> Self {
        Self { low, high }
    }
}

impl Default for RangeStrictness {
    fn default() -> Self {
        Self::STRICT
    }
}

impl From<bool> for RangeStrictness {
    fn from(strict: bool) -> Self {
        Self::new(strict, strict)
    }
}

impl From<(bool, bool)> for RangeStrictness {
    fn from((low, high): (bool, bool)) -> Self {
        Self::new(low, high)
    }
}

/// Flips both flags. An inside test with `s` and an outside test with `!s`
/// partition the real line.
impl Not for RangeStrictness {
    type Output = Self;

    fn not(self) -> Self {
        Self::new(!self.low, !self.high)
    }
}

fn low_bound(threshold1: &str, threshold2: &str) -> String {
    format!("min({}, {})", threshold1, threshold2)
}

fn high_bound(threshold1: &str, threshold2: &str) -> String {
    format!("max({}, {})", threshold1, threshold2)
}

/// `result` if `value` lies inside the range, else `0`.
///
/// Built as `above(low) - above(high)`, clamped between `0` and `result`.
/// The clamp is required: when both bounds coincide and both are strict,
/// `value == t1 == t2` fails `above(low)` but passes the non-strict
/// `above(high)`, so the plain difference is `-result` rather than `0`.
/// Dropping the clamp breaks the complement with
/// [`value_outside_range_to_result`] for that range.
pub fn value_inside_range_to_result(
    value: &str,
    threshold1: &str,
    threshold2: &str,
    result: &str,
    strict: impl Into<RangeStrictness>,
) -> String {
    let strict = strict.into();
    let above_low = value_above_threshold_to_result(
        value,
        &low_bound(threshold1, threshold2),
        result,
        strict.low,
    );
    let above_high = value_above_threshold_to_result(
        value,
        &high_bound(threshold1, threshold2),
        result,
        !strict.high,
    );

    format!(
        "clamp(min({ZERO}, {r}), calc({} - {}), max({ZERO}, {r}))",
        above_low,
        above_high,
        r = result
    )
}

/// `result` if `value` lies outside the range, else `0`.
///
/// Both one-sided masks are summed and clamped to `|result|`.
pub fn value_outside_range_to_result(
    value: &str,
    threshold1: &str,
    threshold2: &str,
    result: &str,
    strict: impl Into<RangeStrictness>,
) -> String {
    let strict = strict.into();
    let below_low = value_below_threshold_to_result(
        value,
        &low_bound(threshold1, threshold2),
        result,
        strict.low,
    );
    let above_high = value_above_threshold_to_result(
        value,
        &high_bound(threshold1, threshold2),
        result,
        strict.high,
    );

    format!(
        "clamp({}, {} + {}, {})",
        neg_abs(result),
        below_low,
        above_high,
        abs(result)
    )
}

/// `value` itself if inside the range, else `0`.
pub fn value_inside_range(
    value: &str,
    threshold1: &str,
    threshold2: &str,
    strict: impl Into<RangeStrictness>,
) -> String {
    value_inside_range_to_result(value, threshold1, threshold2, value, strict)
}

/// `value` itself if outside the range, else `0`.
pub fn value_outside_range(
    value: &str,
    threshold1: &str,
    threshold2: &str,
    strict: impl Into<RangeStrictness>,
) -> String {
    value_outside_range_to_result(value, threshold1, threshold2, value, strict)
}

/// `result1` if `value` lies inside the range, else `result2`.
///
/// `strict` applies to the inside test; the outside mask takes the
/// complementary flags.
pub fn value_inside_threshold_range_to_result1_else_result2(
    value: &str,
    threshold1: &str,
    threshold2: &str,
    result1: &str,
    result2: &str,
    strict: impl Into<RangeStrictness>,
) -> String {
    let strict = strict.into();
    format!(
        "calc({} + {})",
        value_inside_range_to_result(value, threshold1, threshold2, result1, strict),
        value_outside_range_to_result(value, threshold1, threshold2, result2, !strict)
    )
}
