//! Algebra primitives every mask is built from.
//!
//! The target grammar has `min`, `max`, `clamp` and `round` but no comparison,
//! so "is this difference positive" has to be answered by squeezing the
//! difference into a bounded distance and snapping it onto one of two values.

/// Emitted additive identity.
pub const ZERO: &str = "0px";

/// Smallest increment the evaluator resolves for lengths.
pub const RESOLUTION: &str = "1px";

/// `|value|` as `max(v, -v)`.
pub fn abs(value: &str) -> String {
    format!("max({}, ({}) * -1)", value, value)
}

/// `-|value|` as `min(v, -v)`.
pub fn neg_abs(value: &str) -> String {
    format!("min({}, ({}) * -1)", value, value)
}

/// Offset added to a rounding step sized to `result`.
///
/// Evaluates to `-1px` when `result` is zero and to `0px` otherwise, so a
/// step of `result + fix` is never zero.
pub fn zero_interval_rounding_fix(result: &str) -> String {
    format!(
        "clamp(-{res}, round(up, {}, {res}) - {res}, {ZERO})",
        abs(result),
        res = RESOLUTION
    )
}

/// Maps a difference onto `result` or `0`.
///
/// Evaluates to `result` when `difference > 0` (`strict`) or
/// `difference >= 0` (non-strict), and to `0` otherwise.
///
/// The difference is clamped into `[0, |result|]`, `result` is moved toward
/// zero by that distance, and the moved value is truncated on a step of
/// `result`: only an untouched `result` survives the truncation.
///
/// The exact-zero boundary is resolved at the evaluator's precision. A
/// difference too small to move `result` at all reads as zero.
pub fn positive_difference_to_result(difference: &str, result: &str, strict: bool) -> String {
    if !strict {
        let flipped = format!("({}) * -1", difference);
        return format!(
            "calc({} - {})",
            result,
            positive_difference_to_result(&flipped, result, true)
        );
    }

    let fix = zero_interval_rounding_fix(result);
    let distance = format!("clamp({ZERO}, {}, {})", difference, abs(result));
    let moved = format!(
        "max({ZERO}, {r} - {d}) + min({ZERO}, {r} + {d})",
        r = result,
        d = distance
    );

    format!(
        "calc(round(to-zero, {}, {} + {}) * -1 + {})",
        moved, result, fix, result
    )
}
