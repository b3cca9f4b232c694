//! Single-threshold masks and the two-way branch built from them.
//!
//! ```text
//!   below                 above
//!   r  <- v    t          t    v  ->  r
//!   - - - - - -|          |- - - - - - -
//! ```

use crate::algebra::positive_difference_to_result;

/// `result` if `value > threshold` (`>=` when not `strict`), else `0`.
pub fn value_above_threshold_to_result(
    value: &str,
    threshold: &str,
    result: &str,
    strict: bool,
) -> String {
    let difference = format!("{} - ({})", value, threshold);
    positive_difference_to_result(&difference, result, strict)
}

/// `result` if `value < threshold` (`<=` when not `strict`), else `0`.
pub fn value_below_threshold_to_result(
    value: &str,
    threshold: &str,
    result: &str,
    strict: bool,
) -> String {
    let difference = format!("{} - ({})", threshold, value);
    positive_difference_to_result(&difference, result, strict)
}

/// `value` itself if above `threshold`, else `0`.
pub fn value_above_threshold(value: &str, threshold: &str, strict: bool) -> String {
    value_above_threshold_to_result(value, threshold, value, strict)
}

/// `value` itself if below `threshold`, else `0`.
pub fn value_below_threshold(value: &str, threshold: &str, strict: bool) -> String {
    value_below_threshold_to_result(value, threshold, value, strict)
}

/// `result1` if `value < threshold` (`<=` when not `strict`), else `result2`.
///
/// The else side is the above-mask with the opposite strictness, so for any
/// `value` exactly one of the two masks is non-zero.
pub fn value_below_threshold_to_result1_else_result2(
    value: &str,
    threshold: &str,
    result1: &str,
    result2: &str,
    strict: bool,
) -> String {
    format!(
        "calc({} + {})",
        value_below_threshold_to_result(value, threshold, result1, strict),
        value_above_threshold_to_result(value, threshold, result2, !strict)
    )
}
