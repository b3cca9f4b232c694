//! Conditionals, comparisons, and boolean logic as branch-free CSS math.
//!
//! CSS math functions have no comparison or boolean operator. This crate
//! emulates `if`/`else`, `and`, `or`, `<`, `<=`, `>`, `>=` and range tests
//! using only `+`, `-`, multiplication by constants, `min`, `max`, `clamp`
//! and `round`, so the browser's own evaluator picks the right value.
//!
//! Values are opaque text. They are never parsed, only embedded, sometimes
//! more than once, so they must be side-effect free.
//!
//! # Architecture
//!
//! ```text
//! algebra     abs, neg_abs, positive_difference_to_result
//!     │
//!     ▼
//! threshold   value above/below threshold -> result or 0, branch
//!     │
//!     ▼
//! range       value inside/outside [min(t1, t2), max(t1, t2)], branch
//!
//! condition   Comparison, Condition (and/or tree), De Morgan reverse
//!     │
//!     ▼
//! compile     Condition -> one expression, optional else branch
//! ```
//!
//! # Combinators
//!
//! | Function                                               | Evaluates to                      |
//! |--------------------------------------------------------|-----------------------------------|
//! | `value_above_threshold_to_result`                      | `r` if `v > t`, else `0`          |
//! | `value_below_threshold_to_result`                      | `r` if `v < t`, else `0`          |
//! | `value_below_threshold_to_result1_else_result2`        | `r1` if `v < t`, else `r2`        |
//! | `value_inside_range_to_result`                         | `r` if `lo < v < hi`, else `0`    |
//! | `value_outside_range_to_result`                        | `r` if `v < lo` or `v > hi`, else `0` |
//! | `value_inside_threshold_range_to_result1_else_result2` | `r1` if inside, else `r2`         |
//!
//! Every comparison takes a strictness flag; non-strict turns `<` into `<=`.
//!
//! # Examples
//!
//! ```
//! use rhizome_dew_css::value_below_threshold_to_result1_else_result2;
//!
//! // 1rem below 600px, 2rem from 600px up.
//! let size = value_below_threshold_to_result1_else_result2("100vw", "600px", "1rem", "2rem", true);
//! assert!(size.starts_with("calc("));
//! ```
//!
//! ```
//! use rhizome_dew_css::{compile_else, Comparison, Condition};
//!
//! let wide_and_tall = Condition::and(
//!     Comparison::ge("100vw", "800px"),
//!     Comparison::gt("100vh", "600px"),
//! );
//! let gap = compile_else(&wide_and_tall, "2rem", "0.5rem");
//! assert!(gap.contains("round(to-zero"));
//! ```
//!
//! # Resolution
//!
//! A strict comparison is decided by whether the difference moves `result`
//! at all. Differences too small for the evaluator to represent next to
//! `result` read as zero, so `a < b` can come out false for `a` a hair
//! below `b`.
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for conditions as nested 3-arrays |

pub mod algebra;
pub mod compile;
pub mod condition;
pub mod error;
pub mod range;
pub mod threshold;

#[cfg(test)]
mod calc_eval;

pub use algebra::{abs, neg_abs, positive_difference_to_result, RESOLUTION, ZERO};
pub use compile::{compile, compile_else, CompileOptions, Compiled};
pub use condition::{BoolOp, CompareOp, Comparison, Condition};
pub use error::{CondError, Result};
pub use range::{
    value_inside_range, value_inside_range_to_result,
    value_inside_threshold_range_to_result1_else_result2, value_outside_range,
    value_outside_range_to_result, RangeStrictness,
};
pub use threshold::{
    value_above_threshold, value_above_threshold_to_result, value_below_threshold,
    value_below_threshold_to_result, value_below_threshold_to_result1_else_result2,
};
