//! Compiles a [`Condition`] into one branch-free expression.
//!
//! Every leaf becomes a mask worth `result` or `0`. Because all masks in one
//! tree share the same weight, `or` and `and` can be decided from the sum of
//! the two child masks alone:
//!
//! | left | right | sum  | `or` (clamp)   | `and` (truncate on `2r`, clamp) |
//! |------|-------|------|----------------|----------------------------------|
//! | 0    | 0     | 0    | 0              | 0                                |
//! | r    | 0     | r    | r              | 0                                |
//! | r    | r     | 2r   | r              | r                                |
//!
//! An else branch is the negated tree compiled with the else result, added
//! to the true branch.

use crate::algebra::{abs, neg_abs, zero_interval_rounding_fix};
use crate::condition::{BoolOp, CompareOp, Comparison, Condition};
use crate::error::{CondError, Result};
use crate::threshold::{
    value_above_threshold_to_result, value_below_threshold_to_result,
    value_below_threshold_to_result1_else_result2,
};

// ============================================================================
// Emitters
// ============================================================================

/// Mask for `left op right`: `result` when it holds, else `0`.
pub fn emit_compare(op: CompareOp, left: &str, right: &str, result: &str) -> String {
    let strict = op.is_strict();
    match op {
        CompareOp::Lt | CompareOp::Le => value_below_threshold_to_result(left, right, result, strict),
        CompareOp::Gt | CompareOp::Ge => value_above_threshold_to_result(left, right, result, strict),
    }
}

/// `result` when `left op right` holds, else `result_else`.
pub fn emit_compare_else(
    op: CompareOp,
    left: &str,
    right: &str,
    result: &str,
    result_else: &str,
) -> String {
    let strict = op.is_strict();
    match op {
        CompareOp::Lt | CompareOp::Le => {
            value_below_threshold_to_result1_else_result2(left, right, result, result_else, strict)
        }
        // l > r  <=>  r < l
        CompareOp::Gt | CompareOp::Ge => {
            value_below_threshold_to_result1_else_result2(right, left, result, result_else, strict)
        }
    }
}

/// Logical OR of two masks weighted by `result`.
pub fn emit_or(left: &str, right: &str, result: &str) -> String {
    format!(
        "clamp({}, {} + {}, {})",
        neg_abs(result),
        left,
        right,
        abs(result)
    )
}

/// Logical AND of two masks weighted by `result`.
///
/// The sum only survives truncation on a step of `2 * result` when both
/// masks are set.
pub fn emit_and(left: &str, right: &str, result: &str) -> String {
    format!(
        "clamp({}, round(to-zero, {} + {}, ({}) * 2 + {}), {})",
        neg_abs(result),
        left,
        right,
        result,
        zero_interval_rounding_fix(result),
        abs(result)
    )
}

fn emit(condition: &Condition, result: &str) -> String {
    match condition {
        Condition::Compare(c) => emit_compare(c.op, &c.left, &c.right, result),
        Condition::Logic(l, op, r) => {
            let left = emit(l, result);
            let right = emit(r, result);
            match op {
                BoolOp::Or => emit_or(&left, &right, result),
                BoolOp::And => emit_and(&left, &right, result),
            }
        }
    }
}

fn emit_else(condition: &Condition, result: &str, result_else: &str) -> String {
    match condition {
        Condition::Compare(c) => emit_compare_else(c.op, &c.left, &c.right, result, result_else),
        Condition::Logic(..) => format!(
            "calc({} + {})",
            emit(condition, result),
            emit(&condition.reverse(), result_else)
        ),
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// `result` if `condition` holds, else `0`.
pub fn compile(condition: &Condition, result: &str) -> String {
    log::trace!(
        "compiling `{}` (depth {}) to `{}`",
        condition,
        condition.depth(),
        result
    );
    emit(condition, result)
}

/// `result` if `condition` holds, else `result_else`.
pub fn compile_else(condition: &Condition, result: &str, result_else: &str) -> String {
    log::trace!(
        "compiling `{}` (depth {}) to `{}` else `{}`",
        condition,
        condition.depth(),
        result,
        result_else
    );
    emit_else(condition, result, result_else)
}

/// Output of [`Condition::compile_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    /// A single CSS math expression.
    Expr(String),
    /// The condition itself, returned uncompiled when no result was given
    /// and both children are compound. It is kept for a caller that embeds
    /// it in a larger tree and compiles that with a result later.
    Tree(Condition),
}

impl Compiled {
    pub fn expr(&self) -> Option<&str> {
        match self {
            Compiled::Expr(e) => Some(e),
            Compiled::Tree(_) => None,
        }
    }

    pub fn into_expr(self) -> Option<String> {
        match self {
            Compiled::Expr(e) => Some(e),
            Compiled::Tree(_) => None,
        }
    }
}

/// Results a condition maps to. Both are optional; see
/// [`Condition::compile_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub result: Option<String>,
    pub result_else: Option<String>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value produced when the condition holds.
    pub fn result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Value produced when the condition fails. Defaults to `0`.
    pub fn otherwise(mut self, result_else: impl Into<String>) -> Self {
        self.result_else = Some(result_else.into());
        self
    }
}

impl Comparison {
    /// The left operand if the comparison holds, else `0`.
    pub fn pass_through(&self) -> String {
        emit_compare(self.op, &self.left, &self.right, &self.left)
    }
}

impl Condition {
    /// Compiles with results taken from `options`.
    ///
    /// Without a result:
    /// - a leaf passes its left operand through;
    /// - a node whose children are both compound comes back as
    ///   [`Compiled::Tree`];
    /// - a node with a leaf child is [`CondError::MissingResult`], as it has
    ///   neither an operand to pass through nor a shape to keep.
    pub fn compile_with(&self, options: &CompileOptions) -> Result<Compiled> {
        let result = match (self, options.result.as_deref()) {
            (_, Some(result)) => result,
            (Condition::Compare(c), None) => {
                log::debug!("no result for `{}`, passing `{}` through", c, c.left);
                c.left.as_str()
            }
            (Condition::Logic(l, _, r), None) if !l.is_leaf() && !r.is_leaf() => {
                log::debug!("no result for `{}`, keeping the tree", self);
                return Ok(Compiled::Tree(self.clone()));
            }
            (Condition::Logic(..), None) => {
                return Err(CondError::MissingResult(self.to_string()));
            }
        };

        Ok(Compiled::Expr(match options.result_else.as_deref() {
            Some(result_else) => compile_else(self, result, result_else),
            None => compile(self, result),
        }))
    }
}
