//! Condition trees: comparisons joined by `and`/`or`.
//!
//! Building a tree never compiles it. Use [`Condition::and`] and
//! [`Condition::or`] to assemble deeper trees, then hand the root to
//! [`crate::compile()`] or [`crate::compile_else()`].

use std::fmt;
use std::ops::Not;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CondError;

// ============================================================================
// Operators
// ============================================================================

/// Order relation tested by a [`Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// The logical complement: `<` and `>=` swap, `>` and `<=` swap.
    pub fn reverse(self) -> Self {
        match self {
            CompareOp::Lt => CompareOp::Ge,
            CompareOp::Gt => CompareOp::Le,
            CompareOp::Le => CompareOp::Gt,
            CompareOp::Ge => CompareOp::Lt,
        }
    }

    /// Whether equality fails the comparison.
    pub fn is_strict(self) -> bool {
        matches!(self, CompareOp::Lt | CompareOp::Gt)
    }

    /// Word form used in serialized conditions.
    pub fn name(self) -> &'static str {
        match self {
            CompareOp::Lt => "less",
            CompareOp::Gt => "more",
            CompareOp::Le => "lessEquals",
            CompareOp::Ge => "moreEquals",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CompareOp {
    type Err = CondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" | "less" => Ok(CompareOp::Lt),
            ">" | "more" => Ok(CompareOp::Gt),
            "<=" | "≤" | "lessEquals" => Ok(CompareOp::Le),
            ">=" | "≥" | "moreEquals" => Ok(CompareOp::Ge),
            other => Err(CondError::UnknownOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for CompareOp {
    type Error = CondError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CompareOp> for String {
    fn from(op: CompareOp) -> Self {
        op.name().to_string()
    }
}

/// Connective joining two conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    /// De Morgan dual: `and` becomes `or` and back.
    pub fn dual(self) -> Self {
        match self {
            BoolOp::And => BoolOp::Or,
            BoolOp::Or => BoolOp::And,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoolOp {
    type Err = CondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("and") || s == "&&" {
            Ok(BoolOp::And)
        } else if s.eq_ignore_ascii_case("or") || s == "||" {
            Ok(BoolOp::Or)
        } else {
            Err(CondError::UnknownConnective(s.to_string()))
        }
    }
}

impl TryFrom<String> for BoolOp {
    type Error = CondError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BoolOp> for String {
    fn from(op: BoolOp) -> Self {
        op.name().to_string()
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Leaf relation `left op right` between two opaque values.
///
/// Both operands are embedded verbatim, possibly several times, so they must
/// be side-effect free for the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        from = "(String, CompareOp, String)",
        into = "(String, CompareOp, String)"
    )
)]
pub struct Comparison {
    pub left: String,
    pub op: CompareOp,
    pub right: String,
}

impl Comparison {
    pub fn new(left: impl Into<String>, op: CompareOp, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    pub fn lt(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, CompareOp::Lt, right)
    }

    pub fn gt(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, CompareOp::Gt, right)
    }

    pub fn le(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, CompareOp::Le, right)
    }

    pub fn ge(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, CompareOp::Ge, right)
    }

    /// Same operands, complementary operator.
    pub fn reverse(&self) -> Self {
        Self::new(self.left.clone(), self.op.reverse(), self.right.clone())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

impl From<(String, CompareOp, String)> for Comparison {
    fn from((left, op, right): (String, CompareOp, String)) -> Self {
        Self { left, op, right }
    }
}

impl From<Comparison> for (String, CompareOp, String) {
    fn from(c: Comparison) -> Self {
        (c.left, c.op, c.right)
    }
}

// ============================================================================
// Condition tree
// ============================================================================

/// A comparison, or two conditions joined by a [`BoolOp`].
///
/// With the `serde` feature a leaf reads as `["5px", "less", "10px"]` and a
/// node as `[<condition>, "and", <condition>]`. Reading dispatches on the
/// first element, so an unknown operator or connective is reported as such.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(untagged))]
pub enum Condition {
    Compare(Comparison),
    Logic(Box<Condition>, BoolOp, Box<Condition>),
}

impl Condition {
    pub fn compare(left: impl Into<String>, op: CompareOp, right: impl Into<String>) -> Self {
        Condition::Compare(Comparison::new(left, op, right))
    }

    pub fn logic(left: impl Into<Condition>, op: BoolOp, right: impl Into<Condition>) -> Self {
        Condition::Logic(Box::new(left.into()), op, Box::new(right.into()))
    }

    pub fn and(left: impl Into<Condition>, right: impl Into<Condition>) -> Self {
        Self::logic(left, BoolOp::And, right)
    }

    pub fn or(left: impl Into<Condition>, right: impl Into<Condition>) -> Self {
        Self::logic(left, BoolOp::Or, right)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Condition::Compare(_))
    }

    /// Number of levels; a single comparison has depth 1.
    ///
    /// Compilation recurses once per level, so callers taking trees from
    /// untrusted input should bound this.
    pub fn depth(&self) -> usize {
        match self {
            Condition::Compare(_) => 1,
            Condition::Logic(l, _, r) => 1 + l.depth().max(r.depth()),
        }
    }

    /// The logical negation, pushed down to the leaves by De Morgan's laws.
    pub fn reverse(&self) -> Self {
        match self {
            Condition::Compare(c) => Condition::Compare(c.reverse()),
            Condition::Logic(l, op, r) => {
                Condition::Logic(Box::new(l.reverse()), op.dual(), Box::new(r.reverse()))
            }
        }
    }
}

impl From<Comparison> for Condition {
    fn from(c: Comparison) -> Self {
        Condition::Compare(c)
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        self.reverse()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare(c) => write!(f, "{}", c),
            Condition::Logic(l, op, r) => write!(f, "({} {} {})", l, op, r),
        }
    }
}

// ============================================================================
// Deserialization
// ============================================================================

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ConditionVisitor)
    }
}

#[cfg(feature = "serde")]
struct ConditionVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for ConditionVisitor {
    type Value = Condition;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a condition array [left, operator, right]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Condition, A::Error> {
        let left: Operand = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let op: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;

        let cond = match left {
            Operand::Value(left) => {
                let op: CompareOp = op.parse().map_err(de::Error::custom)?;
                let right: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                Condition::compare(left, op, right)
            }
            Operand::Node(left) => {
                let op: BoolOp = op.parse().map_err(de::Error::custom)?;
                let right: Condition = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                Condition::logic(left, op, right)
            }
        };

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }
        Ok(cond)
    }
}

/// First element of a condition array: a value makes the array a leaf, a
/// nested array makes it a node.
#[cfg(feature = "serde")]
enum Operand {
    Value(String),
    Node(Condition),
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Operand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OperandVisitor)
    }
}

#[cfg(feature = "serde")]
struct OperandVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for OperandVisitor {
    type Value = Operand;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a value string or a nested condition array")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Operand, E> {
        Ok(Operand::Value(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Operand, E> {
        Ok(Operand::Value(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Operand, A::Error> {
        ConditionVisitor.visit_seq(seq).map(Operand::Node)
    }
}
