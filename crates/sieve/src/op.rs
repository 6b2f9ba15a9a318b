//! Comparison operators for attribute leaves.
//!
//! [`Op`] compares any `PartialOrd` attribute against a stored value;
//! [`TextOp`] covers the string-only checks used by [`text`](crate::leaf::text).

use std::cmp::Ordering;
use std::fmt;

/// Ordering-based comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl Op {
    /// Evaluates this operator given the ordering of the item's attribute
    /// relative to the comparison value.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering.is_eq(),
            Op::Ne => ordering.is_ne(),
            Op::Gt => ordering.is_gt(),
            Op::Gte => ordering.is_ge(),
            Op::Lt => ordering.is_lt(),
            Op::Lte => ordering.is_le(),
        }
    }

    /// Returns the symbol of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String comparison operator.
///
/// Comparisons are case sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextOp {
    /// Exact match.
    Eq,
    /// Anything but an exact match.
    Ne,
    /// Field starts with the pattern.
    StartsWith,
    /// Field ends with the pattern.
    EndsWith,
    /// Field contains the pattern.
    Contains,
}

impl TextOp {
    /// Applies the operator to `field` and `pattern`.
    pub fn apply(self, field: &str, pattern: &str) -> bool {
        match self {
            TextOp::Eq => field == pattern,
            TextOp::Ne => field != pattern,
            TextOp::StartsWith => field.starts_with(pattern),
            TextOp::EndsWith => field.ends_with(pattern),
            TextOp::Contains => field.contains(pattern),
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            TextOp::Eq => "==",
            TextOp::Ne => "!=",
            TextOp::StartsWith => "startswith",
            TextOp::EndsWith => "endswith",
            TextOp::Contains => "contains",
        }
    }
}

impl fmt::Display for TextOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_agree_with_integer_comparison() {
        let ops = [Op::Eq, Op::Ne, Op::Gt, Op::Gte, Op::Lt, Op::Lte];
        for a in 0..3i32 {
            for b in 0..3i32 {
                let expected = [a == b, a != b, a > b, a >= b, a < b, a <= b];
                for (op, want) in ops.iter().zip(expected) {
                    assert_eq!(op.eval_ordering(a.cmp(&b)), want, "{a} {op} {b}");
                }
            }
        }
    }

    #[test]
    fn text_ops() {
        assert!(TextOp::Eq.apply("hello", "hello"));
        assert!(!TextOp::Eq.apply("hello", "Hello")); // case sensitive
        assert!(TextOp::Ne.apply("hello", "world"));
        assert!(TextOp::StartsWith.apply("hello world", "hello"));
        assert!(!TextOp::StartsWith.apply("say hello", "hello"));
        assert!(TextOp::EndsWith.apply("hello world", "world"));
        assert!(!TextOp::EndsWith.apply("world!", "world"));
        assert!(TextOp::Contains.apply("hello", "ll"));
        assert!(!TextOp::Contains.apply("helo", "ll"));
    }

    #[test]
    fn display() {
        assert_eq!(Op::Gte.to_string(), ">=");
        assert_eq!(TextOp::StartsWith.to_string(), "startswith");
    }
}
