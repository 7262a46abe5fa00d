//! Comparison operators for predicate clauses.
//!
//! Criteria compile to only four operators: containment for text, equality
//! for numbers and enums, and the two inclusive bounds of a date range.

use std::cmp::Ordering;

/// Comparison operator for a clause.
///
/// - **String**: `Contains` (on lower-cased text)
/// - **Numeric/Enum**: `Eq`
/// - **Timestamp**: `Gte`, `Lte`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal (exact match).
    Eq,
    /// Text contains substring.
    Contains,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
}

impl Op {
    /// Evaluates a comparison given an ordering result.
    ///
    /// Used for numeric and timestamp comparisons, where the field value is
    /// compared against the clause value.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Gte => ordering != Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            Op::Contains => false,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Contains => "contains",
            Op::Gte => "gte",
            Op::Lte => "lte",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_eval_ordering() {
        assert!(Op::Eq.eval_ordering(Ordering::Equal));
        assert!(!Op::Eq.eval_ordering(Ordering::Less));
        assert!(!Op::Eq.eval_ordering(Ordering::Greater));

        assert!(Op::Gte.eval_ordering(Ordering::Equal));
        assert!(!Op::Gte.eval_ordering(Ordering::Less));
        assert!(Op::Gte.eval_ordering(Ordering::Greater));

        assert!(Op::Lte.eval_ordering(Ordering::Equal));
        assert!(Op::Lte.eval_ordering(Ordering::Less));
        assert!(!Op::Lte.eval_ordering(Ordering::Greater));

        // Not an ordering-based operator
        assert!(!Op::Contains.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::Eq.to_string(), "eq");
        assert_eq!(Op::Contains.to_string(), "contains");
        assert_eq!(Op::Lte.to_string(), "lte");
    }
}
