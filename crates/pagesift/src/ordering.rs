//! Ordering types for page sorting.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for field-based ordering.

use std::cmp::Ordering;
use std::fmt;

use crate::registry::{Accessor, FieldEntry};
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    Asc,
    /// Descending order (largest first).
    #[default]
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ordering clause: a registered field and a direction.
pub struct OrderBy<R> {
    /// The field to sort by.
    pub field: &'static str,
    /// The sort direction.
    pub dir: Dir,
    accessor: Accessor<R>,
}

impl<R> OrderBy<R> {
    /// Creates an ordering on a registered field.
    pub fn new(entry: &FieldEntry<R>, dir: Dir) -> Self {
        OrderBy {
            field: entry.name(),
            dir,
            accessor: entry.accessor(),
        }
    }

    /// Creates a descending ordering.
    pub fn desc(entry: &FieldEntry<R>) -> Self {
        OrderBy::new(entry, Dir::Desc)
    }

    /// Creates an ascending ordering.
    pub fn asc(entry: &FieldEntry<R>) -> Self {
        OrderBy::new(entry, Dir::Asc)
    }

    /// Compares two field values according to this ordering.
    ///
    /// Null values sort last in either direction. Returns `None` if the
    /// values cannot be compared (type mismatch or NaN).
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        match (a, b) {
            (Value::None, Value::None) => Some(Ordering::Equal),
            (Value::None, _) => Some(Ordering::Greater),
            (_, Value::None) => Some(Ordering::Less),
            _ => compare_values(a, b).map(|ordering| self.dir.apply(ordering)),
        }
    }

    /// Compares two records on this ordering's field.
    pub fn compare_records(&self, a: &R, b: &R) -> Option<Ordering> {
        self.compare(&(self.accessor)(a), &(self.accessor)(b))
    }
}

impl<R> Clone for OrderBy<R> {
    fn clone(&self) -> Self {
        OrderBy {
            field: self.field,
            dir: self.dir,
            accessor: self.accessor,
        }
    }
}

impl<R> fmt::Debug for OrderBy<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBy")
            .field("field", &self.field)
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

/// Compares two non-null values of the same type.
///
/// Returns `None` if the types don't match or comparison is not possible (NaN).
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
        (Value::None, Value::None) => Some(Ordering::Equal),

        // Type mismatch - cannot compare
        _ => None,
    }
}

/// Compares two records using a list of ordering clauses.
///
/// Uses the first clause as the primary sort key, the second to break ties, etc.
/// If all clauses compare equal, returns `Equal`.
pub fn compare_by_orderings<R>(a: &R, b: &R, orderings: &[OrderBy<R>]) -> Ordering {
    for order_by in orderings {
        if let Some(ordering) = order_by.compare_records(a, b) {
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        // If comparison failed (type mismatch/NaN), treat as equal and continue
    }
    Ordering::Equal
}
