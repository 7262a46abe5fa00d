//! Predicates over records.
//!
//! A [`Clause`] is a single test: a field accessor, an operator and an owned
//! comparison value. A [`Predicate`] combines clauses with AND/OR into a
//! small data tree that is evaluated against one record at a time.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::coerce::{CoercedValue, DateSpan};
use crate::op::Op;
use crate::registry::{Accessor, FieldEntry};
use crate::value::{Number, Value};

/// Owned value for storage in a clause.
///
/// Unlike [`Value`], which borrows from the record, `ClauseValue` owns its
/// data so it can live in a compiled filter.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseValue {
    /// Lower-cased search text.
    Text(String),
    /// Numeric value.
    Number(Number),
    /// Decimal value.
    Decimal(Decimal),
    /// Enum code.
    Enum(i64),
    /// Timestamp value.
    Timestamp(NaiveDateTime),
}

/// A single filter test on one field.
pub struct Clause<R> {
    /// The field name the clause was built for.
    pub field: &'static str,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: ClauseValue,
    accessor: Accessor<R>,
}

impl<R> Clause<R> {
    /// Creates a clause on a registered field.
    pub fn new(entry: &FieldEntry<R>, op: Op, value: ClauseValue) -> Self {
        Clause {
            field: entry.name(),
            op,
            value,
            accessor: entry.accessor(),
        }
    }

    /// Evaluates this clause against a record.
    pub fn matches(&self, record: &R) -> bool {
        self.matches_value(&(self.accessor)(record))
    }

    /// Evaluates this clause against a field value.
    ///
    /// A null field value never matches, and neither does a value of another
    /// type than the clause's.
    pub fn matches_value(&self, field_value: &Value<'_>) -> bool {
        match (&self.value, field_value) {
            (ClauseValue::Text(pattern), Value::String(s)) => self.match_text(s, pattern),

            (ClauseValue::Number(clause), Value::Number(field)) => field
                .compare(*clause)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),

            (ClauseValue::Decimal(clause), Value::Decimal(field)) => {
                self.op.eval_ordering(field.cmp(clause))
            }

            (ClauseValue::Enum(clause), Value::Enum(field)) => {
                self.op == Op::Eq && field == clause
            }

            (ClauseValue::Timestamp(clause), Value::Timestamp(field)) => {
                self.op.eval_ordering(field.cmp(clause))
            }

            // A null field never satisfies a clause
            (_, Value::None) => false,

            _ => false,
        }
    }

    fn match_text(&self, field: &str, pattern: &str) -> bool {
        match self.op {
            Op::Contains => field.to_lowercase().contains(pattern),
            Op::Eq => field.to_lowercase() == pattern,
            Op::Gte | Op::Lte => false,
        }
    }
}

impl<R> Clone for Clause<R> {
    fn clone(&self) -> Self {
        Clause {
            field: self.field,
            op: self.op,
            value: self.value.clone(),
            accessor: self.accessor,
        }
    }
}

impl<R> fmt::Debug for Clause<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("field", &self.field)
            .field("op", &self.op)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// A boolean test over one record.
///
/// # Example
///
/// ```
/// use pagesift::{ClauseValue, FieldRegistry, Op, Predicate, Value};
///
/// struct Patron {
///     first_name: String,
/// }
///
/// fn first_name(p: &Patron) -> Value<'_> {
///     Value::String(&p.first_name)
/// }
///
/// let registry = FieldRegistry::builder("Patron")
///     .field::<String>("FirstName", first_name)
///     .build();
/// let entry = registry.resolve("FirstName").unwrap();
///
/// let has_j = Predicate::clause(entry, Op::Contains, ClauseValue::Text("j".into()));
/// let has_te = Predicate::clause(entry, Op::Contains, ClauseValue::Text("te".into()));
/// let either = has_j.or(has_te);
///
/// assert!(either.matches(&Patron { first_name: "Steven".into() }));
/// assert!(!either.matches(&Patron { first_name: "Alice".into() }));
/// ```
pub enum Predicate<R> {
    /// A single clause.
    Clause(Clause<R>),
    /// At least one child must match.
    Any(Vec<Predicate<R>>),
    /// Every child must match.
    All(Vec<Predicate<R>>),
}

impl<R> Predicate<R> {
    /// Creates a single-clause predicate.
    pub fn clause(entry: &FieldEntry<R>, op: Op, value: ClauseValue) -> Self {
        Predicate::Clause(Clause::new(entry, op, value))
    }

    /// Combines two predicates; both must match.
    pub fn and(self, other: Predicate<R>) -> Self {
        match self {
            Predicate::All(mut children) => {
                children.push(other);
                Predicate::All(children)
            }
            first => Predicate::All(vec![first, other]),
        }
    }

    /// Combines two predicates; either may match.
    pub fn or(self, other: Predicate<R>) -> Self {
        match self {
            Predicate::Any(mut children) => {
                children.push(other);
                Predicate::Any(children)
            }
            first => Predicate::Any(vec![first, other]),
        }
    }

    /// ORs a list of predicates together. `None` for an empty list, the
    /// predicate itself for a list of one.
    pub fn any_of(predicates: impl IntoIterator<Item = Predicate<R>>) -> Option<Self> {
        let mut predicates: Vec<_> = predicates.into_iter().collect();
        match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(Predicate::Any(predicates)),
        }
    }

    /// Evaluates the predicate against a record.
    pub fn matches(&self, record: &R) -> bool {
        match self {
            Predicate::Clause(clause) => clause.matches(record),
            Predicate::Any(children) => children.iter().any(|p| p.matches(record)),
            Predicate::All(children) => children.iter().all(|p| p.matches(record)),
        }
    }

    /// Visits every clause in the tree, depth first.
    pub fn clauses(&self) -> Vec<&Clause<R>> {
        let mut out = Vec::new();
        self.collect_clauses(&mut out);
        out
    }

    fn collect_clauses<'a>(&'a self, out: &mut Vec<&'a Clause<R>>) {
        match self {
            Predicate::Clause(clause) => out.push(clause),
            Predicate::Any(children) | Predicate::All(children) => {
                for child in children {
                    child.collect_clauses(out);
                }
            }
        }
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        match self {
            Predicate::Clause(clause) => Predicate::Clause(clause.clone()),
            Predicate::Any(children) => Predicate::Any(children.clone()),
            Predicate::All(children) => Predicate::All(children.clone()),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Clause(clause) => clause.fmt(f),
            Predicate::Any(children) => f.debug_tuple("Any").field(children).finish(),
            Predicate::All(children) => f.debug_tuple("All").field(children).finish(),
        }
    }
}

/// Builds the predicate for one field from its coerced value.
///
/// - text: case-insensitive containment, several terms OR-ed
/// - enum: equality, several codes OR-ed
/// - numbers and decimals: equality
/// - timestamps: inclusive lower and/or upper bound
pub fn build<R>(entry: &FieldEntry<R>, value: CoercedValue) -> Option<Predicate<R>> {
    match value {
        CoercedValue::Strings(terms) => Predicate::any_of(
            terms
                .into_iter()
                .map(|term| Predicate::clause(entry, Op::Contains, ClauseValue::Text(term))),
        ),
        CoercedValue::Enums(codes) => Predicate::any_of(
            codes
                .into_iter()
                .map(|code| Predicate::clause(entry, Op::Eq, ClauseValue::Enum(code))),
        ),
        CoercedValue::Number(n) => Some(Predicate::clause(entry, Op::Eq, ClauseValue::Number(n))),
        CoercedValue::Decimal(d) => Some(Predicate::clause(entry, Op::Eq, ClauseValue::Decimal(d))),
        CoercedValue::Span(span) => Some(span_predicate(entry, span)),
    }
}

fn span_predicate<R>(entry: &FieldEntry<R>, span: DateSpan) -> Predicate<R> {
    let lower = |t| Predicate::clause(entry, Op::Gte, ClauseValue::Timestamp(t));
    let upper = |t| Predicate::clause(entry, Op::Lte, ClauseValue::Timestamp(t));
    match span {
        DateSpan::Between(start, end) => lower(start).and(upper(end)),
        DateSpan::From(start) => lower(start),
        DateSpan::Until(end) => upper(end),
    }
}
