//! Criteria compiler.
//!
//! [`Filter::compile`] folds [`SearchCriteria`] into a conjunction of
//! predicates. Each entry is resolved against the record's registry, coerced
//! and built; entries that cannot constrain anything are skipped and
//! reported in [`Filter::skipped`].

use std::fmt;

use tracing::{debug, trace};

use crate::coerce::coerce;
use crate::criteria::SearchCriteria;
use crate::predicate::{build, Predicate};
use crate::registry::ValueKind;
use crate::traits::Record;

/// Why a criterion added no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No field of that name on the record.
    UnknownField,
    /// The field's kind is never filtered on.
    UnsupportedKind,
    /// The value could not be read as the field's kind.
    Uncoercible,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::UnknownField => "unknown field",
            SkipReason::UnsupportedKind => "unsupported kind",
            SkipReason::Uncoercible => "uncoercible value",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A criterion that was dropped during compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// The field name as given in the criteria.
    pub field: String,
    pub reason: SkipReason,
}

/// A compiled filter: every predicate must match.
///
/// An empty filter matches every record.
///
/// # Example
///
/// ```
/// use pagesift::{Filter, Record, SearchCriteria};
///
/// #[derive(Record)]
/// #[sift(key = "Id", rename_all = "PascalCase")]
/// struct Patron {
///     id: u32,
///     first_name: String,
/// }
///
/// let patrons = vec![
///     Patron { id: 1, first_name: "John".into() },
///     Patron { id: 2, first_name: "Alice".into() },
///     Patron { id: 3, first_name: "Steven".into() },
/// ];
///
/// let criteria = SearchCriteria::new()
///     .with("firstname", vec!["J", "te"])
///     .with("Nickname", "Al");
/// let filter = Filter::<Patron>::compile(&criteria);
///
/// assert_eq!(filter.count(&patrons), 2);
/// assert_eq!(filter.skipped().len(), 1);
/// ```
pub struct Filter<R> {
    predicates: Vec<Predicate<R>>,
    skipped: Vec<Skipped>,
}

impl<R> Filter<R> {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Filter {
            predicates: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Adds a predicate that must also match.
    pub fn and(mut self, predicate: Predicate<R>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Returns `true` if the filter has no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// The ANDed predicates, one per effective criterion.
    pub fn predicates(&self) -> &[Predicate<R>] {
        &self.predicates
    }

    /// Criteria that were dropped during compilation.
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// Tests if a single record matches.
    pub fn matches(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Counts the matching records.
    pub fn count(&self, records: &[R]) -> usize {
        records.iter().filter(|r| self.matches(r)).count()
    }

    /// Returns references to the matching records, in their original order.
    pub fn apply<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Collapses the filter into a single predicate. `None` when empty.
    pub fn into_predicate(mut self) -> Option<Predicate<R>> {
        match self.predicates.len() {
            0 => None,
            1 => self.predicates.pop(),
            _ => Some(Predicate::All(self.predicates)),
        }
    }
}

impl<R: Record> Filter<R> {
    /// Compiles search criteria against the record type's registry.
    ///
    /// Never fails: fields that don't exist and values that can't be read
    /// are logged at `debug` and left out.
    pub fn compile(criteria: &SearchCriteria) -> Self {
        let registry = R::registry();
        let mut filter = Filter::new();

        for (field, raw) in criteria.iter() {
            let Some(entry) = registry.resolve(field) else {
                filter.skip(field, SkipReason::UnknownField);
                continue;
            };
            if entry.kind() == ValueKind::Unsupported {
                filter.skip(field, SkipReason::UnsupportedKind);
                continue;
            }
            match coerce(entry.spec(), raw).and_then(|value| build(entry, value)) {
                Some(predicate) => filter.predicates.push(predicate),
                None => filter.skip(field, SkipReason::Uncoercible),
            }
        }

        trace!(
            record = registry.record_name(),
            criteria = criteria.len(),
            predicates = filter.predicates.len(),
            skipped = filter.skipped.len(),
            "compiled search criteria"
        );
        filter
    }

    fn skip(&mut self, field: &str, reason: SkipReason) {
        debug!(
            record = R::registry().record_name(),
            field,
            reason = reason.as_str(),
            "skipping search criterion"
        );
        self.skipped.push(Skipped {
            field: field.to_string(),
            reason,
        });
    }
}

/// Compiles search criteria for record type `R`.
pub fn compile<R: Record>(criteria: &SearchCriteria) -> Filter<R> {
    Filter::compile(criteria)
}

impl<R> Default for Filter<R> {
    fn default() -> Self {
        Filter::new()
    }
}

impl<R> Clone for Filter<R> {
    fn clone(&self) -> Self {
        Filter {
            predicates: self.predicates.clone(),
            skipped: self.skipped.clone(),
        }
    }
}

impl<R> fmt::Debug for Filter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("predicates", &self.predicates)
            .field("skipped", &self.skipped)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::registry::{EnumVariant, FieldRegistry};
    use crate::traits::FieldValue;
    use crate::value::{Number, Value};

    const STATUS: &[EnumVariant] = &[
        EnumVariant::new("Open", 0),
        EnumVariant::new("Closed", 1),
    ];

    #[derive(Debug)]
    struct Ticket {
        id: u32,
        title: String,
        status: i64,
        opened: NaiveDateTime,
        urgent: bool,
    }

    fn id(t: &Ticket) -> Value<'_> {
        Value::Number(Number::from(t.id))
    }

    fn title(t: &Ticket) -> Value<'_> {
        Value::String(&t.title)
    }

    fn status(t: &Ticket) -> Value<'_> {
        Value::Enum(t.status)
    }

    fn opened(t: &Ticket) -> Value<'_> {
        t.opened.field_value()
    }

    fn urgent(t: &Ticket) -> Value<'_> {
        t.urgent.field_value()
    }

    impl Record for Ticket {
        const DEFAULT_SORT: &'static str = "Opened";
        const PRIMARY_KEY: &'static str = "Id";

        fn registry() -> &'static FieldRegistry<Self> {
            static REGISTRY: OnceLock<FieldRegistry<Ticket>> = OnceLock::new();
            REGISTRY.get_or_init(|| {
                FieldRegistry::builder("Ticket")
                    .field::<u32>("Id", id)
                    .field::<String>("Title", title)
                    .entry(
                        crate::registry::FieldSpec {
                            name: "Status",
                            kind: ValueKind::Enum(STATUS),
                            nullable: false,
                        },
                        status,
                    )
                    .field::<NaiveDateTime>("Opened", opened)
                    .field::<bool>("Urgent", urgent)
                    .build()
            })
        }
    }

    fn ticket(id: u32, title: &str, status: i64, day: u32) -> Ticket {
        Ticket {
            id,
            title: title.into(),
            status,
            opened: NaiveDate::from_ymd_opt(2024, 3, day)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
                .unwrap(),
            urgent: id % 2 == 0,
        }
    }

    fn sample() -> Vec<Ticket> {
        vec![
            ticket(1, "Login broken", 0, 1),
            ticket(2, "Slow search", 1, 2),
            ticket(3, "Broken link", 0, 3),
            ticket(4, "Typo on page", 1, 3),
        ]
    }

    #[test]
    fn empty_criteria_matches_all() {
        let filter = Filter::<Ticket>::compile(&SearchCriteria::new());
        assert!(filter.is_empty());
        assert_eq!(filter.count(&sample()), 4);
        assert!(filter.into_predicate().is_none());
    }

    #[test]
    fn criteria_are_anded() {
        let criteria = SearchCriteria::new()
            .with("title", "broken")
            .with("status", 0i64);
        let filter = Filter::<Ticket>::compile(&criteria);
        let tickets = sample();

        assert_eq!(filter.predicates().len(), 2);
        let ids: Vec<u32> = filter.apply(&tickets).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let criteria = SearchCriteria::new()
            .with("Assignee", "bob")
            .with("Title", "slow");
        let filter = Filter::<Ticket>::compile(&criteria);

        assert_eq!(filter.count(&sample()), 1);
        assert_eq!(
            filter.skipped(),
            &[Skipped {
                field: "Assignee".into(),
                reason: SkipReason::UnknownField,
            }]
        );
    }

    #[test]
    fn unsupported_and_uncoercible_are_skipped() {
        let criteria = SearchCriteria::new()
            .with("Urgent", true)
            .with("Opened", "last tuesday")
            .with("Id", 2.5f64);
        let filter = Filter::<Ticket>::compile(&criteria);

        assert!(filter.is_empty());
        let reasons: Vec<SkipReason> = filter.skipped().iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::UnsupportedKind,
                SkipReason::Uncoercible,
                SkipReason::Uncoercible
            ]
        );
    }

    #[test]
    fn date_criterion_matches_whole_day() {
        let criteria = SearchCriteria::new().with("opened", "2024-03-03");
        let filter = compile::<Ticket>(&criteria);
        let tickets = sample();

        let ids: Vec<u32> = filter.apply(&tickets).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn enum_names_resolve() {
        let criteria = SearchCriteria::new().with("Status", "closed");
        let filter = compile::<Ticket>(&criteria);
        assert_eq!(filter.count(&sample()), 2);
    }

    #[test]
    fn and_extends_compiled_filter() {
        let registry = Ticket::registry();
        let entry = registry.resolve("Id").unwrap();
        let extra = crate::predicate::Predicate::clause(
            entry,
            crate::op::Op::Gte,
            crate::predicate::ClauseValue::Number(Number::I64(3)),
        );
        let filter = compile::<Ticket>(&SearchCriteria::new().with("Title", "o")).and(extra);

        let tickets = sample();
        let ids: Vec<u32> = filter.apply(&tickets).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::UnknownField.to_string(), "unknown field");
        assert_eq!(SkipReason::Uncoercible.to_string(), "uncoercible value");
    }
}
