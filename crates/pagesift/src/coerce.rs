//! Coercion of raw criteria values into typed values.
//!
//! [`coerce`] looks at the field's [`ValueKind`] and turns a [`RawValue`]
//! into the [`CoercedValue`] the predicate builder expects. A value that
//! cannot be coerced yields `None`, which means "no constraint".

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::criteria::{RawValue, Scalar};
use crate::registry::{FieldSpec, ValueKind};
use crate::value::Number;

const DATE_FORMAT: &str = "%Y-%m-%d";
const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const FRACTIONAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A typed criterion value, ready to become a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    /// Lower-cased search terms, OR-ed together.
    Strings(Vec<String>),
    /// Defined enum codes, OR-ed together.
    Enums(Vec<i64>),
    /// A number to compare for equality.
    Number(Number),
    /// A decimal to compare for equality.
    Decimal(Decimal),
    /// An inclusive date range, possibly open on one side.
    Span(DateSpan),
}

/// Inclusive timestamp bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpan {
    /// `start <= t <= end`.
    Between(NaiveDateTime, NaiveDateTime),
    /// `start <= t`.
    From(NaiveDateTime),
    /// `t <= end`.
    Until(NaiveDateTime),
}

impl DateSpan {
    /// Builds a span from optional bounds. `None` if both are missing.
    pub fn from_bounds(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(DateSpan::Between(start, end)),
            (Some(start), None) => Some(DateSpan::From(start)),
            (None, Some(end)) => Some(DateSpan::Until(end)),
            (None, None) => None,
        }
    }

    pub fn start(self) -> Option<NaiveDateTime> {
        match self {
            DateSpan::Between(start, _) | DateSpan::From(start) => Some(start),
            DateSpan::Until(_) => None,
        }
    }

    pub fn end(self) -> Option<NaiveDateTime> {
        match self {
            DateSpan::Between(_, end) | DateSpan::Until(end) => Some(end),
            DateSpan::From(_) => None,
        }
    }

    pub fn contains(self, t: NaiveDateTime) -> bool {
        self.start().map_or(true, |start| start <= t) && self.end().map_or(true, |end| t <= end)
    }
}

/// Coerces a raw value for the given field.
///
/// Returns `None` when the value cannot constrain a field of this kind.
///
/// # Example
///
/// ```
/// use pagesift::{coerce, CoercedValue, FieldSpec, RawValue};
///
/// let spec = FieldSpec::of::<String>("FirstName");
/// let value = coerce(&spec, &RawValue::from(vec!["J", " ", "TE"]));
/// assert_eq!(
///     value,
///     Some(CoercedValue::Strings(vec!["j".into(), "te".into()]))
/// );
/// ```
pub fn coerce(spec: &FieldSpec, raw: &RawValue) -> Option<CoercedValue> {
    match spec.kind {
        ValueKind::String => coerce_strings(raw),
        ValueKind::Enum(_) => coerce_enum(spec.kind, raw),
        ValueKind::Integer => coerce_integer(raw),
        ValueKind::Real => {
            single_number(raw).map(|n| CoercedValue::Number(Number::F64(n.to_f64())))
        }
        ValueKind::Decimal => single_number(raw)
            .and_then(to_decimal)
            .map(CoercedValue::Decimal),
        ValueKind::DateTime => coerce_datetime(raw).map(CoercedValue::Span),
        ValueKind::Unsupported => None,
    }
}

fn coerce_strings(raw: &RawValue) -> Option<CoercedValue> {
    let terms: Vec<String> = raw
        .scalars()
        .filter_map(Scalar::to_text)
        .filter(|text| !text.trim().is_empty())
        .map(|text| text.to_lowercase())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(CoercedValue::Strings(terms))
    }
}

fn coerce_enum(kind: ValueKind, raw: &RawValue) -> Option<CoercedValue> {
    match raw {
        RawValue::Scalar(scalar) => {
            let variant = match scalar {
                Scalar::String(text) => {
                    let text = text.trim();
                    kind.variant_by_name(text).or_else(|| {
                        text.parse::<i64>()
                            .ok()
                            .and_then(|code| kind.variant_by_code(code))
                    })
                }
                Scalar::Number(n) => n.as_i64().and_then(|code| kind.variant_by_code(code)),
                Scalar::Null | Scalar::Bool(_) => None,
            }?;
            Some(CoercedValue::Enums(vec![variant.code]))
        }
        RawValue::List(items) => {
            let mut codes = Vec::new();
            for code in items.iter().filter_map(|s| s.as_number()?.as_i64()) {
                if kind.variant_by_code(code).is_some() && !codes.contains(&code) {
                    codes.push(code);
                }
            }
            if codes.is_empty() {
                None
            } else {
                Some(CoercedValue::Enums(codes))
            }
        }
    }
}

fn single_number(raw: &RawValue) -> Option<Number> {
    match raw {
        RawValue::Scalar(scalar) => scalar.as_number(),
        RawValue::List(_) => None,
    }
}

fn coerce_integer(raw: &RawValue) -> Option<CoercedValue> {
    let n = match single_number(raw)? {
        float @ (Number::F32(_) | Number::F64(_)) => Number::I64(float.as_i64()?),
        integral => integral,
    };
    Some(CoercedValue::Number(n))
}

fn to_decimal(n: Number) -> Option<Decimal> {
    match n {
        Number::I64(i) => Some(Decimal::from(i)),
        Number::U64(u) => Some(Decimal::from(u)),
        Number::F32(f) => Decimal::try_from(f).ok(),
        Number::F64(f) => Decimal::try_from(f).ok(),
    }
}

fn coerce_datetime(raw: &RawValue) -> Option<DateSpan> {
    match raw {
        RawValue::Scalar(scalar) => {
            let start = parse_moment(scalar.as_str()?)?;
            let end = end_of_day(start.date())?;
            Some(DateSpan::Between(start.start(), end))
        }
        RawValue::List(items) => match items.as_slice() {
            [min, max] => {
                let start = min.as_str().and_then(parse_moment).map(Moment::start);
                let end = max
                    .as_str()
                    .and_then(parse_moment)
                    .and_then(Moment::inclusive_end);
                DateSpan::from_bounds(start, end)
            }
            _ => None,
        },
    }
}

/// A parsed date criterion: a bare day or an exact timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Moment {
    Day(NaiveDate),
    At(NaiveDateTime),
}

impl Moment {
    fn date(self) -> NaiveDate {
        match self {
            Moment::Day(day) => day,
            Moment::At(t) => t.date(),
        }
    }

    fn start(self) -> NaiveDateTime {
        match self {
            Moment::Day(day) => day.and_time(chrono::NaiveTime::MIN),
            Moment::At(t) => t,
        }
    }

    /// Upper bound for a range: a bare day covers the whole day.
    fn inclusive_end(self) -> Option<NaiveDateTime> {
        match self {
            Moment::Day(day) => end_of_day(day),
            Moment::At(t) => Some(t),
        }
    }
}

fn end_of_day(day: NaiveDate) -> Option<NaiveDateTime> {
    day.and_hms_micro_opt(23, 59, 59, 999_999)
}

fn parse_moment(text: &str) -> Option<Moment> {
    let text = text.trim();
    if let Ok(day) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Some(Moment::Day(day));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(text, UTC_FORMAT) {
        return Some(Moment::At(t));
    }

    // Only millisecond and microsecond precision are accepted.
    let (_, fraction) = text.rsplit_once('.')?;
    if !matches!(fraction.len(), 3 | 6) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(text, FRACTIONAL_FORMAT)
        .ok()
        .map(Moment::At)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EnumVariant;

    const STATUS: &[EnumVariant] = &[
        EnumVariant::new("Created", 0),
        EnumVariant::new("PendingApproval", 1),
        EnumVariant::new("Approved", 2),
        EnumVariant::new("Rejected", 4),
    ];

    fn spec(kind: ValueKind) -> FieldSpec {
        FieldSpec {
            name: "Field",
            kind,
            nullable: true,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|day| day.and_hms_micro_opt(h, min, s, micro))
            .unwrap()
    }

    fn span(raw: RawValue) -> Option<DateSpan> {
        match coerce(&spec(ValueKind::DateTime), &raw)? {
            CoercedValue::Span(span) => Some(span),
            other => panic!("expected span, got {other:?}"),
        }
    }

    #[test]
    fn strings_are_lowercased_and_blanks_dropped() {
        let value = coerce(&spec(ValueKind::String), &RawValue::from(vec!["Jane", "", "  "]));
        assert_eq!(value, Some(CoercedValue::Strings(vec!["jane".into()])));

        let value = coerce(&spec(ValueKind::String), &RawValue::from(vec![" ", ""]));
        assert_eq!(value, None);
    }

    #[test]
    fn strings_render_numbers_and_bools() {
        let raw = RawValue::List(vec![Scalar::from(42i64), Scalar::from(true), Scalar::Null]);
        assert_eq!(
            coerce(&spec(ValueKind::String), &raw),
            Some(CoercedValue::Strings(vec!["42".into(), "true".into()]))
        );
        assert_eq!(coerce(&spec(ValueKind::String), &RawValue::null()), None);
    }

    #[test]
    fn enum_single_by_name_or_code() {
        let kind = ValueKind::Enum(STATUS);
        assert_eq!(
            coerce(&spec(kind), &RawValue::from("approved")),
            Some(CoercedValue::Enums(vec![2]))
        );
        assert_eq!(
            coerce(&spec(kind), &RawValue::from(4i64)),
            Some(CoercedValue::Enums(vec![4]))
        );
        assert_eq!(
            coerce(&spec(kind), &RawValue::from("1")),
            Some(CoercedValue::Enums(vec![1]))
        );
    }

    #[test]
    fn enum_undefined_values_are_dropped() {
        let kind = ValueKind::Enum(STATUS);
        assert_eq!(coerce(&spec(kind), &RawValue::from(3i64)), None);
        assert_eq!(coerce(&spec(kind), &RawValue::from("Archived")), None);
        assert_eq!(coerce(&spec(kind), &RawValue::from(true)), None);
    }

    #[test]
    fn enum_list_keeps_defined_codes_in_order() {
        let kind = ValueKind::Enum(STATUS);
        let raw = RawValue::List(vec![
            Scalar::from(2i64),
            Scalar::from(3i64),
            Scalar::from("Created"),
            Scalar::from(0i64),
            Scalar::from(2i64),
        ]);
        assert_eq!(
            coerce(&spec(kind), &raw),
            Some(CoercedValue::Enums(vec![2, 0]))
        );
        assert_eq!(coerce(&spec(kind), &RawValue::from(vec![9i64, 10])), None);
    }

    #[test]
    fn integers_must_be_integral() {
        let kind = spec(ValueKind::Integer);
        assert_eq!(
            coerce(&kind, &RawValue::from(5i64)),
            Some(CoercedValue::Number(Number::I64(5)))
        );
        assert_eq!(
            coerce(&kind, &RawValue::from(5.0f64)),
            Some(CoercedValue::Number(Number::I64(5)))
        );
        assert_eq!(coerce(&kind, &RawValue::from(5.5f64)), None);
        assert_eq!(coerce(&kind, &RawValue::from("5")), None);
        assert_eq!(coerce(&kind, &RawValue::from(vec![1i64, 2])), None);
    }

    #[test]
    fn reals_and_decimals() {
        assert_eq!(
            coerce(&spec(ValueKind::Real), &RawValue::from(3i64)),
            Some(CoercedValue::Number(Number::F64(3.0)))
        );
        assert_eq!(
            coerce(&spec(ValueKind::Decimal), &RawValue::from(12.5f64)),
            Some(CoercedValue::Decimal(Decimal::new(125, 1)))
        );
        assert_eq!(
            coerce(&spec(ValueKind::Decimal), &RawValue::from(7u64)),
            Some(CoercedValue::Decimal(Decimal::from(7u64)))
        );
        assert_eq!(
            coerce(&spec(ValueKind::Decimal), &RawValue::from(f64::NAN)),
            None
        );
    }

    #[test]
    fn unsupported_kind_never_coerces() {
        assert_eq!(coerce(&spec(ValueKind::Unsupported), &RawValue::from("x")), None);
    }

    #[test]
    fn bare_date_covers_whole_day() {
        assert_eq!(
            span(RawValue::from("1980-01-01")),
            Some(DateSpan::Between(
                at(1980, 1, 1, 0, 0, 0, 0),
                at(1980, 1, 1, 23, 59, 59, 999_999)
            ))
        );
    }

    #[test]
    fn timestamp_runs_to_end_of_its_day() {
        assert_eq!(
            span(RawValue::from("2024-06-05T10:30:00Z")),
            Some(DateSpan::Between(
                at(2024, 6, 5, 10, 30, 0, 0),
                at(2024, 6, 5, 23, 59, 59, 999_999)
            ))
        );
        assert_eq!(
            span(RawValue::from("2024-06-05 10:30:00.123456")),
            Some(DateSpan::Between(
                at(2024, 6, 5, 10, 30, 0, 123_456),
                at(2024, 6, 5, 23, 59, 59, 999_999)
            ))
        );
        assert_eq!(
            span(RawValue::from("2024-06-05 10:30:00.250")).and_then(DateSpan::start),
            Some(at(2024, 6, 5, 10, 30, 0, 250_000))
        );
    }

    #[test]
    fn unparseable_dates_give_no_span() {
        assert_eq!(span(RawValue::from("05/06/2024")), None);
        assert_eq!(span(RawValue::from("2024-06-05 10:30:00.12")), None);
        assert_eq!(span(RawValue::from("2024-06-05 10:30:00")), None);
        assert_eq!(span(RawValue::from(20240605i64)), None);
        assert_eq!(span(RawValue::null()), None);
    }

    #[test]
    fn range_bounds() {
        let closed = span(RawValue::from(vec!["1990-05-10", "1993-05-10"]));
        assert_eq!(
            closed,
            Some(DateSpan::Between(
                at(1990, 5, 10, 0, 0, 0, 0),
                at(1993, 5, 10, 23, 59, 59, 999_999)
            ))
        );

        let from = span(RawValue::List(vec![Scalar::from("1990-05-10"), Scalar::Null]));
        assert_eq!(from, Some(DateSpan::From(at(1990, 5, 10, 0, 0, 0, 0))));

        let until = span(RawValue::List(vec![Scalar::Null, Scalar::from("1990-05-10")]));
        assert_eq!(
            until,
            Some(DateSpan::Until(at(1990, 5, 10, 23, 59, 59, 999_999)))
        );
    }

    #[test]
    fn range_timestamp_max_is_exact() {
        let until = span(RawValue::List(vec![
            Scalar::Null,
            Scalar::from("1990-05-10T08:00:00Z"),
        ]));
        assert_eq!(until, Some(DateSpan::Until(at(1990, 5, 10, 8, 0, 0, 0))));
    }

    #[test]
    fn degenerate_ranges() {
        assert_eq!(span(RawValue::List(vec![Scalar::Null, Scalar::Null])), None);
        assert_eq!(span(RawValue::from(vec![1i64, 2])), None);
        assert_eq!(span(RawValue::from(vec!["1990-05-10"])), None);
        assert_eq!(
            span(RawValue::from(vec!["1990-05-10", "1991-01-01", "1992-01-01"])),
            None
        );
    }

    #[test]
    fn span_contains() {
        let span = DateSpan::Between(at(2024, 1, 1, 0, 0, 0, 0), at(2024, 1, 31, 0, 0, 0, 0));
        assert!(span.contains(at(2024, 1, 1, 0, 0, 0, 0)));
        assert!(span.contains(at(2024, 1, 31, 0, 0, 0, 0)));
        assert!(!span.contains(at(2024, 2, 1, 0, 0, 0, 0)));
        assert!(DateSpan::Until(at(2024, 1, 1, 0, 0, 0, 0)).contains(at(1999, 1, 1, 0, 0, 0, 0)));
    }
}
