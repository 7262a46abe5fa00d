//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is what a field accessor hands back for one record field.
//! It covers every kind the engine can filter on: strings, numbers, fixed-point
//! decimals, timestamps and enum codes.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Runtime value of a record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use pagesift::{Number, Value};
///
/// struct Patron {
///     name: String,
///     visits: u32,
/// }
///
/// fn visits(patron: &Patron) -> Value<'_> {
///     Value::Number(Number::from(patron.visits))
/// }
///
/// let patron = Patron { name: "Jane".into(), visits: 4 };
/// assert_eq!(visits(&patron), Value::Number(Number::U64(4)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Integer or floating point value.
    Number(Number),
    /// Fixed-point decimal value.
    Decimal(Decimal),
    /// Date and time, without a time zone.
    Timestamp(NaiveDateTime),
    /// Enum code.
    Enum(i64),
    /// Null, or a field kind the engine does not filter on.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the decimal value, if present.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Extracts the timestamp value, if present.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the enum code, if present.
    pub fn as_enum(&self) -> Option<i64> {
        match self {
            Value::Enum(code) => Some(*code),
            _ => None,
        }
    }
}

/// Numeric value covering every integer width and floating point.
///
/// Numbers are stored in one of four variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F32` for single-precision floats, compared at that width
/// - `F64` for floating point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 32-bit floating point.
    F32(f32),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F32(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns the value as `i64` when it is integral and in range.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::I64(n) => Some(n),
            Number::U64(n) => i64::try_from(n).ok(),
            Number::F32(n) => Number::F64(n as f64).as_i64(),
            Number::F64(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 => {
                Some(n as i64)
            }
            Number::F64(_) => None,
        }
    }

    /// Returns `true` if the number has no fractional part.
    pub fn is_integral(self) -> bool {
        match self {
            Number::I64(_) | Number::U64(_) => true,
            Number::F32(n) => n.is_finite() && n.fract() == 0.0,
            Number::F64(n) => n.is_finite() && n.fract() == 0.0,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // An f32 side narrows the other, so 0.1 matches 0.1f32
            (Number::F32(a), _) => a.partial_cmp(&(other.to_f64() as f32)),
            (_, Number::F32(b)) => (self.to_f64() as f32).partial_cmp(&b),

            // Mixed integer signs compare exactly instead of through f64
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),

            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

fn compare_signed_unsigned(signed: i64, unsigned: u64) -> Ordering {
    if signed < 0 {
        Ordering::Less
    } else {
        (signed as u64).cmp(&unsigned)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F32(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F32 as f32: f32);
number_from!(F64 as f64: f64);

impl From<i128> for Number {
    fn from(n: i128) -> Self {
        i64::try_from(n)
            .map(Number::I64)
            .unwrap_or(Number::F64(n as f64))
    }
}

impl From<u128> for Number {
    fn from(n: u128) -> Self {
        u64::try_from(n)
            .map(Number::U64)
            .unwrap_or(Number::F64(n as f64))
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(
            Value::Number(Number::I64(42)).as_number(),
            Some(Number::I64(42))
        );
        assert_eq!(Value::Enum(4).as_enum(), Some(4));
        assert_eq!(
            Value::Decimal(Decimal::new(125, 1)).as_decimal(),
            Some(Decimal::new(125, 1))
        );

        let ts = NaiveDate::from_ymd_opt(2024, 6, 5)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(Value::Timestamp(ts).as_timestamp(), Some(ts));

        // Wrong type returns None
        assert_eq!(Value::String("test").as_number(), None);
        assert_eq!(Value::Number(Number::I64(1)).as_str(), None);
        assert!(Value::None.is_none());
    }

    #[test]
    fn number_comparisons_same_type() {
        assert_eq!(
            Number::I64(5).compare(Number::I64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(10).compare(Number::U64(5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::F64(5.0).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(-1).compare(Number::U64(0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::I64(i64::MAX)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn f32_compares_at_its_own_width() {
        assert_eq!(
            Number::from(0.1f32).compare(Number::F64(0.1)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::F64(0.1).compare(Number::F32(0.1)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::F32(0.5).compare(Number::I64(1)),
            Some(Ordering::Less)
        );
        assert_eq!(Number::F32(4.0).as_i64(), Some(4));
        assert!(!Number::F32(4.5).is_integral());
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_integral_checks() {
        assert_eq!(Number::F64(3.0).as_i64(), Some(3));
        assert_eq!(Number::F64(3.5).as_i64(), None);
        assert_eq!(Number::U64(u64::MAX).as_i64(), None);
        assert!(Number::F64(2.0).is_integral());
        assert!(!Number::F64(f64::INFINITY).is_integral());
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u8), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
        assert_eq!(Number::from(7i128), Number::I64(7));

        let json: serde_json::Number = serde_json::from_str("2.5").unwrap();
        assert_eq!(Number::from(&json), Number::F64(2.5));
        let json: serde_json::Number = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(Number::from(&json), Number::U64(u64::MAX));
    }
}
