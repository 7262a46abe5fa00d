//! Search criteria: field name → raw input value.
//!
//! Criteria arrive untyped, usually decoded from a JSON request body. Each
//! value is either a single [`Scalar`] or a list of them, and is only given a
//! type once the named field is resolved (see [`coerce`](crate::coerce)).

use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;

use crate::error::{Result, SiftError};
use crate::value::Number;

/// One untyped input value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Converts a JSON value. Arrays and objects have no scalar form and
    /// become [`Scalar::Null`].
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Bool(b) => Scalar::Bool(*b),
            Json::Number(n) => Scalar::Number(Number::from(n)),
            Json::String(s) => Scalar::String(s.clone()),
            Json::Null | Json::Array(_) | Json::Object(_) => Scalar::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Renders the scalar as search text. `Null` has no text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::String(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

macro_rules! scalar_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(n: $ty) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }

            impl From<$ty> for RawValue {
                fn from(n: $ty) -> Self {
                    RawValue::Scalar(Scalar::from(n))
                }
            }
        )*
    };
}

scalar_from_number!(i32, i64, u32, u64, f64);

/// The raw value of one criterion: a scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl RawValue {
    /// Converts a JSON value. Arrays become lists; nested arrays and objects
    /// inside a list become [`Scalar::Null`].
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Array(items) => RawValue::List(items.iter().map(Scalar::from_json).collect()),
            other => RawValue::Scalar(Scalar::from_json(other)),
        }
    }

    pub fn null() -> Self {
        RawValue::Scalar(Scalar::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RawValue::List(_))
    }

    /// All scalars of this value: one for a scalar, every item for a list.
    pub fn scalars(&self) -> std::slice::Iter<'_, Scalar> {
        match self {
            RawValue::Scalar(scalar) => std::slice::from_ref(scalar).iter(),
            RawValue::List(items) => items.iter(),
        }
    }
}

impl From<Scalar> for RawValue {
    fn from(scalar: Scalar) -> Self {
        RawValue::Scalar(scalar)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Scalar(s.into())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Scalar(s.into())
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Scalar(b.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        RawValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&Json> for RawValue {
    fn from(json: &Json) -> Self {
        RawValue::from_json(json)
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Json::deserialize(deserializer).map(|json| RawValue::from_json(&json))
    }
}

/// A mapping from field name to raw value, in insertion order.
///
/// Field names are matched case-insensitively when compiled. Entries for
/// unknown fields are kept here and skipped by the compiler.
///
/// # Example
///
/// ```
/// use pagesift::SearchCriteria;
///
/// let criteria = SearchCriteria::new()
///     .with("FirstName", vec!["J", "te"])
///     .with("FormStatus", vec![0, 1, 2]);
/// assert_eq!(criteria.len(), 2);
///
/// let json = serde_json::json!({ "DateOfBirth": "1980-01-01" });
/// let criteria = SearchCriteria::from_json(&json).unwrap();
/// assert_eq!(criteria.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    entries: Vec<(String, RawValue)>,
}

impl SearchCriteria {
    /// Creates empty criteria, which match every record.
    pub fn new() -> Self {
        SearchCriteria::default()
    }

    /// Adds a criterion and returns `self`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Adds a criterion.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.entries.push((field.into(), value.into()));
    }

    /// Builds criteria from a decoded JSON request body.
    ///
    /// `null` means "no criteria". Any other non-object value is rejected so
    /// the transport layer can answer with a client error.
    pub fn from_json(json: &Json) -> Result<Self> {
        match json {
            Json::Null => Ok(SearchCriteria::new()),
            Json::Object(map) => Ok(map
                .iter()
                .map(|(field, value)| (field.clone(), RawValue::from_json(value)))
                .collect()),
            Json::Bool(_) => Err(SiftError::CriteriaNotObject("boolean")),
            Json::Number(_) => Err(SiftError::CriteriaNotObject("number")),
            Json::String(_) => Err(SiftError::CriteriaNotObject("string")),
            Json::Array(_) => Err(SiftError::CriteriaNotObject("array")),
        }
    }

    /// Parses criteria from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: Json = serde_json::from_str(text)?;
        SearchCriteria::from_json(&json)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }

    /// Returns the first value given for `field`, ignoring ASCII case.
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, value)| value)
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for SearchCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SearchCriteria {
            entries: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for SearchCriteria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        SearchCriteria::from_json(&json).map_err(serde::de::Error::custom)
    }
}
