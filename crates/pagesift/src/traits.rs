//! Traits for derive macro support.
//!
//! [`Record`] is implemented by `#[derive(Record)]` and gives the engine a
//! record type's field registry and its fixed sort order. [`FieldValue`]
//! classifies a field's declared Rust type, and [`FieldEnum`] (derived by
//! `#[derive(FieldEnum)]`) describes an enum's name/code table.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::registry::{EnumVariant, FieldRegistry, ValueKind};
use crate::value::{Number, Value};

/// A record type that can be searched and paged.
///
/// This trait is typically derived using `#[derive(Record)]`, but can also
/// be implemented manually.
///
/// # Derive Usage
///
/// ```
/// use pagesift::{Pager, PageRequest, Record};
///
/// #[derive(Record)]
/// #[sift(key = "Id", rename_all = "PascalCase")]
/// struct Task {
///     id: u32,
///     title: String,
/// }
///
/// let tasks = vec![
///     Task { id: 1, title: "Write docs".into() },
///     Task { id: 2, title: "Fix bug".into() },
/// ];
///
/// let pager = Pager::<Task>::new().unwrap();
/// let page = pager.page(tasks.as_slice(), PageRequest::new(1, 10)).unwrap();
/// assert_eq!(page.data[0].title, "Fix bug");
/// assert_eq!(Task::TITLE, "Title");
/// ```
///
/// # Manual Implementation
///
/// ```
/// use std::sync::OnceLock;
///
/// use pagesift::{FieldRegistry, Record, Value};
///
/// struct Task {
///     id: u32,
///     title: String,
/// }
///
/// fn id(task: &Task) -> Value<'_> {
///     Value::Number(task.id.into())
/// }
///
/// fn title(task: &Task) -> Value<'_> {
///     Value::String(&task.title)
/// }
///
/// impl Record for Task {
///     const DEFAULT_SORT: &'static str = "id";
///     const PRIMARY_KEY: &'static str = "id";
///
///     fn registry() -> &'static FieldRegistry<Self> {
///         static REGISTRY: OnceLock<FieldRegistry<Task>> = OnceLock::new();
///         REGISTRY.get_or_init(|| {
///             FieldRegistry::builder("Task")
///                 .field::<u32>("id", id)
///                 .field::<String>("title", title)
///                 .build()
///         })
///     }
/// }
///
/// let task = Task { id: 7, title: "Ship".into() };
/// assert_eq!(task.field_value("TITLE"), Value::String("Ship"));
/// ```
pub trait Record: Sized + 'static {
    /// Field the pager sorts by, always descending.
    const DEFAULT_SORT: &'static str;

    /// Numeric primary key. Breaks ties in the default sort.
    const PRIMARY_KEY: &'static str;

    /// The registry of searchable fields, built once per type.
    fn registry() -> &'static FieldRegistry<Self>;

    /// Returns the value of a field by name, or [`Value::None`] if the name
    /// is unknown.
    fn field_value(&self, field: &str) -> Value<'_> {
        Self::registry()
            .resolve(field)
            .map_or(Value::None, |entry| entry.value(self))
    }
}

/// Classifies a field's Rust type and converts a field into a [`Value`].
///
/// Implemented for strings, every integer width, floats, [`Decimal`], the
/// chrono date types, `bool` (as an unsupported kind), `Option<T>`, and any
/// enum deriving `FieldEnum`.
pub trait FieldValue {
    /// The value kind this type maps to.
    const KIND: ValueKind;

    /// Whether the type can hold null.
    const NULLABLE: bool = false;

    /// Converts the field into a comparable value.
    fn field_value(&self) -> Value<'_>;
}

/// Name/code table of an enum used as a record field.
///
/// This trait is derived by `#[derive(FieldEnum)]` for fieldless enums.
///
/// # Example
///
/// ```
/// use pagesift::{EnumVariant, FieldEnum};
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Created = 0,
///     Approved = 2,
/// }
///
/// impl FieldEnum for Status {
///     const VARIANTS: &'static [EnumVariant] = &[
///         EnumVariant::new("Created", 0),
///         EnumVariant::new("Approved", 2),
///     ];
///
///     fn code(&self) -> i64 {
///         *self as i64
///     }
/// }
///
/// assert_eq!(Status::Approved.code(), 2);
/// ```
pub trait FieldEnum: Sized {
    /// Every defined variant, with its code.
    const VARIANTS: &'static [EnumVariant];

    /// Returns the numeric code of this variant.
    fn code(&self) -> i64;

    /// Returns the variant's name.
    fn name(&self) -> Option<&'static str> {
        let code = self.code();
        Self::VARIANTS
            .iter()
            .find(|v| v.code == code)
            .map(|v| v.name)
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn field_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl FieldValue for &'static str {
    const KIND: ValueKind = ValueKind::String;

    fn field_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

macro_rules! numeric_field {
    ($kind:ident: $($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn field_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

numeric_field!(Integer: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
numeric_field!(Real: f32, f64);

impl FieldValue for Decimal {
    const KIND: ValueKind = ValueKind::Decimal;

    fn field_value(&self) -> Value<'_> {
        Value::Decimal(*self)
    }
}

impl FieldValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::DateTime;

    fn field_value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

impl FieldValue for NaiveDate {
    const KIND: ValueKind = ValueKind::DateTime;

    fn field_value(&self) -> Value<'_> {
        self.and_hms_opt(0, 0, 0).map_or(Value::None, Value::Timestamp)
    }
}

impl FieldValue for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::DateTime;

    fn field_value(&self) -> Value<'_> {
        Value::Timestamp(self.naive_utc())
    }
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Unsupported;

    fn field_value(&self) -> Value<'_> {
        Value::None
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn field_value(&self) -> Value<'_> {
        match self {
            Some(value) => value.field_value(),
            None => Value::None,
        }
    }
}
