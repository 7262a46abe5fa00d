//! Field registry: the per-record-type table of searchable fields.
//!
//! A [`FieldRegistry`] maps field names to a [`FieldSpec`] and a typed
//! accessor. It is built once per record type, normally by
//! `#[derive(Record)]`, and resolves names case-insensitively.

use std::fmt;

use crate::traits::FieldValue;
use crate::value::Value;

/// Accessor function extracting one field from a record.
pub type Accessor<R> = for<'a> fn(&'a R) -> Value<'a>;

/// One named variant of an enum field, with its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumVariant {
    pub name: &'static str,
    pub code: i64,
}

impl EnumVariant {
    pub const fn new(name: &'static str, code: i64) -> Self {
        EnumVariant { name, code }
    }
}

/// The value kind of a field, derived from its declared Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Text. Searched with case-insensitive containment.
    String,
    /// Any signed or unsigned integer width.
    Integer,
    /// `f32` / `f64`.
    Real,
    /// Fixed-point decimal.
    Decimal,
    /// Enum, with the table of its defined variants.
    Enum(&'static [EnumVariant]),
    /// Date and time.
    DateTime,
    /// Registered but never filtered on.
    Unsupported,
}

impl ValueKind {
    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Real => "real",
            ValueKind::Decimal => "decimal",
            ValueKind::Enum(_) => "enum",
            ValueKind::DateTime => "datetime",
            ValueKind::Unsupported => "unsupported",
        }
    }

    /// Returns `true` for the three numeric kinds.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueKind::Integer | ValueKind::Real | ValueKind::Decimal
        )
    }

    /// Looks up an enum variant by code. Always `None` for non-enum kinds.
    pub fn variant_by_code(self, code: i64) -> Option<&'static EnumVariant> {
        match self {
            ValueKind::Enum(variants) => variants.iter().find(|v| v.code == code),
            _ => None,
        }
    }

    /// Looks up an enum variant by name, ignoring ASCII case.
    pub fn variant_by_name(self, name: &str) -> Option<&'static EnumVariant> {
        match self {
            ValueKind::Enum(variants) => variants
                .iter()
                .find(|v| v.name.eq_ignore_ascii_case(name)),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name used in search criteria.
    pub name: &'static str,
    /// The value kind.
    pub kind: ValueKind,
    /// Whether the field may hold null.
    pub nullable: bool,
}

impl FieldSpec {
    /// Builds the spec for a field of Rust type `T`.
    pub fn of<T: FieldValue + ?Sized>(name: &'static str) -> Self {
        FieldSpec {
            name,
            kind: T::KIND,
            nullable: T::NULLABLE,
        }
    }
}

/// A registered field: its spec plus the accessor that reads it.
pub struct FieldEntry<R> {
    spec: FieldSpec,
    accessor: Accessor<R>,
}

impl<R> FieldEntry<R> {
    pub fn new(spec: FieldSpec, accessor: Accessor<R>) -> Self {
        FieldEntry { spec, accessor }
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn kind(&self) -> ValueKind {
        self.spec.kind
    }

    pub fn accessor(&self) -> Accessor<R> {
        self.accessor
    }

    /// Reads this field from a record.
    pub fn value<'a>(&self, record: &'a R) -> Value<'a> {
        (self.accessor)(record)
    }
}

impl<R> Clone for FieldEntry<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldEntry<R> {}

impl<R> fmt::Debug for FieldEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEntry")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// The searchable fields of one record type.
///
/// # Example
///
/// ```
/// use pagesift::{FieldRegistry, Value, ValueKind};
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
///
/// let entry = registry.resolve("firstname").unwrap();
/// assert_eq!(entry.kind(), ValueKind::String);
/// assert!(registry.resolve("LastName").is_none());
/// ```
pub struct FieldRegistry<R> {
    record: &'static str,
    fields: Vec<FieldEntry<R>>,
}

impl<R> FieldRegistry<R> {
    /// Starts a registry for the record type called `record`.
    pub fn builder(record: &'static str) -> FieldRegistryBuilder<R> {
        FieldRegistryBuilder {
            record,
            fields: Vec::new(),
        }
    }

    /// Resolves a field by name, ignoring ASCII case.
    pub fn resolve(&self, name: &str) -> Option<&FieldEntry<R>> {
        self.fields
            .iter()
            .find(|entry| entry.name().eq_ignore_ascii_case(name))
    }

    /// The record type name, for diagnostics.
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    pub fn fields(&self) -> &[FieldEntry<R>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R> fmt::Debug for FieldRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("record", &self.record)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder for [`FieldRegistry`].
pub struct FieldRegistryBuilder<R> {
    record: &'static str,
    fields: Vec<FieldEntry<R>>,
}

impl<R> FieldRegistryBuilder<R> {
    /// Registers a field of Rust type `T`; its kind comes from [`FieldValue`].
    pub fn field<T: FieldValue + ?Sized>(self, name: &'static str, accessor: Accessor<R>) -> Self {
        self.entry(FieldSpec::of::<T>(name), accessor)
    }

    /// Registers a field with an explicit spec.
    pub fn entry(mut self, spec: FieldSpec, accessor: Accessor<R>) -> Self {
        self.fields.push(FieldEntry::new(spec, accessor));
        self
    }

    /// Finishes the registry.
    ///
    /// # Panics
    ///
    /// Panics when two fields share a name (ignoring case), since lookups
    /// could never reach the second one.
    pub fn build(self) -> FieldRegistry<R> {
        for (i, entry) in self.fields.iter().enumerate() {
            let duplicate = self.fields[..i]
                .iter()
                .any(|earlier| earlier.name().eq_ignore_ascii_case(entry.name()));
            assert!(
                !duplicate,
                "record `{}` registers field `{}` twice",
                self.record,
                entry.name()
            );
        }

        FieldRegistry {
            record: self.record,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    struct Item {
        name: String,
        count: Option<u16>,
    }

    fn item_name(item: &Item) -> Value<'_> {
        Value::String(&item.name)
    }

    fn item_count(item: &Item) -> Value<'_> {
        item.count.field_value()
    }

    fn registry() -> FieldRegistry<Item> {
        FieldRegistry::builder("Item")
            .field::<String>("Name", item_name)
            .field::<Option<u16>>("Count", item_count)
            .build()
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let registry = registry();
        assert_eq!(registry.resolve("name").map(|e| e.name()), Some("Name"));
        assert_eq!(registry.resolve("NAME").map(|e| e.name()), Some("Name"));
        assert_eq!(registry.resolve("count").map(|e| e.name()), Some("Count"));
    }

    #[test]
    fn resolve_requires_exact_name() {
        let registry = registry();
        assert!(registry.resolve("nam").is_none());
        assert!(registry.resolve("names").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn specs_follow_declared_types() {
        let registry = registry();
        let count = registry.resolve("Count").unwrap();
        assert_eq!(count.kind(), ValueKind::Integer);
        assert!(count.spec().nullable);

        let name = registry.resolve("Name").unwrap();
        assert_eq!(name.kind(), ValueKind::String);
        assert!(!name.spec().nullable);
    }

    #[test]
    fn entry_reads_record() {
        let registry = registry();
        let item = Item {
            name: "widget".into(),
            count: Some(3),
        };
        let empty = Item {
            name: String::new(),
            count: None,
        };
        let count = registry.resolve("count").unwrap();
        assert_eq!(count.value(&item), Value::Number(Number::U64(3)));
        assert_eq!(count.value(&empty), Value::None);
    }

    #[test]
    #[should_panic(expected = "registers field `name` twice")]
    fn duplicate_names_are_rejected() {
        FieldRegistry::<Item>::builder("Item")
            .field::<String>("Name", item_name)
            .field::<String>("name", item_name)
            .build();
    }

    #[test]
    fn enum_variant_lookup() {
        const VARIANTS: &[EnumVariant] =
            &[EnumVariant::new("Open", 0), EnumVariant::new("Closed", 4)];
        let kind = ValueKind::Enum(VARIANTS);
        assert_eq!(kind.variant_by_code(4).map(|v| v.name), Some("Closed"));
        assert_eq!(kind.variant_by_name("open").map(|v| v.code), Some(0));
        assert!(kind.variant_by_code(1).is_none());
        assert!(ValueKind::String.variant_by_code(0).is_none());
    }
}
