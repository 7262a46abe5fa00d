//! Derive macros for Pagesift.
//!
//! - [`Record`] - Generate the field registry and sort order of a record type
//! - [`FieldEnum`] - Generate the name/code table of an enum used as a field
//!
//! Both macros emit paths under `::pagesift`, so use them through the
//! re-exports in the `pagesift` crate.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for a struct with named fields.
///
/// Every field whose type implements `FieldValue` becomes searchable. The
/// field's kind (string, integer, real, decimal, enum, date-time) is taken
/// from its declared type; `Option<T>` fields are nullable.
///
/// # Struct Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `key = "..."` | Primary key field (required). Breaks ties in sorting |
/// | `sort = "..."` | Default sort field, always descending (defaults to `key`) |
/// | `rename_all = "..."` | `PascalCase`, `camelCase`, `snake_case` or `SCREAMING_SNAKE_CASE` |
///
/// `key` and `sort` name fields by their criteria name, ignoring case.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Leave the field out of the registry |
/// | `rename = "..."` | Use a custom name for criteria lookups |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Patron::FIRST_NAME`, `Patron::DATE_JOINED`)
/// 2. An implementation of `Record`, with a registry built on first use
///
/// # Example
///
/// ```ignore
/// use chrono::NaiveDate;
/// use pagesift::{Pager, PageRequest, Record, SearchCriteria};
///
/// #[derive(Record)]
/// #[sift(key = "FormID", sort = "DateJoined", rename_all = "PascalCase")]
/// struct Patron {
///     #[sift(rename = "FormID")]
///     form_id: u32,
///     first_name: String,
///     date_joined: Option<NaiveDate>,
///     #[sift(skip)]
///     internal_notes: String,
/// }
///
/// let criteria = SearchCriteria::new().with(Patron::FIRST_NAME, "jan");
/// let pager = Pager::<Patron>::new()?;
/// let page = pager.search(&patrons, &criteria, PageRequest::default())?;
/// ```
#[proc_macro_derive(Record, attributes(sift))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives `FieldEnum` and `FieldValue` for a fieldless enum.
///
/// Each variant is registered under its name (or `#[sift(rename = "...")]`)
/// with its discriminant as the numeric code, so criteria may name a variant
/// either way.
///
/// # Example
///
/// ```ignore
/// use pagesift::FieldEnum;
///
/// #[derive(Debug, Clone, Copy, FieldEnum)]
/// enum Status {
///     Created = 0,
///     PendingApproval = 1,
///     Approved = 2,
///     Rejected = 4,
/// }
///
/// assert_eq!(Status::Rejected.code(), 4);
/// assert_eq!(Status::VARIANTS.len(), 4);
/// ```
#[proc_macro_derive(FieldEnum, attributes(sift))]
pub fn field_enum_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::field_enum_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
