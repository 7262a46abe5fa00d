//! Pagesift - criteria-driven filtering and pagination for typed records.
//!
//! Pagesift takes an untyped search-criteria map (field name → value, usually
//! decoded from a JSON body), turns it into typed predicates over a record
//! type, and returns one deterministic page of the matching records together
//! with pagination metadata.
//!
//! - Field lookup is case-insensitive and driven by a per-type registry,
//!   generated by `#[derive(Record)]`
//! - Criteria for unknown fields, or with values that don't fit the field,
//!   add no constraint instead of failing the request
//! - Pages are sorted by the record's default sort field, descending, with
//!   the primary key as a tie-breaker
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pagesift::{FieldEnum, Pager, PageRequest, PagedResponse, Record, SearchCriteria};
//!
//! #[derive(Debug, Clone, Copy, FieldEnum)]
//! enum Status {
//!     Created = 0,
//!     Approved = 2,
//! }
//!
//! #[derive(Debug, Record)]
//! #[sift(key = "FormID", sort = "DateJoined", rename_all = "PascalCase")]
//! struct Patron {
//!     #[sift(rename = "FormID")]
//!     form_id: u32,
//!     first_name: String,
//!     form_status: Status,
//!     date_joined: Option<NaiveDate>,
//! }
//!
//! let patrons = vec![
//!     Patron {
//!         form_id: 1,
//!         first_name: "John".into(),
//!         form_status: Status::Approved,
//!         date_joined: NaiveDate::from_ymd_opt(2022, 6, 5),
//!     },
//!     Patron {
//!         form_id: 2,
//!         first_name: "Jane".into(),
//!         form_status: Status::Created,
//!         date_joined: NaiveDate::from_ymd_opt(2024, 1, 9),
//!     },
//! ];
//!
//! let criteria = SearchCriteria::from_json(&serde_json::json!({
//!     "firstname": "j",
//!     "FormStatus": "approved",
//!     "Nickname": "ignored",
//! }))
//! .unwrap();
//!
//! let pager = Pager::<Patron>::new().unwrap();
//! let page = pager.search(&patrons, &criteria, PageRequest::default()).unwrap();
//!
//! assert_eq!(page.total_count, 1);
//! assert_eq!(page.data[0].form_id, 1);
//!
//! let response = PagedResponse::from(page.map(|p| p.first_name.clone()));
//! assert_eq!(response.data, vec!["John".to_string()]);
//! ```
//!
//! # Criteria Semantics
//!
//! Entries are ANDed. Within one entry:
//!
//! | Field kind | Single value | List |
//! |------------|--------------|------|
//! | String | case-insensitive contains | OR of contains |
//! | Enum | name, code or numeric string | OR of defined codes |
//! | Integer / Real / Decimal | equality | no constraint |
//! | DateTime | that day (or from that time to end of day) | `[min, max]` range |
//!
//! Accepted date formats are `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SSZ`,
//! `YYYY-MM-DD HH:MM:SS.ffffff` and `YYYY-MM-DD HH:MM:SS.fff`.

// Lets the derive macros refer to `::pagesift` from inside this crate.
extern crate self as pagesift;

mod coerce;
mod compile;
mod criteria;
mod error;
mod op;
mod ordering;
mod page;
mod pager;
mod predicate;
mod registry;
mod traits;
mod value;
mod view;

// Re-export public API
pub use coerce::{coerce, CoercedValue, DateSpan};
pub use compile::{compile, Filter, SkipReason, Skipped};
pub use criteria::{RawValue, Scalar, SearchCriteria};
pub use error::{Result, SiftError};
pub use op::Op;
pub use ordering::{compare_by_orderings, compare_values, Dir, OrderBy};
pub use page::{Page, PagedResponse};
pub use pager::{PageRequest, Pager, PagerConfig, DEFAULT_PAGE_SIZE};
pub use predicate::{build, Clause, ClauseValue, Predicate};
pub use registry::{
    Accessor, EnumVariant, FieldEntry, FieldRegistry, FieldRegistryBuilder, FieldSpec, ValueKind,
};
pub use traits::{FieldEnum, FieldValue, Record};
pub use value::{Number, Value};
pub use view::RecordView;

pub use pagesift_macros::{FieldEnum, Record};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
