//! Error types for the pagesift crate.

use thiserror::Error;

/// Errors that can occur when parsing criteria or paging a view.
///
/// Bad criteria values never produce an error: an unknown field or a value
/// that cannot be coerced simply adds no constraint. Only malformed requests
/// and broken record definitions are reported.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Page numbers start at 1.
    #[error("page number must be at least 1, got {0}")]
    InvalidPage(u32),

    /// Page size must be positive.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(u32),

    /// Page size exceeds the configured maximum.
    #[error("page size {size} exceeds the maximum of {max}")]
    PageSizeTooLarge { size: u32, max: u32 },

    /// Criteria body was valid JSON but not an object.
    #[error("search criteria must be a JSON object, got {0}")]
    CriteriaNotObject(&'static str),

    /// Criteria body was not valid JSON.
    #[error("invalid criteria JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The record's sort or key field is not in its registry.
    #[error("record `{record}` has no field `{field}` to sort by")]
    UnknownSortField {
        record: &'static str,
        field: &'static str,
    },
}

/// Result type for pagesift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
