//! Pages and paged responses.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::pager::PageRequest;

/// One window of a filtered, sorted view plus pagination metadata.
///
/// `total_count` always counts the whole filtered view, not just `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_count: usize,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Builds a page and derives its metadata from the request.
    ///
    /// Fails with [`SiftError::InvalidPageSize`] when the request's size is 0.
    pub fn new(data: Vec<T>, total_count: usize, request: PageRequest) -> Result<Self> {
        if request.size == 0 {
            return Err(SiftError::InvalidPageSize(0));
        }
        let total_pages = total_count.div_ceil(request.size as usize);
        Ok(Page {
            data,
            total_count,
            page_size: request.size,
            current_page: request.page,
            total_pages,
            has_next: (request.page as usize) < total_pages,
            has_previous: request.page > 1,
        })
    }

    /// Number of records on this page.
    pub fn current_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Converts every row, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Wire form of a [`Page`], with PascalCase keys.
///
/// ```
/// use pagesift::{Page, PageRequest, PagedResponse};
///
/// let page = Page::new(vec!["a", "b"], 5, PageRequest::new(1, 2)).unwrap();
/// let json = serde_json::to_value(PagedResponse::from(page)).unwrap();
///
/// assert_eq!(json["TotalCount"], 5);
/// assert_eq!(json["CurrentCount"], 2);
/// assert_eq!(json["TotalPages"], 3);
/// assert_eq!(json["HasNextPage"], true);
/// assert_eq!(json["HasPreviousPage"], false);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub total_count: usize,
    pub current_count: usize,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> From<Page<T>> for PagedResponse<T> {
    fn from(page: Page<T>) -> Self {
        PagedResponse {
            current_count: page.current_count(),
            data: page.data,
            total_count: page.total_count,
            page_size: page.page_size,
            current_page: page.current_page,
            total_pages: page.total_pages,
            has_next_page: page.has_next,
            has_previous_page: page.has_previous,
        }
    }
}
