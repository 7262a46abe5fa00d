//! The pager: validate, filter, sort, window.
//!
//! [`Pager`] sorts by the record's default sort field, descending, with the
//! primary key (also descending) as a tie-breaker, so every page of the same
//! view is deterministic. It holds no per-request state.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::compile::Filter;
use crate::criteria::SearchCriteria;
use crate::error::{Result, SiftError};
use crate::ordering::OrderBy;
use crate::page::Page;
use crate::traits::Record;
use crate::view::RecordView;

/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A 1-based page number and a page size.
///
/// Deserializes with defaults, so `{}` is page 1 of size 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        PageRequest { page, size }
    }

    /// Number of records to skip: `(page - 1) * size`.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.size as usize)
    }

    /// Checks the request against a pager configuration.
    pub fn validate(&self, config: &PagerConfig) -> Result<()> {
        if self.page == 0 {
            return Err(SiftError::InvalidPage(self.page));
        }
        if self.size == 0 {
            return Err(SiftError::InvalidPageSize(self.size));
        }
        match config.max_page_size {
            Some(max) if self.size > max => Err(SiftError::PageSizeTooLarge {
                size: self.size,
                max,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pager configuration.
///
/// Deserializes with defaults, so hosts can embed it in their own config
/// files and only set what they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Page size applied when a request omits it.
    pub default_page_size: u32,
    /// Largest page size a request may ask for.
    pub max_page_size: Option<u32>,
}

impl PagerConfig {
    /// Builds a request, filling missing values from the configuration.
    pub fn request(&self, page: Option<u32>, size: Option<u32>) -> PageRequest {
        PageRequest {
            page: page.unwrap_or(1),
            size: size.unwrap_or(self.default_page_size),
        }
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        PagerConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
        }
    }
}

/// Pages a record view in the record type's fixed order.
///
/// # Example
///
/// ```
/// use pagesift::{Pager, PageRequest, Record, SearchCriteria};
///
/// #[derive(Record)]
/// #[sift(key = "Id", sort = "Score", rename_all = "PascalCase")]
/// struct Player {
///     id: u32,
///     name: String,
///     score: u32,
/// }
///
/// let players = vec![
///     Player { id: 1, name: "ann".into(), score: 30 },
///     Player { id: 2, name: "bob".into(), score: 50 },
///     Player { id: 3, name: "cat".into(), score: 30 },
/// ];
///
/// let pager = Pager::<Player>::new().unwrap();
/// let page = pager.page(players.as_slice(), PageRequest::new(1, 2)).unwrap();
/// let ids: Vec<u32> = page.data.iter().map(|p| p.id).collect();
/// assert_eq!(ids, vec![2, 3]);
/// assert_eq!(page.total_pages, 2);
///
/// let criteria = SearchCriteria::new().with("Name", "a");
/// let page = pager.search(players.as_slice(), &criteria, PageRequest::default()).unwrap();
/// assert_eq!(page.total_count, 2);
/// ```
pub struct Pager<R> {
    orderings: Vec<OrderBy<R>>,
    config: PagerConfig,
}

impl<R: Record> Pager<R> {
    /// Creates a pager with the default configuration.
    pub fn new() -> Result<Self> {
        Pager::with_config(PagerConfig::default())
    }

    /// Creates a pager with the given configuration.
    ///
    /// Fails if the record's sort or key field is not registered.
    pub fn with_config(config: PagerConfig) -> Result<Self> {
        let registry = R::registry();
        let lookup = |field: &'static str| {
            registry.resolve(field).ok_or(SiftError::UnknownSortField {
                record: registry.record_name(),
                field,
            })
        };

        let sort = lookup(R::DEFAULT_SORT)?;
        let key = lookup(R::PRIMARY_KEY)?;

        let mut orderings = vec![OrderBy::desc(sort)];
        if key.name() != sort.name() {
            orderings.push(OrderBy::desc(key));
        }

        Ok(Pager { orderings, config })
    }

    /// Pages every record in the view.
    pub fn page<'a, V>(&self, view: &'a V, request: PageRequest) -> Result<Page<V::Row<'a>>>
    where
        V: RecordView<R> + ?Sized,
    {
        self.page_filtered(view, &Filter::new(), request)
    }

    /// Compiles `criteria` and pages the matching records.
    pub fn search<'a, V>(
        &self,
        view: &'a V,
        criteria: &SearchCriteria,
        request: PageRequest,
    ) -> Result<Page<V::Row<'a>>>
    where
        V: RecordView<R> + ?Sized,
    {
        let filter = Filter::compile(criteria);
        self.page_filtered(view, &filter, request)
    }

    /// Pages the records matching an already compiled filter.
    pub fn page_filtered<'a, V>(
        &self,
        view: &'a V,
        filter: &Filter<R>,
        request: PageRequest,
    ) -> Result<Page<V::Row<'a>>>
    where
        V: RecordView<R> + ?Sized,
    {
        request.validate(&self.config)?;

        let total_count = view.count(filter);
        let data = view.fetch(
            filter,
            &self.orderings,
            request.offset(),
            request.size as usize,
        );

        trace!(
            record = R::registry().record_name(),
            page = request.page,
            size = request.size,
            total_count,
            returned = data.len(),
            "paged view"
        );
        Page::new(data, total_count, request)
    }
}

impl<R> Pager<R> {
    /// The fixed sort order: default sort field, then primary key.
    pub fn orderings(&self) -> &[OrderBy<R>] {
        &self.orderings
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }
}

impl<R> Clone for Pager<R> {
    fn clone(&self) -> Self {
        Pager {
            orderings: self.orderings.clone(),
            config: self.config,
        }
    }
}

impl<R> std::fmt::Debug for Pager<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("orderings", &self.orderings)
            .field("config", &self.config)
            .finish()
    }
}
