//! The patron service: owns the dataset and answers paged searches.

use pagesift::{PageRequest, PagedResponse, Pager, PagerConfig, Result, SearchCriteria};
use tracing::debug;

use crate::model::ExternalPatron;

pub struct PatronService {
    patrons: Vec<ExternalPatron>,
    pager: Pager<ExternalPatron>,
}

impl PatronService {
    pub fn new(patrons: Vec<ExternalPatron>) -> Result<Self> {
        PatronService::with_config(patrons, PagerConfig::default())
    }

    pub fn with_config(patrons: Vec<ExternalPatron>, config: PagerConfig) -> Result<Self> {
        Ok(PatronService {
            patrons,
            pager: Pager::with_config(config)?,
        })
    }

    pub fn patrons(&self) -> &[ExternalPatron] {
        &self.patrons
    }

    pub fn config(&self) -> &PagerConfig {
        self.pager.config()
    }

    /// One page of every patron.
    pub fn get_all(&self, request: PageRequest) -> Result<PagedResponse<ExternalPatron>> {
        let page = self.pager.page(self.patrons.as_slice(), request)?;
        Ok(PagedResponse::from(page.map(Clone::clone)))
    }

    /// One page of the patrons matching `criteria`.
    ///
    /// Empty criteria are the same as [`PatronService::get_all`].
    pub fn filter(
        &self,
        criteria: &SearchCriteria,
        request: PageRequest,
    ) -> Result<PagedResponse<ExternalPatron>> {
        if criteria.is_empty() {
            return self.get_all(request);
        }

        debug!(
            criteria = criteria.len(),
            page = request.page,
            size = request.size,
            "filtering patrons"
        );
        let page = self.pager.search(self.patrons.as_slice(), criteria, request)?;
        Ok(PagedResponse::from(page.map(Clone::clone)))
    }
}
