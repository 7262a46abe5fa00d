//! Storage views.
//!
//! A [`RecordView`] is whatever the pager reads from: it can count the
//! records matching a [`Filter`] and fetch one sorted window of them. The
//! in-memory implementation evaluates predicates directly; a database
//! adapter would walk the filter's predicate tree and its orderings and
//! translate them into its own query language.

use crate::compile::Filter;
use crate::ordering::{compare_by_orderings, OrderBy};

/// A filterable, orderable collection of records.
pub trait RecordView<R> {
    /// The row type handed back by [`RecordView::fetch`].
    type Row<'a>
    where
        Self: 'a;

    /// Counts the records matching `filter`, ignoring paging.
    fn count(&self, filter: &Filter<R>) -> usize;

    /// Fetches records matching `filter`, sorted by `orderings`, skipping
    /// `offset` and returning at most `limit`.
    fn fetch<'a>(
        &'a self,
        filter: &Filter<R>,
        orderings: &[OrderBy<R>],
        offset: usize,
        limit: usize,
    ) -> Vec<Self::Row<'a>>;
}

impl<R> RecordView<R> for [R] {
    type Row<'a>
        = &'a R
    where
        Self: 'a;

    fn count(&self, filter: &Filter<R>) -> usize {
        filter.count(self)
    }

    fn fetch<'a>(
        &'a self,
        filter: &Filter<R>,
        orderings: &[OrderBy<R>],
        offset: usize,
        limit: usize,
    ) -> Vec<&'a R> {
        let mut rows = filter.apply(self);
        // Stable, so records equal on every ordering keep storage order
        rows.sort_by(|a, b| compare_by_orderings(*a, *b, orderings));
        rows.into_iter().skip(offset).take(limit).collect()
    }
}

impl<R> RecordView<R> for Vec<R> {
    type Row<'a>
        = &'a R
    where
        Self: 'a;

    fn count(&self, filter: &Filter<R>) -> usize {
        self.as_slice().count(filter)
    }

    fn fetch<'a>(
        &'a self,
        filter: &Filter<R>,
        orderings: &[OrderBy<R>],
        offset: usize,
        limit: usize,
    ) -> Vec<&'a R> {
        self.as_slice().fetch(filter, orderings, offset, limit)
    }
}
