//! Cursor-style pagination over natural insertion order.
//!
//! A [`Pagination`] request bounds and orders a multi-document read: results
//! come back in natural insertion order (ascending for
//! [`Direction::First`], descending for [`Direction::Last`]), limited to the
//! page size, and optionally restricted to documents strictly before an
//! anchor document's internal sequence position.
//!
//! Anchoring on the store's own insertion-order bookkeeping gives "next page
//! after X" pagination without a dedicated monotonic field on every document
//! schema, at the cost of natural order being an implementation detail of
//! the backing store.

use serde::{Deserialize, Serialize};

use crate::{
    backend::DocumentBackend,
    error::AccessResult,
    query::{Expr, Query, SortDirection},
};
use bson::Document as RawDocument;

/// Page size used when a request leaves `count` at zero.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Which end of the collection a page is taken from.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Page from the start of the collection (natural order ascending).
    #[default]
    First,
    /// Page from the end of the collection (natural order descending).
    Last,
}

/// A pagination request.
///
/// `count` of zero is treated as absent and replaced by
/// [`DEFAULT_PAGE_SIZE`]; an explicitly empty page cannot be requested
/// through this path.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Pagination {
    /// Which end of the collection to page from.
    pub direction: Direction,
    /// Id of a document bounding the result set: only documents strictly
    /// before it in natural insertion order are returned. An anchor that
    /// names no existing document is silently ignored.
    pub anchor: Option<String>,
    /// Requested page size; zero means [`DEFAULT_PAGE_SIZE`].
    pub count: usize,
}

impl Pagination {
    /// A request for the first page in natural order.
    pub fn first() -> Self {
        Self { direction: Direction::First, ..Default::default() }
    }

    /// A request for the last page, in reverse natural order.
    pub fn last() -> Self {
        Self { direction: Direction::Last, ..Default::default() }
    }

    /// Bounds the page to documents strictly before the document with the
    /// given id.
    pub fn with_anchor(mut self, id: impl Into<String>) -> Self {
        self.anchor = Some(id.into());
        self
    }

    /// Sets the page size. Zero falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// The effective page size for this request.
    pub fn page_size(&self) -> usize {
        if self.count == 0 { DEFAULT_PAGE_SIZE } else { self.count }
    }
}

/// Runs the pagination policy for a multi-document read.
///
/// Returns `Ok(None)` when no pagination was requested, signalling the
/// caller to execute its normal unbounded path. An anchor id that resolves
/// to no document leaves the filter untouched rather than erroring.
pub(crate) async fn paginate<B: DocumentBackend>(
    backend: &B,
    collection: &str,
    filter: Option<Expr>,
    pagination: Option<&Pagination>,
) -> AccessResult<Option<Vec<RawDocument>>> {
    let Some(pagination) = pagination else {
        return Ok(None);
    };

    let mut filter = filter;

    if let Some(anchor) = &pagination.anchor {
        if let Some(token) = backend.sequence_token(anchor, collection).await? {
            let bound = Expr::SequenceBefore(token);
            filter = Some(match filter {
                Some(expr) => expr.and(bound),
                None => bound,
            });
        }
    }

    let order = match pagination.direction {
        Direction::Last => SortDirection::Desc,
        Direction::First => SortDirection::Asc,
    };

    let items = backend
        .find(
            Query {
                filter,
                order: Some(order),
                limit: Some(pagination.page_size()),
            },
            collection,
        )
        .await?;

    Ok(Some(items))
}
