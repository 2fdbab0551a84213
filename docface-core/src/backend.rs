//! Storage backend abstraction for the accessor layer.
//!
//! [`DocumentBackend`] captures exactly the driver capabilities the accessor
//! needs: single-document lookup, filtered retrieval with natural-order
//! sort and limit, targeted update with optional upsert, targeted delete,
//! collection drop, and resolution of a document's internal sequence
//! position for pagination anchoring.
//!
//! Implementations must be thread-safe (`Send + Sync`); the accessor itself
//! holds no locks and no mutable shared state, so every call is independently
//! invokable from concurrent tasks. Ordering between concurrent operations is
//! whatever the backend provides for single-document operations.

use async_trait::async_trait;
use bson::Document as RawDocument;
use std::fmt::Debug;

use crate::{
    error::AccessResult,
    query::{Expr, Query, SequenceToken},
    update::UpdateSpec,
};

/// Counts reported by a targeted update.
///
/// `modified` counts documents that actually changed: matching a document but
/// writing identical values reports zero, mirroring driver semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpdateOutcome {
    /// Number of existing documents whose content changed.
    pub modified: u64,
    /// Number of documents created by an upsert (0 or 1).
    pub upserted: u64,
}

/// Abstract interface over one document store.
///
/// All methods are async, non-blocking calls into the backing database.
/// There is no cancellation, timeout, retry, or pooling at this level; a call
/// either resolves with a result or fails with an
/// [`AccessError`](crate::error::AccessError), with no partial-progress state
/// to clean up.
#[async_trait]
pub trait DocumentBackend: Send + Sync + Debug {
    /// Returns the first document matching `filter`, or `None`.
    ///
    /// "First" carries no ordering guarantee when several documents match.
    async fn find_one(
        &self,
        filter: &Expr,
        collection: &str,
    ) -> AccessResult<Option<RawDocument>>;

    /// Returns all documents matching the query, honoring its natural-order
    /// sort direction and limit.
    async fn find(&self, query: Query, collection: &str) -> AccessResult<Vec<RawDocument>>;

    /// Applies `update` to the first document matching `filter`.
    ///
    /// With `upsert` set, a missing match creates a new document seeded from
    /// the filter's equality fields before the update is applied.
    async fn update_one(
        &self,
        filter: &Expr,
        update: &UpdateSpec,
        upsert: bool,
        collection: &str,
    ) -> AccessResult<UpdateOutcome>;

    /// Deletes the first document matching `filter`, returning the deleted
    /// count (0 or 1).
    async fn delete_one(&self, filter: &Expr, collection: &str) -> AccessResult<u64>;

    /// Drops the collection and all its documents. Dropping a collection
    /// that does not exist is not an error.
    async fn drop_collection(&self, collection: &str) -> AccessResult<()>;

    /// Resolves the internal sequence position of the document whose `id`
    /// field equals `id`, or `None` if no such document exists.
    ///
    /// This is the hook the pagination anchor mechanism uses; the token is
    /// only ever fed back into
    /// [`Expr::SequenceBefore`](crate::query::Expr::SequenceBefore).
    async fn sequence_token(
        &self,
        id: &str,
        collection: &str,
    ) -> AccessResult<Option<SequenceToken>>;
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait BackendBuilder {
    type Backend: DocumentBackend;

    async fn build(self) -> AccessResult<Self::Backend>;
}
