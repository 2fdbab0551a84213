//! Collection handles carrying the accessor operations.
//!
//! [`Collection`] works with raw BSON documents; [`TypedCollection`] wraps it
//! and (de)serializes a concrete [`Document`] type at the seam. Both are
//! stateless views over a borrowed backend: constructing one performs no I/O
//! and every operation is independently invokable from concurrent tasks.
//!
//! Result conventions: boolean operations report `false`, not an error, when
//! the underlying modification count does not match the expected value — the
//! caller only sees an `Err` for genuine database faults. Multi-document
//! reads funnel through the pagination policy when a request is present and
//! otherwise run an unbounded find.

use bson::{Bson, Document as RawDocument};
use std::marker::PhantomData;

use crate::{
    backend::DocumentBackend,
    document::{Document, DocumentExt, ID_FIELD},
    error::AccessResult,
    page::{Pagination, paginate},
    query::{Expr, Filter, Query},
    update::UpdateSpec,
};

/// An untyped collection handle over a storage backend.
#[derive(Debug)]
pub struct Collection<'a, B: DocumentBackend> {
    name: String,
    backend: &'a B,
}

impl<'a, B: DocumentBackend> Collection<'a, B> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the document whose `id` field equals `id`, or `None`.
    pub async fn get_by_id(&self, id: &str) -> AccessResult<Option<RawDocument>> {
        self.backend
            .find_one(&Filter::eq(ID_FIELD, id), &self.name)
            .await
    }

    /// Returns the first document whose `field` equals `value`, or `None`.
    ///
    /// No ordering guarantee when several documents match.
    pub async fn get_by(
        &self,
        field: &str,
        value: impl Into<Bson>,
    ) -> AccessResult<Option<RawDocument>> {
        self.backend
            .find_one(&Filter::eq(field, value), &self.name)
            .await
    }

    /// Returns all documents whose `field` equals `value`, optionally
    /// paginated.
    pub async fn get_all_by(
        &self,
        field: &str,
        value: impl Into<Bson>,
        pagination: Option<&Pagination>,
    ) -> AccessResult<Vec<RawDocument>> {
        self.find_all(Some(Filter::eq(field, value)), pagination)
            .await
    }

    /// Returns every document in the collection, optionally paginated.
    pub async fn get_all_from(
        &self,
        pagination: Option<&Pagination>,
    ) -> AccessResult<Vec<RawDocument>> {
        self.find_all(None, pagination).await
    }

    /// Returns all documents matching `filter`, optionally paginated.
    pub async fn get_all_where(
        &self,
        filter: Expr,
        pagination: Option<&Pagination>,
    ) -> AccessResult<Vec<RawDocument>> {
        self.find_all(Some(filter), pagination).await
    }

    async fn find_all(
        &self,
        filter: Option<Expr>,
        pagination: Option<&Pagination>,
    ) -> AccessResult<Vec<RawDocument>> {
        if let Some(items) =
            paginate(self.backend, &self.name, filter.clone(), pagination).await?
        {
            return Ok(items);
        }

        self.backend
            .find(Query { filter, order: None, limit: None }, &self.name)
            .await
    }

    /// Adds a new document with `id`, upserting over any existing one.
    ///
    /// Delegates to [`update_document`](Self::update_document), discarding
    /// the outcome.
    pub async fn add_document(&self, id: &str, data: RawDocument) -> AccessResult<()> {
        self.update_document(id, data).await?;

        Ok(())
    }

    /// Merges `data` into the document with `id`, creating it if absent.
    ///
    /// Returns whether a document was modified or created; a no-op write
    /// (identical values) reports `false`.
    pub async fn update_document(&self, id: &str, data: RawDocument) -> AccessResult<bool> {
        let outcome = self
            .backend
            .update_one(
                &Filter::eq(ID_FIELD, id),
                &UpdateSpec::set(data),
                true,
                &self.name,
            )
            .await?;

        Ok(outcome.modified > 0 || outcome.upserted > 0)
    }

    /// Sets `field` to `value` on the document with `id`.
    ///
    /// Returns whether exactly one document was modified; `false` when the
    /// document does not exist or already holds the value.
    pub async fn update_field(
        &self,
        id: &str,
        field: &str,
        value: impl Into<Bson>,
    ) -> AccessResult<bool> {
        self.update_matching(&Filter::eq(ID_FIELD, id), UpdateSpec::set_field(field, value))
            .await
    }

    /// Sets `field` to `value` on the first document matching `filter`.
    ///
    /// Returns whether exactly one document was modified.
    pub async fn update_where(
        &self,
        filter: Expr,
        field: &str,
        value: impl Into<Bson>,
    ) -> AccessResult<bool> {
        self.update_matching(&filter, UpdateSpec::set_field(field, value))
            .await
    }

    /// Removes `field` from the document with `id`. The document itself is
    /// not deleted.
    ///
    /// Returns whether exactly one document was modified.
    pub async fn delete_field(&self, id: &str, field: &str) -> AccessResult<bool> {
        self.update_matching(&Filter::eq(ID_FIELD, id), UpdateSpec::unset(field))
            .await
    }

    /// Increments `field` by `delta` on the document with `id`, upserting
    /// the document (and creating the field at `delta`) when absent.
    ///
    /// Returns whether exactly one existing document was modified; an upsert
    /// that creates the document reports `false`.
    pub async fn increment_field(
        &self,
        id: &str,
        field: &str,
        delta: i64,
    ) -> AccessResult<bool> {
        let outcome = self
            .backend
            .update_one(
                &Filter::eq(ID_FIELD, id),
                &UpdateSpec::inc(field, delta),
                true,
                &self.name,
            )
            .await?;

        Ok(outcome.modified == 1)
    }

    async fn update_matching(&self, filter: &Expr, update: UpdateSpec) -> AccessResult<bool> {
        let outcome = self
            .backend
            .update_one(filter, &update, false, &self.name)
            .await?;

        Ok(outcome.modified == 1)
    }

    /// Deletes the document with `id`.
    ///
    /// Returns whether exactly one document was deleted; `false` on a repeat
    /// call for an already-deleted id.
    pub async fn delete_document(&self, id: &str) -> AccessResult<bool> {
        self.delete_document_by(Filter::eq(ID_FIELD, id)).await
    }

    /// Deletes the first document matching `filter`.
    ///
    /// Returns whether exactly one document was deleted.
    pub async fn delete_document_by(&self, filter: Expr) -> AccessResult<bool> {
        let deleted = self.backend.delete_one(&filter, &self.name).await?;

        Ok(deleted == 1)
    }

    /// Drops the entire collection. Returns `true` on success; faults
    /// propagate as errors.
    pub async fn delete_collection(&self) -> AccessResult<bool> {
        self.backend.drop_collection(&self.name).await?;

        Ok(true)
    }
}

/// A typed collection handle for a specific [`Document`] type.
///
/// Delegates to an untyped [`Collection`], converting documents at the seam.
#[derive(Debug)]
pub struct TypedCollection<'a, B: DocumentBackend, D: Document> {
    inner: Collection<'a, B>,
    _marker: PhantomData<D>,
}

impl<'a, B: DocumentBackend, D: Document> TypedCollection<'a, B, D> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self {
            inner: Collection::new(name, backend),
            _marker: PhantomData,
        }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Returns the document whose `id` field equals `id`, or `None`.
    pub async fn get_by_id(&self, id: &str) -> AccessResult<Option<D>> {
        self.inner
            .get_by_id(id)
            .await?
            .map(D::from_document)
            .transpose()
    }

    /// Returns the first document whose `field` equals `value`, or `None`.
    pub async fn get_by(&self, field: &str, value: impl Into<Bson>) -> AccessResult<Option<D>> {
        self.inner
            .get_by(field, value)
            .await?
            .map(D::from_document)
            .transpose()
    }

    /// Returns all documents whose `field` equals `value`, optionally
    /// paginated.
    pub async fn get_all_by(
        &self,
        field: &str,
        value: impl Into<Bson>,
        pagination: Option<&Pagination>,
    ) -> AccessResult<Vec<D>> {
        self.inner
            .get_all_by(field, value, pagination)
            .await?
            .into_iter()
            .map(D::from_document)
            .collect()
    }

    /// Returns every document in the collection, optionally paginated.
    pub async fn get_all_from(&self, pagination: Option<&Pagination>) -> AccessResult<Vec<D>> {
        self.inner
            .get_all_from(pagination)
            .await?
            .into_iter()
            .map(D::from_document)
            .collect()
    }

    /// Returns all documents matching `filter`, optionally paginated.
    pub async fn get_all_where(
        &self,
        filter: Expr,
        pagination: Option<&Pagination>,
    ) -> AccessResult<Vec<D>> {
        self.inner
            .get_all_where(filter, pagination)
            .await?
            .into_iter()
            .map(D::from_document)
            .collect()
    }

    /// Adds a new document, upserting over any existing one with the same
    /// id.
    pub async fn add_document(&self, document: &D) -> AccessResult<()> {
        self.inner
            .add_document(document.id(), document.to_document()?)
            .await
    }

    /// Merges the document's fields into the stored document with the same
    /// id, creating it if absent.
    pub async fn update_document(&self, document: &D) -> AccessResult<bool> {
        self.inner
            .update_document(document.id(), document.to_document()?)
            .await
    }

    /// Sets `field` to `value` on the document with `id`.
    pub async fn update_field(
        &self,
        id: &str,
        field: &str,
        value: impl Into<Bson>,
    ) -> AccessResult<bool> {
        self.inner.update_field(id, field, value).await
    }

    /// Sets `field` to `value` on the first document matching `filter`.
    pub async fn update_where(
        &self,
        filter: Expr,
        field: &str,
        value: impl Into<Bson>,
    ) -> AccessResult<bool> {
        self.inner.update_where(filter, field, value).await
    }

    /// Removes `field` from the document with `id`.
    pub async fn delete_field(&self, id: &str, field: &str) -> AccessResult<bool> {
        self.inner.delete_field(id, field).await
    }

    /// Increments `field` by `delta` on the document with `id`, upserting
    /// when absent.
    pub async fn increment_field(
        &self,
        id: &str,
        field: &str,
        delta: i64,
    ) -> AccessResult<bool> {
        self.inner.increment_field(id, field, delta).await
    }

    /// Deletes the document with `id`.
    pub async fn delete_document(&self, id: &str) -> AccessResult<bool> {
        self.inner.delete_document(id).await
    }

    /// Deletes the first document matching `filter`.
    pub async fn delete_document_by(&self, filter: Expr) -> AccessResult<bool> {
        self.inner.delete_document_by(filter).await
    }

    /// Drops the entire collection.
    pub async fn delete_collection(&self) -> AccessResult<bool> {
        self.inner.delete_collection().await
    }
}
