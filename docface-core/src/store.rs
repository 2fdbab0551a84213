//! Store entry point binding a backend to collection handles.

use crate::{
    backend::DocumentBackend,
    collection::{Collection, TypedCollection},
    document::Document,
};

/// A document store bound to a specific backend implementation.
///
/// The store owns the backend and hands out borrowed collection handles;
/// it has no state of its own beyond the backend.
///
/// # Example
///
/// ```ignore
/// let store = DocumentStore::new(backend);
/// let users = store.collection("users");
/// ```
#[derive(Debug)]
pub struct DocumentStore<B: DocumentBackend> {
    backend: B,
}

impl<B: DocumentBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns an untyped handle to the named collection.
    pub fn collection<'a>(&'a self, name: &str) -> Collection<'a, B> {
        Collection::new(name.to_string(), &self.backend)
    }

    /// Returns a typed handle for the document type's collection.
    ///
    /// The collection name comes from
    /// [`Document::collection_name`](crate::document::Document::collection_name).
    pub fn typed_collection<'a, D: Document>(&'a self) -> TypedCollection<'a, B, D> {
        TypedCollection::new(D::collection_name().to_string(), &self.backend)
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
