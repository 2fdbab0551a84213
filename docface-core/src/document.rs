//! Traits for typed documents and their serialization.

use bson::{Document as RawDocument, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::{AccessError, AccessResult};

/// Name of the caller-facing identity field on every document.
///
/// The `id` field is the sole identity the accessor exposes; the backing
/// store's internal sequence identifier never leaves the backend.
pub const ID_FIELD: &str = "id";

/// Trait for types stored as documents through a typed collection.
///
/// # Example
///
/// ```ignore
/// use docface_core::document::Document;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct User {
///     pub id: String,
///     pub name: String,
/// }
///
/// impl Document for User {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn collection_name() -> &'static str {
///         "users"
///     }
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns this document's identity, unique within its collection.
    fn id(&self) -> &str;

    /// Returns the name of the collection this document belongs to.
    fn collection_name() -> &'static str;
}

/// Extension trait providing conversion utilities for documents.
///
/// Automatically implemented for every [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to its stored BSON representation.
    fn to_document(&self) -> AccessResult<RawDocument>;

    /// Reconstructs a document from its stored BSON representation.
    fn from_document(document: RawDocument) -> AccessResult<Self>;

    /// Converts this document to a JSON value.
    fn to_json(&self) -> AccessResult<Value>;

    /// Reconstructs a document from a JSON value.
    fn from_json(value: Value) -> AccessResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_document(&self) -> AccessResult<RawDocument> {
        match serialize_to_bson(self)? {
            bson::Bson::Document(document) => Ok(document),
            _ => Err(AccessError::Serialization(
                "document types must serialize to a map".to_string(),
            )),
        }
    }

    fn from_document(document: RawDocument) -> AccessResult<Self> {
        Ok(deserialize_from_bson(bson::Bson::Document(document))?)
    }

    fn to_json(&self) -> AccessResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> AccessResult<Self> {
        Ok(from_value(value)?)
    }
}
