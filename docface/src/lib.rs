//! Main docface crate: a thin accessor layer over document database
//! collections.
//!
//! This crate is the primary entry point for users of docface. It re-exports
//! the accessor API from the core crate and provides the storage backends:
//! the in-memory store, and MongoDB behind the `mongodb` feature.
//!
//! Every operation is a stateless adapter over one backend call. Real
//! database faults propagate as errors; "no matching document" and "nothing
//! changed" are normal return values (`false`, `None`, or an empty vec).
//!
//! # Quick Start
//!
//! ```ignore
//! use docface::{prelude::*, memory::InMemoryStore};
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() -> AccessResult<()> {
//!     let store = DocumentStore::new(InMemoryStore::new());
//!     let users = store.collection("users");
//!
//!     // Upsert a document, keyed by its caller-facing id.
//!     users.add_document("alice", doc! { "name": "Alice", "points": 10 }).await?;
//!
//!     // Field-level operations report whether exactly one document changed.
//!     assert!(users.update_field("alice", "name", "Alice A.").await?);
//!     assert!(users.increment_field("alice", "points", 5).await?);
//!
//!     // Cursor-style pagination over natural insertion order.
//!     let page = users
//!         .get_all_from(Some(&Pagination::first().with_count(20)))
//!         .await?;
//!     assert_eq!(page.len(), 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Typed collections
//!
//! Documents can also be read and written as concrete types:
//!
//! ```ignore
//! use docface::{prelude::*, memory::InMemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Document)]
//! #[document(collection = "users")]
//! pub struct User {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! # async fn example() -> AccessResult<()> {
//! let store = DocumentStore::new(InMemoryStore::new());
//! let users = store.typed_collection::<User>();
//!
//! let user = User { id: "alice".into(), name: "Alice".into() };
//! users.add_document(&user).await?;
//!
//! let found: Option<User> = users.get_by_id("alice").await?;
//! # Ok(()) }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - in-memory storage for development and testing
//! - [`mongodb`] - persistent MongoDB backend (requires the `mongodb`
//!   feature)

pub mod prelude;

pub use docface_core::{backend, collection, document, error, page, query, store, update};

pub use docface_macros::Document;

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend.
pub mod memory {
    pub use docface_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docface_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
