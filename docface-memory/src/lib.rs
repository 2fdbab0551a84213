//! In-memory backend for docface.
//!
//! This crate implements [`DocumentBackend`](docface_core::backend::DocumentBackend)
//! entirely in memory, with async-aware read-write locking and faithful
//! driver semantics for modification counts, upsert seeding, and natural
//! insertion order. It is the intended backend for development and tests.
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
//!     let entries = store.collection("entries");
//!
//!     entries.add_document("one", doc! { "kind": "note" }).await?;
//!     assert!(entries.get_by_id("one").await?.is_some());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docface_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
