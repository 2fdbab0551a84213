//! A thin accessor layer over document database collections.
//!
//! This crate is the core of the docface project and provides:
//!
//! - **Collection accessors** ([`collection`]) - point lookups, filtered
//!   retrieval, field-level updates, and deletion over one collection
//! - **Pagination** ([`page`]) - cursor-style paging anchored on natural
//!   insertion order
//! - **Filter and update ASTs** ([`query`], [`update`]) - typed filter and
//!   mutation construction
//! - **Backend abstraction** ([`backend`]) - the driver capabilities the
//!   accessor requires
//! - **Document traits** ([`document`]) - typed document definition and
//!   serialization
//! - **Store entry point** ([`store`]) - binds a backend to collections
//! - **Error handling** ([`error`]) - the fault-vs-no-op result contract
//!
//! # Example
//!
//! ```ignore
//! use docface::{prelude::*, memory::InMemoryStore};
//! use bson::doc;
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//! let entries = store.collection("entries");
//!
//! entries.add_document("one", doc! { "kind": "note" }).await?;
//! let found = entries.get_by_id("one").await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docface_core;

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod page;
pub mod query;
pub mod store;
pub mod update;
