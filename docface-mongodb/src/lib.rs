//! MongoDB backend for docface.
//!
//! Implements [`DocumentBackend`](docface_core::backend::DocumentBackend)
//! over the official async MongoDB driver. Natural insertion order maps to
//! `$natural` sort and pagination anchors to `_id` ObjectId bounds, so
//! cursor-style paging needs no extra fields on the stored documents.
//!
//! Enable through the facade crate's `mongodb` feature:
//!
//! ```toml
//! [dependencies]
//! docface = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docface::{backend::BackendBuilder, mongodb::MongoDbStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "my_database")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docface_mongodb;

pub mod query;
pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
