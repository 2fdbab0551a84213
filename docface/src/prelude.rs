//! Convenient re-exports of commonly used types from docface.
//!
//! ```ignore
//! use docface::prelude::*;
//! ```

pub use docface_core::{
    backend::{BackendBuilder, DocumentBackend, UpdateOutcome},
    collection::{Collection, TypedCollection},
    document::{Document, DocumentExt, ID_FIELD},
    error::{AccessError, AccessResult},
    page::{DEFAULT_PAGE_SIZE, Direction, Pagination},
    query::{Expr, FieldOp, Filter, Query, QueryBuilder, QueryVisitor, SortDirection},
    store::DocumentStore,
    update::UpdateSpec,
};

pub use docface_macros::Document;
