//! Filter construction and query types.
//!
//! Filters are a small typed AST instead of untyped field maps, so malformed
//! combinations are rejected at compile time. The [`Filter`] struct provides
//! the usual constructors:
//!
//! ```ignore
//! use docface_core::query::Filter;
//!
//! let expr = Filter::eq("status", "active").and(Filter::lt("age", 30));
//! ```
//!
//! Backends consume expressions through the [`QueryVisitor`] trait, either
//! translating them to the driver's native filter syntax or evaluating them
//! directly against stored documents.

use bson::Bson;

use crate::error::AccessError;

/// Natural-order sort direction for query results.
#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    /// Ascending insertion order (oldest first).
    Asc,
    /// Descending insertion order (newest first).
    Desc,
}

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    /// Equal to (exact match).
    Eq,
    /// Not equal to.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal to.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal to.
    Lte,
}

/// Opaque handle to the backing store's internal insertion-order identifier.
///
/// The wrapped value is backend-specific (an ObjectId for MongoDB, an integer
/// sequence number for the in-memory store). Tokens are produced by
/// [`DocumentBackend::sequence_token`](crate::backend::DocumentBackend::sequence_token)
/// and consumed by [`Expr::SequenceBefore`]; they never reach callers.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceToken(Bson);

impl SequenceToken {
    pub fn new(value: impl Into<Bson>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &Bson {
        &self.0
    }
}

/// A filter expression for matching documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND of multiple expressions. An empty conjunction matches
    /// every document.
    And(Vec<Expr>),
    /// Field comparison expression.
    Field {
        /// The field name to compare.
        field: String,
        /// The comparison operator.
        op: FieldOp,
        /// The value to compare against.
        value: Bson,
    },
    /// Restricts results to documents strictly before the given internal
    /// sequence position. Constructed only by the pagination policy.
    SequenceBefore(SequenceToken),
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: String, op: FieldOp, value: Bson) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches documents where the field equals the given value.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Eq, value.into())
    }

    /// Matches documents where the field does not equal the given value.
    pub fn ne(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Ne, value.into())
    }

    /// Matches documents where the field is greater than the given value.
    pub fn gt(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Gt, value.into())
    }

    /// Matches documents where the field is greater than or equal to the
    /// given value.
    pub fn gte(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Gte, value.into())
    }

    /// Matches documents where the field is less than the given value.
    pub fn lt(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Lt, value.into())
    }

    /// Matches documents where the field is less than or equal to the given
    /// value.
    pub fn lte(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Lte, value.into())
    }

    /// Combines multiple expressions such that all must match.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    /// The empty filter: matches every document in the collection.
    pub fn all() -> Expr {
        Expr::And(Vec::new())
    }
}

/// A structured query for retrieving documents.
///
/// `order` refers to natural insertion order only; `None` means the backing
/// store's default retrieval order.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Optional filter expression to match documents.
    pub filter: Option<Expr>,
    /// Natural-order sort direction for results.
    pub order: Option<SortDirection>,
    /// Maximum number of documents to return.
    pub limit: Option<usize>,
}

impl Query {
    /// Creates a new empty query with no filter, order, or limit.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Sets the natural-order sort direction for the results.
    pub fn order(mut self, order: SortDirection) -> Self {
        self.query.order = Some(order);
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

/// Visitor over filter expressions.
///
/// Backends implement this to translate the AST into their native filter
/// representation (MongoDB) or to evaluate it against a document (memory).
pub trait QueryVisitor {
    type Output;
    type Error: Into<AccessError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error>;
    fn visit_sequence_before(
        &mut self,
        token: &SequenceToken,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
            Expr::SequenceBefore(token) => self.visit_sequence_before(token),
        }
    }
}
