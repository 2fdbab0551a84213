//! Filter evaluation against in-memory documents.

use bson::{Bson, Document as RawDocument, datetime::DateTime};
use std::cmp::Ordering;

use docface_core::{
    error::{AccessError, AccessResult},
    query::{Expr, FieldOp, QueryVisitor, SequenceToken},
};

/// Comparable view of a BSON scalar.
///
/// Integers and doubles are normalized to f64 so mixed numeric types compare
/// by value, the way the backing drivers compare them. Non-scalar and
/// exotic BSON types only ever compare equal to themselves.
#[derive(Debug, PartialEq)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    Other(&'a Bson),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            other => Comparable::Other(other),
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Evaluates a filter expression against one stored document and its
/// insertion-order sequence number.
pub(crate) struct DocumentEvaluator<'a> {
    sequence: u64,
    document: &'a RawDocument,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(sequence: u64, document: &'a RawDocument) -> Self {
        Self { sequence, document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> AccessResult<bool> {
        self.visit_expr(expr)
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = AccessError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.document.get(field) else {
            // Missing fields match nothing, including Ne.
            return Ok(false);
        };

        let left = Comparable::from(field_value);
        let right = Comparable::from(value);

        Ok(match op {
            FieldOp::Eq => left == right,
            FieldOp::Ne => left != right,
            FieldOp::Gt | FieldOp::Gte | FieldOp::Lt | FieldOp::Lte => {
                match left.partial_cmp(&right) {
                    Some(ordering) => match op {
                        FieldOp::Gt => ordering == Ordering::Greater,
                        FieldOp::Gte => ordering != Ordering::Less,
                        FieldOp::Lt => ordering == Ordering::Less,
                        FieldOp::Lte => ordering != Ordering::Greater,
                        _ => unreachable!(),
                    },
                    None => false,
                }
            }
        })
    }

    fn visit_sequence_before(
        &mut self,
        token: &SequenceToken,
    ) -> Result<Self::Output, Self::Error> {
        match token.value() {
            Bson::Int64(bound) => Ok((self.sequence as i64) < *bound),
            _ => Err(AccessError::Backend(
                "sequence token was not produced by the in-memory backend".to_string(),
            )),
        }
    }
}
