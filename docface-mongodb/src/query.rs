//! Filter translation from the docface AST to MongoDB query documents.

use bson::{Bson, Document as RawDocument, doc};

use docface_core::{
    error::AccessError,
    query::{Expr, FieldOp, QueryVisitor, SequenceToken},
};

/// Translates filter expressions into MongoDB's native BSON filter syntax.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = RawDocument;
    type Error = AccessError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        // MongoDB rejects an empty $and; the empty conjunction is {}.
        if exprs.is_empty() {
            return Ok(doc! {});
        }

        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::Ne => doc! { "$ne": value },
                FieldOp::Gt => doc! { "$gt": value },
                FieldOp::Gte => doc! { "$gte": value },
                FieldOp::Lt => doc! { "$lt": value },
                FieldOp::Lte => doc! { "$lte": value },
            }
        })
    }

    fn visit_sequence_before(
        &mut self,
        token: &SequenceToken,
    ) -> Result<Self::Output, Self::Error> {
        // The anchor position is the anchored document's ObjectId.
        Ok(doc! {
            "_id": { "$lt": token.value() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docface_core::query::Filter;

    fn translate(expr: &Expr) -> RawDocument {
        MongoQueryTranslator.visit_expr(expr).unwrap()
    }

    #[test]
    fn empty_conjunction_is_the_match_all_filter() {
        assert_eq!(translate(&Filter::all()), doc! {});
    }

    #[test]
    fn equality_translates_to_eq() {
        assert_eq!(
            translate(&Filter::eq("name", "a")),
            doc! { "name": { "$eq": "a" } },
        );
    }

    #[test]
    fn conjunction_translates_to_and() {
        assert_eq!(
            translate(&Filter::eq("a", 1).and(Filter::lt("b", 2))),
            doc! {
                "$and": [
                    { "a": { "$eq": 1 } },
                    { "b": { "$lt": 2 } },
                ],
            },
        );
    }

    #[test]
    fn sequence_bound_constrains_object_id() {
        let token = SequenceToken::new(Bson::Int64(7));

        assert_eq!(
            translate(&Expr::SequenceBefore(token)),
            doc! { "_id": { "$lt": 7_i64 } },
        );
    }
}
