//! In-memory backend with insertion-order bookkeeping.
//!
//! Documents live in per-collection `BTreeMap`s keyed by a monotonically
//! increasing sequence number, so iteration order is natural insertion order
//! and the sequence number doubles as the pagination anchor position.

use async_trait::async_trait;
use bson::{Bson, Document as RawDocument};
use mea::rwlock::RwLock;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use docface_core::{
    backend::{BackendBuilder, DocumentBackend, UpdateOutcome},
    document::ID_FIELD,
    error::{AccessError, AccessResult},
    query::{Expr, FieldOp, Query, SequenceToken, SortDirection},
    update::UpdateSpec,
};

use crate::evaluator::DocumentEvaluator;

#[derive(Default, Debug)]
struct MemoryCollection {
    next_sequence: u64,
    documents: BTreeMap<u64, RawDocument>,
}

impl MemoryCollection {
    fn first_match(&self, filter: &Expr) -> AccessResult<Option<u64>> {
        for (sequence, document) in &self.documents {
            if DocumentEvaluator::new(*sequence, document).evaluate(filter)? {
                return Ok(Some(*sequence));
            }
        }

        Ok(None)
    }

    fn push(&mut self, document: RawDocument) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.documents.insert(sequence, document);
    }
}

type StoreMap = HashMap<String, MemoryCollection>;

/// Thread-safe in-memory document backend.
///
/// Cloneable; clones share the same underlying data through an `Arc`-wrapped
/// read-write lock. Queries scan the collection, which is fine for the
/// development and test workloads this backend targets.
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

/// Applies an update spec to a document in place.
fn apply_update(document: &mut RawDocument, update: &UpdateSpec) -> AccessResult<()> {
    match update {
        UpdateSpec::Set(fields) => {
            for (field, value) in fields {
                document.insert(field.clone(), value.clone());
            }
        }
        UpdateSpec::Unset(field) => {
            document.remove(field);
        }
        UpdateSpec::Inc(field, delta) => {
            let next = match document.get(field.as_str()) {
                None => Bson::Int64(*delta),
                Some(Bson::Int32(value)) => Bson::Int64(*value as i64 + delta),
                Some(Bson::Int64(value)) => Bson::Int64(value + delta),
                Some(Bson::Double(value)) => Bson::Double(value + *delta as f64),
                Some(_) => {
                    return Err(AccessError::Backend(format!(
                        "cannot increment non-numeric field {field}",
                    )));
                }
            };
            document.insert(field.clone(), next);
        }
    }

    Ok(())
}

/// Collects the filter's equality constraints into `seed`, the fields an
/// upserted document starts from.
fn seed_equality_fields(filter: &Expr, seed: &mut RawDocument) {
    match filter {
        Expr::And(exprs) => {
            for expr in exprs {
                seed_equality_fields(expr, seed);
            }
        }
        Expr::Field { field, op: FieldOp::Eq, value } => {
            seed.insert(field.clone(), value.clone());
        }
        _ => {}
    }
}

#[async_trait]
impl DocumentBackend for InMemoryStore {
    async fn find_one(
        &self,
        filter: &Expr,
        collection: &str,
    ) -> AccessResult<Option<RawDocument>> {
        let store = self.store.read().await;
        let Some(collection_map) = store.get(collection) else {
            return Ok(None);
        };

        Ok(collection_map
            .first_match(filter)?
            .and_then(|sequence| collection_map.documents.get(&sequence))
            .cloned())
    }

    async fn find(&self, query: Query, collection: &str) -> AccessResult<Vec<RawDocument>> {
        let store = self.store.read().await;
        let Some(collection_map) = store.get(collection) else {
            return Ok(Vec::new());
        };

        let mut items = Vec::new();
        for (sequence, document) in &collection_map.documents {
            let matched = match &query.filter {
                Some(filter) => {
                    DocumentEvaluator::new(*sequence, document).evaluate(filter)?
                }
                None => true,
            };

            if matched {
                items.push(document.clone());
            }
        }

        if query.order == Some(SortDirection::Desc) {
            items.reverse();
        }
        if let Some(limit) = query.limit {
            items.truncate(limit);
        }

        Ok(items)
    }

    async fn update_one(
        &self,
        filter: &Expr,
        update: &UpdateSpec,
        upsert: bool,
        collection: &str,
    ) -> AccessResult<UpdateOutcome> {
        let mut store = self.store.write().await;

        if let Some(collection_map) = store.get_mut(collection) {
            if let Some(sequence) = collection_map.first_match(filter)? {
                if let Some(document) = collection_map.documents.get_mut(&sequence) {
                    let mut updated = document.clone();
                    apply_update(&mut updated, update)?;

                    // Writing identical values counts as matched, not modified.
                    let modified = (updated != *document) as u64;
                    *document = updated;

                    return Ok(UpdateOutcome { modified, upserted: 0 });
                }
            }
        }

        if !upsert {
            return Ok(UpdateOutcome::default());
        }

        let mut document = RawDocument::new();
        seed_equality_fields(filter, &mut document);
        apply_update(&mut document, update)?;

        store
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(UpdateOutcome { modified: 0, upserted: 1 })
    }

    async fn delete_one(&self, filter: &Expr, collection: &str) -> AccessResult<u64> {
        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(0);
        };

        match collection_map.first_match(filter)? {
            Some(sequence) => {
                collection_map.documents.remove(&sequence);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn drop_collection(&self, collection: &str) -> AccessResult<()> {
        // Idempotent, like a driver-level drop.
        self.store.write().await.remove(collection);

        Ok(())
    }

    async fn sequence_token(
        &self,
        id: &str,
        collection: &str,
    ) -> AccessResult<Option<SequenceToken>> {
        let store = self.store.read().await;
        let Some(collection_map) = store.get(collection) else {
            return Ok(None);
        };

        for (sequence, document) in &collection_map.documents {
            if matches!(document.get(ID_FIELD), Some(Bson::String(value)) if value == id) {
                return Ok(Some(SequenceToken::new(*sequence as i64)));
            }
        }

        Ok(None)
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl BackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> AccessResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use docface_core::query::Filter;

    fn id_filter(id: &str) -> Expr {
        Filter::eq(ID_FIELD, id)
    }

    async fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        for id in ["a", "b", "c"] {
            store
                .update_one(
                    &id_filter(id),
                    &UpdateSpec::set(doc! { "kind": "entry" }),
                    true,
                    "items",
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn upsert_seeds_document_from_filter_equality() {
        let store = InMemoryStore::new();
        let outcome = store
            .update_one(
                &id_filter("x"),
                &UpdateSpec::set(doc! { "name": "X" }),
                true,
                "items",
            )
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome { modified: 0, upserted: 1 });

        let found = store.find_one(&id_filter("x"), "items").await.unwrap();
        assert_eq!(found, Some(doc! { "id": "x", "name": "X" }));
    }

    #[tokio::test]
    async fn find_preserves_insertion_order() {
        let store = seeded_store().await;

        let ascending = store.find(Query::new(), "items").await.unwrap();
        let ids: Vec<_> = ascending
            .iter()
            .map(|d| d.get_str("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let descending = store
            .find(
                Query::builder().order(SortDirection::Desc).limit(2).build(),
                "items",
            )
            .await
            .unwrap();
        let ids: Vec<_> = descending
            .iter()
            .map(|d| d.get_str("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn identical_set_reports_zero_modified() {
        let store = seeded_store().await;

        let outcome = store
            .update_one(
                &id_filter("a"),
                &UpdateSpec::set(doc! { "kind": "entry" }),
                false,
                "items",
            )
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome { modified: 0, upserted: 0 });
    }

    #[tokio::test]
    async fn missing_match_without_upsert_is_a_no_op() {
        let store = seeded_store().await;

        let outcome = store
            .update_one(
                &id_filter("nope"),
                &UpdateSpec::set_field("kind", "other"),
                false,
                "items",
            )
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::default());
    }

    #[tokio::test]
    async fn unset_removes_only_the_named_field() {
        let store = seeded_store().await;

        let outcome = store
            .update_one(&id_filter("b"), &UpdateSpec::unset("kind"), false, "items")
            .await
            .unwrap();
        assert_eq!(outcome.modified, 1);

        let found = store.find_one(&id_filter("b"), "items").await.unwrap();
        assert_eq!(found, Some(doc! { "id": "b" }));
    }

    #[tokio::test]
    async fn increment_creates_and_accumulates() {
        let store = InMemoryStore::new();

        store
            .update_one(&id_filter("n"), &UpdateSpec::inc("count", 4), true, "items")
            .await
            .unwrap();
        store
            .update_one(&id_filter("n"), &UpdateSpec::inc("count", -1), true, "items")
            .await
            .unwrap();

        let found = store
            .find_one(&id_filter("n"), "items")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get("count"), Some(&Bson::Int64(3)));
    }

    #[tokio::test]
    async fn increment_of_non_numeric_field_is_a_fault() {
        let store = InMemoryStore::new();
        store
            .update_one(
                &id_filter("s"),
                &UpdateSpec::set_field("count", "many"),
                true,
                "items",
            )
            .await
            .unwrap();

        let result = store
            .update_one(&id_filter("s"), &UpdateSpec::inc("count", 1), true, "items")
            .await;

        assert!(matches!(result, Err(AccessError::Backend(_))));
    }

    #[tokio::test]
    async fn delete_one_deletes_at_most_once() {
        let store = seeded_store().await;

        assert_eq!(store.delete_one(&id_filter("b"), "items").await.unwrap(), 1);
        assert_eq!(store.delete_one(&id_filter("b"), "items").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn drop_collection_is_idempotent() {
        let store = seeded_store().await;

        store.drop_collection("items").await.unwrap();
        store.drop_collection("items").await.unwrap();

        assert!(store.find(Query::new(), "items").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sequence_tokens_follow_insertion_order() {
        let store = seeded_store().await;

        let a = store.sequence_token("a", "items").await.unwrap().unwrap();
        let b = store.sequence_token("b", "items").await.unwrap().unwrap();
        assert!(a != b);

        let missing = store.sequence_token("zz", "items").await.unwrap();
        assert!(missing.is_none());
    }
}
