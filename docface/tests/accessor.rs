//! Integration tests for the accessor surface over the in-memory backend.

use bson::doc;
use docface::{memory::InMemoryStore, prelude::*};
use serde::{Deserialize, Serialize};

fn store() -> DocumentStore<InMemoryStore> {
    DocumentStore::new(InMemoryStore::new())
}

#[tokio::test]
async fn get_by_id_returns_current_field_values() {
    let store = store();
    let items = store.collection("items");

    items
        .add_document("one", doc! { "name": "first", "rank": 1 })
        .await
        .unwrap();

    let found = items.get_by_id("one").await.unwrap().unwrap();
    assert_eq!(found, doc! { "id": "one", "name": "first", "rank": 1 });

    assert!(items.get_by_id("two").await.unwrap().is_none());
}

#[tokio::test]
async fn get_by_matches_on_any_field() {
    let store = store();
    let items = store.collection("items");

    items
        .add_document("one", doc! { "name": "first" })
        .await
        .unwrap();

    let found = items.get_by("name", "first").await.unwrap();
    assert!(found.is_some());

    assert!(items.get_by("name", "second").await.unwrap().is_none());
}

#[tokio::test]
async fn get_all_by_filters_on_equality() {
    let store = store();
    let items = store.collection("items");

    for (id, kind) in [("a", "note"), ("b", "task"), ("c", "note")] {
        items
            .add_document(id, doc! { "kind": kind })
            .await
            .unwrap();
    }

    let notes = items.get_all_by("kind", "note", None).await.unwrap();
    assert_eq!(notes.len(), 2);

    let missing = items.get_all_by("kind", "event", None).await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn get_all_where_with_empty_filter_returns_everything() {
    let store = store();
    let items = store.collection("items");

    for id in ["a", "b", "c"] {
        items.add_document(id, doc! {}).await.unwrap();
    }

    let all = items.get_all_where(Filter::all(), None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn get_all_where_supports_comparison_filters() {
    let store = store();
    let items = store.collection("items");

    for (id, rank) in [("a", 1), ("b", 2), ("c", 3)] {
        items
            .add_document(id, doc! { "rank": rank })
            .await
            .unwrap();
    }

    let low = items
        .get_all_where(Filter::lt("rank", 3), None)
        .await
        .unwrap();
    assert_eq!(low.len(), 2);

    let middle = items
        .get_all_where(Filter::gt("rank", 1).and(Filter::lt("rank", 3)), None)
        .await
        .unwrap();
    assert_eq!(middle.len(), 1);
    assert_eq!(middle[0].get_str("id").unwrap(), "b");
}

#[tokio::test]
async fn update_document_merges_and_upserts() {
    let store = store();
    let items = store.collection("items");

    // Creation through upsert counts as success.
    assert!(
        items
            .update_document("one", doc! { "name": "first", "rank": 1 })
            .await
            .unwrap()
    );

    // Field-level merge: untouched fields survive.
    assert!(
        items
            .update_document("one", doc! { "rank": 2 })
            .await
            .unwrap()
    );
    let found = items.get_by_id("one").await.unwrap().unwrap();
    assert_eq!(found, doc! { "id": "one", "name": "first", "rank": 2 });

    // Writing identical values is a no-op, not a failure.
    assert!(
        !items
            .update_document("one", doc! { "rank": 2 })
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn update_field_reports_false_for_missing_document() {
    let store = store();
    let items = store.collection("items");

    items
        .add_document("one", doc! { "name": "first" })
        .await
        .unwrap();

    assert!(items.update_field("one", "name", "renamed").await.unwrap());
    let found = items.get_by_id("one").await.unwrap().unwrap();
    assert_eq!(found.get_str("name").unwrap(), "renamed");

    assert!(!items.update_field("ghost", "name", "x").await.unwrap());
}

#[tokio::test]
async fn update_where_targets_the_first_match() {
    let store = store();
    let items = store.collection("items");

    items
        .add_document("one", doc! { "kind": "note", "seen": false })
        .await
        .unwrap();

    assert!(
        items
            .update_where(Filter::eq("kind", "note"), "seen", true)
            .await
            .unwrap()
    );
    assert!(
        !items
            .update_where(Filter::eq("kind", "event"), "seen", true)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn delete_field_leaves_the_rest_of_the_document() {
    let store = store();
    let items = store.collection("items");

    items
        .add_document("one", doc! { "name": "first", "extra": "x" })
        .await
        .unwrap();

    assert!(items.delete_field("one", "extra").await.unwrap());

    let found = items.get_by_id("one").await.unwrap().unwrap();
    assert_eq!(found, doc! { "id": "one", "name": "first" });

    // Removing an already-absent field changes nothing.
    assert!(!items.delete_field("one", "extra").await.unwrap());
}

#[tokio::test]
async fn increment_field_creates_then_accumulates() {
    let store = store();
    let items = store.collection("items");

    // Upsert creation: the document now exists, but nothing was modified.
    assert!(!items.increment_field("counter", "hits", 4).await.unwrap());
    let found = items.get_by_id("counter").await.unwrap().unwrap();
    assert_eq!(found.get_i64("hits").unwrap(), 4);

    assert!(items.increment_field("counter", "hits", 3).await.unwrap());
    let found = items.get_by_id("counter").await.unwrap().unwrap();
    assert_eq!(found.get_i64("hits").unwrap(), 7);
}

#[tokio::test]
async fn delete_document_succeeds_exactly_once() {
    let store = store();
    let items = store.collection("items");

    items.add_document("one", doc! {}).await.unwrap();

    assert!(items.delete_document("one").await.unwrap());
    assert!(!items.delete_document("one").await.unwrap());
    assert!(items.get_by_id("one").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_document_by_arbitrary_filter() {
    let store = store();
    let items = store.collection("items");

    items
        .add_document("one", doc! { "kind": "note" })
        .await
        .unwrap();

    assert!(
        items
            .delete_document_by(Filter::eq("kind", "note"))
            .await
            .unwrap()
    );
    assert!(
        !items
            .delete_document_by(Filter::eq("kind", "note"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn delete_collection_empties_subsequent_reads() {
    let store = store();
    let items = store.collection("items");

    for id in ["a", "b"] {
        items.add_document(id, doc! {}).await.unwrap();
    }

    assert!(items.delete_collection().await.unwrap());
    assert!(items.get_all_from(None).await.unwrap().is_empty());
}

#[derive(Debug, Clone, Serialize, Deserialize, Document)]
#[document(collection = "users")]
struct User {
    id: String,
    name: String,
    points: i64,
}

#[tokio::test]
async fn typed_collection_round_trips_documents() {
    let store = store();
    let users = store.typed_collection::<User>();

    let alice = User {
        id: "alice".to_string(),
        name: "Alice".to_string(),
        points: 10,
    };
    users.add_document(&alice).await.unwrap();

    let found = users.get_by_id("alice").await.unwrap().unwrap();
    assert_eq!(found.name, "Alice");
    assert_eq!(found.points, 10);

    assert!(users.increment_field("alice", "points", 5).await.unwrap());
    let found = users.get_by_id("alice").await.unwrap().unwrap();
    assert_eq!(found.points, 15);

    let by_name = users.get_by("name", "Alice").await.unwrap();
    assert!(by_name.is_some());

    let all = users.get_all_from(None).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn operations_are_scoped_to_their_collection() {
    let store = store();
    let items = store.collection("items");
    let others = store.collection("others");

    items.add_document("one", doc! {}).await.unwrap();

    assert!(others.get_by_id("one").await.unwrap().is_none());
    assert!(!others.delete_document("one").await.unwrap());
    assert!(items.get_by_id("one").await.unwrap().is_some());
}
