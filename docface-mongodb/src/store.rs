//! MongoDB backend over the official async driver.

use async_trait::async_trait;
use bson::{Document as RawDocument, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions},
};

use docface_core::{
    backend::{BackendBuilder, DocumentBackend, UpdateOutcome},
    document::ID_FIELD,
    error::{AccessError, AccessResult},
    query::{Expr, Query, QueryVisitor, SequenceToken, SortDirection},
    update::UpdateSpec,
};

use crate::query::MongoQueryTranslator;

/// MongoDB-backed implementation of [`DocumentBackend`].
///
/// Documents are identified to callers by their `id` field; MongoDB's own
/// `_id` ObjectId serves only as the internal insertion-order position for
/// pagination anchoring and is stripped from every returned document.
#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection: &str) -> MongoCollection<RawDocument> {
        self.client.database(&self.database).collection(collection)
    }

    fn restore_document(mut document: RawDocument) -> RawDocument {
        document.remove("_id");
        document
    }

    fn render_update(update: &UpdateSpec) -> RawDocument {
        match update {
            UpdateSpec::Set(fields) => doc! { "$set": fields.clone() },
            UpdateSpec::Unset(field) => doc! { "$unset": { field: "" } },
            UpdateSpec::Inc(field, delta) => doc! { "$inc": { field: *delta } },
        }
    }
}

#[async_trait]
impl DocumentBackend for MongoDbStore {
    async fn find_one(
        &self,
        filter: &Expr,
        collection: &str,
    ) -> AccessResult<Option<RawDocument>> {
        Ok(self
            .get_collection(collection)
            .find_one(MongoQueryTranslator.visit_expr(filter)?)
            .await
            .map_err(|e| AccessError::Backend(e.to_string()))?
            .map(Self::restore_document))
    }

    async fn find(&self, query: Query, collection: &str) -> AccessResult<Vec<RawDocument>> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(limit as i64);
        }
        if let Some(order) = &query.order {
            options.sort = Some(doc! {
                "$natural": match order {
                    SortDirection::Asc => 1,
                    SortDirection::Desc => -1,
                }
            });
        }

        Ok(self
            .get_collection(collection)
            .find(
                if let Some(expr) = &query.filter {
                    MongoQueryTranslator.visit_expr(expr)?
                } else {
                    doc! {}
                },
            )
            .with_options(options)
            .await
            .map_err(|e| AccessError::Backend(e.to_string()))?
            .try_collect::<Vec<RawDocument>>()
            .await
            .map_err(|e| AccessError::Backend(e.to_string()))?
            .into_iter()
            .map(Self::restore_document)
            .collect())
    }

    async fn update_one(
        &self,
        filter: &Expr,
        update: &UpdateSpec,
        upsert: bool,
        collection: &str,
    ) -> AccessResult<UpdateOutcome> {
        let result = self
            .get_collection(collection)
            .update_one(
                MongoQueryTranslator.visit_expr(filter)?,
                Self::render_update(update),
            )
            .upsert(upsert)
            .await
            .map_err(|e| AccessError::Backend(e.to_string()))?;

        Ok(UpdateOutcome {
            modified: result.modified_count,
            upserted: result.upserted_id.is_some() as u64,
        })
    }

    async fn delete_one(&self, filter: &Expr, collection: &str) -> AccessResult<u64> {
        Ok(self
            .get_collection(collection)
            .delete_one(MongoQueryTranslator.visit_expr(filter)?)
            .await
            .map_err(|e| AccessError::Backend(e.to_string()))?
            .deleted_count)
    }

    async fn drop_collection(&self, collection: &str) -> AccessResult<()> {
        self.get_collection(collection)
            .drop()
            .await
            .map_err(|e| AccessError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn sequence_token(
        &self,
        id: &str,
        collection: &str,
    ) -> AccessResult<Option<SequenceToken>> {
        Ok(self
            .get_collection(collection)
            .find_one(doc! { ID_FIELD: id })
            .await
            .map_err(|e| AccessError::Backend(e.to_string()))?
            .and_then(|document| document.get("_id").cloned())
            .map(SequenceToken::new))
    }
}

/// Builder for [`MongoDbStore`] from a connection string and database name.
pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl BackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> AccessResult<Self::Backend> {
        Ok(MongoDbStore::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| AccessError::Initialization(e.to_string()))?,
            )
            .map_err(|e| AccessError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}
