//! MongoDB implementation of DocumentStore

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, IndexModel,
    bson::{Bson, Document, doc, from_document, to_document},
    options::{
        Acknowledgment, CollectionOptions, IndexOptions, ReadConcern, ReadPreference,
        SelectionCriteria, WriteConcern,
    },
};
use serde_json::Value;
use tracing::instrument;

use crate::error::{StoreError, StoreResult};
use crate::models::{Filter, FindOutcome, ID_FIELD, Item, StoreBinding, operator_field};
use crate::store::DocumentStore;

/// MongoDB implementation of the DocumentStore.
///
/// Holds a shared, pooled [`Client`]; each call checks a connection out of
/// the pool and returns it when done. Reads go to the primary with majority
/// read concern and writes wait for a journaled majority acknowledgement, so
/// a read issued after a successful write observes it.
#[derive(Clone)]
pub struct MongoDocumentStore {
    binding: StoreBinding,
    collection: Collection<Document>,
}

impl MongoDocumentStore {
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect_lazy(&MongoConfig::from_host("localhost")).await?;
    /// let store = MongoDocumentStore::new(StoreBinding::new("jobs", "localhost", "jobsdb"), client);
    /// ```
    pub fn new(binding: StoreBinding, client: Client) -> Self {
        let options = CollectionOptions::builder()
            .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
            .read_concern(ReadConcern::majority())
            .write_concern(
                WriteConcern::builder()
                    .w(Acknowledgment::Majority)
                    .journal(true)
                    .build(),
            )
            .build();

        let collection = client
            .database(binding.store_name())
            .collection_with_options::<Document>(binding.domain(), options);

        Self {
            binding,
            collection,
        }
    }

    pub fn binding(&self) -> &StoreBinding {
        &self.binding
    }

    /// Create a unique index on `Id`, turning duplicate creates into write errors.
    pub async fn init_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { ID_FIELD: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        tracing::info!(
            domain = self.binding.domain(),
            "Ensured unique index on {}",
            ID_FIELD
        );
        Ok(())
    }

    /// Exact string match on every pair. Keys must be field names; each
    /// value is compared with `$eq` so it is never read as an operator.
    fn build_filter(filter: &Filter) -> StoreResult<Document> {
        if let Some(field) = operator_field(filter) {
            return Err(StoreError::InvalidFilter(field.to_string()));
        }

        Ok(filter
            .iter()
            .map(|(field, value)| {
                (
                    field.clone(),
                    Bson::Document(doc! { "$eq": value.as_str() }),
                )
            })
            .collect())
    }

    fn id_filter(id: &str) -> Document {
        doc! { ID_FIELD: id }
    }

    /// Storage-internal `_id` never leaves the store.
    fn projection() -> Document {
        doc! { "_id": 0 }
    }

    fn with_id(mut item: Item, id: &str) -> Item {
        item.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        item
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self, item), fields(domain = %self.binding.domain()))]
    async fn create(&self, id: &str, item: Item) -> StoreResult<()> {
        let document = to_document(&Self::with_id(item, id))?;
        self.collection.insert_one(document).await?;

        tracing::info!(item_id = %id, "Item created");
        Ok(())
    }

    #[instrument(skip(self), fields(domain = %self.binding.domain()))]
    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        let found = self
            .collection
            .find_one(Self::id_filter(id))
            .projection(Self::projection())
            .await?;

        found
            .map(from_document::<Item>)
            .transpose()
            .map_err(StoreError::from)
    }

    #[instrument(skip(self, item), fields(domain = %self.binding.domain()))]
    async fn update(&self, id: &str, item: Item) -> StoreResult<()> {
        if id.is_empty() {
            return Err(StoreError::MissingId);
        }

        let document = to_document(&Self::with_id(item, id))?;
        let result = self
            .collection
            .replace_one(Self::id_filter(id), document)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        tracing::info!(item_id = %id, "Item updated");
        Ok(())
    }

    #[instrument(skip(self), fields(domain = %self.binding.domain()))]
    async fn find(&self, filter: &Filter) -> StoreResult<FindOutcome> {
        let mut cursor = self
            .collection
            .find(Self::build_filter(filter)?)
            .projection(Self::projection())
            .await?;

        let mut items = Vec::new();
        loop {
            let next = match cursor.try_next().await {
                Ok(next) => next,
                Err(e) => {
                    tracing::warn!(read = items.len(), "Cursor failed mid-iteration: {}", e);
                    return Ok(FindOutcome::Partial {
                        items,
                        cause: e.to_string(),
                    });
                }
            };

            let Some(document) = next else {
                return Ok(FindOutcome::Complete(items));
            };

            match from_document::<Item>(document) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(read = items.len(), "Undecodable document: {}", e);
                    return Ok(FindOutcome::Partial {
                        items,
                        cause: e.to_string(),
                    });
                }
            }
        }
    }

    #[instrument(skip(self), fields(domain = %self.binding.domain()))]
    async fn count(&self, filter: &Filter) -> StoreResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(filter)?)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoDocumentStore::build_filter(&Filter::new()).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_matches_strings_exactly() {
        let filter = Filter::from([
            ("Status".to_string(), "running".to_string()),
            ("Owner".to_string(), "42".to_string()),
        ]);
        let doc = MongoDocumentStore::build_filter(&filter).unwrap();
        assert_eq!(
            doc,
            doc! {
                "Owner": { "$eq": "42" },
                "Status": { "$eq": "running" },
            }
        );
    }

    #[test]
    fn test_build_filter_rejects_operator_keys() {
        for key in ["$where", "$comment", "$expr"] {
            let filter = Filter::from([(key.to_string(), "sleep(5000) || true".to_string())]);
            let result = MongoDocumentStore::build_filter(&filter);
            assert!(matches!(result, Err(StoreError::InvalidFilter(ref k)) if k == key));
        }
    }

    #[test]
    fn test_build_filter_keeps_operator_like_values_literal() {
        let filter = Filter::from([("Status".to_string(), "$ne".to_string())]);
        let doc = MongoDocumentStore::build_filter(&filter).unwrap();
        assert_eq!(doc, doc! { "Status": { "$eq": "$ne" } });
    }

    #[test]
    fn test_id_filter_targets_external_id() {
        let doc = MongoDocumentStore::id_filter("abc");
        assert_eq!(doc, doc! { "Id": "abc" });
    }

    #[test]
    fn test_with_id_overwrites_payload_id() {
        let mut item = Item::new();
        item.insert("Id".into(), Value::String("forged".into()));
        item.insert("Name".into(), Value::String("x".into()));
        let item = MongoDocumentStore::with_id(item, "real");
        assert_eq!(item["Id"], "real");
        assert_eq!(item["Name"], "x");
    }

    #[tokio::test]
    async fn test_update_with_empty_id_fails_before_io() {
        // nothing listens on port 1; the client connects lazily
        let client = Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        let store = MongoDocumentStore::new(StoreBinding::new("jobs", "127.0.0.1:1", "db"), client);

        let result = store.update("", Item::new()).await;
        assert!(matches!(result, Err(StoreError::MissingId)));
    }

    #[test]
    fn test_projection_hides_internal_id() {
        assert_eq!(MongoDocumentStore::projection(), doc! { "_id": 0 });
    }
}
