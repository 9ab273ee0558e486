//! MongoDB datastore provider
//!
//! Records are stored one per document, with the record id mirrored into
//! `_id`. Searches sort by `_id` and page with skip/limit; the continuation
//! token is the next skip offset.

use crate::adapters::datastore::traits::{record_id, DatastoreProvider};
use crate::domain::{NameResolver, PolystoreError, ProviderPage, Result, SearchQuery};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Collection, Database};
use serde_json::Value;
use std::sync::Arc;

/// Provider over one logical MongoDB database.
pub struct MongoDbProvider {
    database: Database,
    resolver: Arc<dyn NameResolver>,
}

impl MongoDbProvider {
    /// Wrap a database handle and resolver.
    pub fn new(database: Database, resolver: Arc<dyn NameResolver>) -> Self {
        Self { database, resolver }
    }

    fn collection(&self, model: &str) -> Collection<Document> {
        self.database.collection(&self.resolver.resolve(model))
    }

    fn to_document(record: &Value, id: &str) -> Result<Document> {
        let mut document = mongodb::bson::to_document(record)
            .map_err(|e| PolystoreError::Serialization(format!("record to BSON failed: {e}")))?;
        document.insert("_id", id);
        Ok(document)
    }

    fn to_record(mut document: Document) -> Result<Value> {
        document.remove("_id");
        serde_json::to_value(&document)
            .map_err(|e| PolystoreError::Serialization(format!("BSON to record failed: {e}")))
    }
}

#[async_trait]
impl DatastoreProvider for MongoDbProvider {
    async fn upsert(&self, model: &str, record: Value) -> Result<Option<Value>> {
        let id = record_id(&record)?;
        let document = Self::to_document(&record, &id)?;

        self.collection(model)
            .replace_one(doc! { "_id": id.as_str() }, document)
            .upsert(true)
            .await
            .map_err(|e| PolystoreError::Database(format!("replace_one failed: {e}")))?;

        Ok(Some(record))
    }

    async fn find_by_id(&self, model: &str, id: &str) -> Result<Option<Value>> {
        let found = self
            .collection(model)
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| PolystoreError::Database(format!("find_one failed: {e}")))?;

        match found {
            Some(document) => Ok(Some(Self::to_record(document)?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, model: &str, id: &str) -> Result<()> {
        self.collection(model)
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| PolystoreError::Database(format!("delete_one failed: {e}")))?;

        Ok(())
    }

    async fn search(&self, model: &str, query: &SearchQuery) -> Result<ProviderPage> {
        let mut filter = Document::new();
        for (field, expected) in &query.filter {
            let value = Bson::try_from(expected.clone()).map_err(|e| {
                PolystoreError::Serialization(format!("filter value to BSON failed: {e}"))
            })?;
            filter.insert(field.clone(), value);
        }

        let offset = match &query.page {
            Some(token) => token.as_u64().ok_or_else(|| {
                PolystoreError::Validation("invalid page token for document backend".to_string())
            })?,
            None => 0,
        };

        let collection = self.collection(model);
        let mut find = collection
            .find(filter)
            .sort(doc! { "_id": 1 })
            .skip(offset);
        if let Some(limit) = query.limit {
            find = find.limit(limit as i64);
        }

        let cursor = find
            .await
            .map_err(|e| PolystoreError::Database(format!("find failed: {e}")))?;
        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| PolystoreError::Database(format!("cursor drain failed: {e}")))?;

        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            records.push(Self::to_record(document)?);
        }

        let page = match query.limit {
            Some(limit) if records.len() as u64 == u64::from(limit) => {
                Some(Value::from(offset + records.len() as u64))
            }
            _ => None,
        };

        Ok(ProviderPage { records, page })
    }
}
