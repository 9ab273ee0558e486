//! DynamoDB datastore provider
//!
//! Translates the generic provider operations into PutItem/GetItem/DeleteItem
//! and filtered Scan calls. The continuation token is the scan's
//! `LastEvaluatedKey` encoded as a JSON object and handed back verbatim.

use crate::adapters::datastore::traits::{record_id, DatastoreProvider};
use crate::adapters::dynamodb::convert::{item_to_record, record_to_item, to_attribute_value};
use crate::domain::{NameResolver, PolystoreError, ProviderPage, Result, SearchQuery};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::Value;
use std::sync::Arc;

/// Provider over a DynamoDB client.
pub struct DynamoDbProvider {
    client: Client,
    resolver: Arc<dyn NameResolver>,
}

impl DynamoDbProvider {
    /// Wrap a client and resolver.
    pub fn new(client: Client, resolver: Arc<dyn NameResolver>) -> Self {
        Self { client, resolver }
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl DatastoreProvider for DynamoDbProvider {
    async fn upsert(&self, model: &str, record: Value) -> Result<Option<Value>> {
        record_id(&record)?;
        let table = self.resolver.resolve(model);
        let item = record_to_item(&record)?;

        self.client
            .put_item()
            .table_name(&table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| PolystoreError::Database(format!("PutItem on {table} failed: {e}")))?;

        Ok(Some(record))
    }

    async fn find_by_id(&self, model: &str, id: &str) -> Result<Option<Value>> {
        let table = self.resolver.resolve(model);

        let output = self
            .client
            .get_item()
            .table_name(&table)
            .key("id", Self::key(id))
            .send()
            .await
            .map_err(|e| PolystoreError::Database(format!("GetItem on {table} failed: {e}")))?;

        match output.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, model: &str, id: &str) -> Result<()> {
        let table = self.resolver.resolve(model);

        self.client
            .delete_item()
            .table_name(&table)
            .key("id", Self::key(id))
            .send()
            .await
            .map_err(|e| PolystoreError::Database(format!("DeleteItem on {table} failed: {e}")))?;

        Ok(())
    }

    async fn search(&self, model: &str, query: &SearchQuery) -> Result<ProviderPage> {
        let table = self.resolver.resolve(model);
        let mut request = self.client.scan().table_name(&table);

        if !query.filter.is_empty() {
            let mut clauses = Vec::with_capacity(query.filter.len());
            for (index, (field, expected)) in query.filter.iter().enumerate() {
                let name = format!("#f{index}");
                let value = format!(":v{index}");
                clauses.push(format!("{name} = {value}"));
                request = request
                    .expression_attribute_names(&name, field)
                    .expression_attribute_values(&value, to_attribute_value(expected));
            }
            request = request.filter_expression(clauses.join(" AND "));
        }

        if let Some(limit) = query.limit {
            request = request.limit(limit as i32);
        }

        if let Some(token) = &query.page {
            let start_key = record_to_item(token).map_err(|_| {
                PolystoreError::Validation("invalid page token for key-value backend".to_string())
            })?;
            request = request.set_exclusive_start_key(Some(start_key));
        }

        let output = request
            .send()
            .await
            .map_err(|e| PolystoreError::Database(format!("Scan on {table} failed: {e}")))?;

        let mut records = Vec::new();
        for item in output.items.unwrap_or_default() {
            records.push(item_to_record(&item)?);
        }

        let page = match output.last_evaluated_key {
            Some(key) => Some(item_to_record(&key)?),
            None => None,
        };

        Ok(ProviderPage { records, page })
    }
}
