//! Elasticsearch datastore provider
//!
//! Documents are indexed under the resolved index name with the record id as
//! document id. Equality filters translate to `match` clauses; results sort
//! by `_doc` for cheap, stable ordering and page with from/size, the
//! continuation token being the next offset.

use crate::adapters::datastore::traits::{record_id, DatastoreProvider};
use crate::domain::{NameResolver, PolystoreError, ProviderPage, Result, SearchQuery};
use async_trait::async_trait;
use elasticsearch::http::StatusCode;
use elasticsearch::{DeleteParts, Elasticsearch, GetParts, IndexParts, SearchParts};
use serde_json::{json, Value};
use std::sync::Arc;

/// Provider over an Elasticsearch client.
pub struct ElasticsearchProvider {
    client: Elasticsearch,
    resolver: Arc<dyn NameResolver>,
}

impl ElasticsearchProvider {
    /// Wrap a client and resolver.
    pub fn new(client: Elasticsearch, resolver: Arc<dyn NameResolver>) -> Self {
        Self { client, resolver }
    }
}

/// Translate a query into an Elasticsearch request body.
///
/// Pure function of the query and offset.
pub(crate) fn search_body(query: &SearchQuery, offset: u64) -> Value {
    let clause = if query.filter.is_empty() {
        json!({ "match_all": {} })
    } else {
        let must: Vec<Value> = query
            .filter
            .iter()
            .map(|(field, expected)| json!({ "match": { field: expected } }))
            .collect();
        json!({ "bool": { "must": must } })
    };

    let mut body = json!({
        "query": clause,
        "sort": ["_doc"],
        "from": offset,
    });
    if let Some(limit) = query.limit {
        body["size"] = json!(limit);
    }
    body
}

fn page_offset(query: &SearchQuery) -> Result<u64> {
    match &query.page {
        Some(token) => token.as_u64().ok_or_else(|| {
            PolystoreError::Validation("invalid page token for search backend".to_string())
        }),
        None => Ok(0),
    }
}

#[async_trait]
impl DatastoreProvider for ElasticsearchProvider {
    async fn upsert(&self, model: &str, record: Value) -> Result<Option<Value>> {
        let id = record_id(&record)?;
        let index = self.resolver.resolve(model);

        let response = self
            .client
            .index(IndexParts::IndexId(&index, &id))
            .body(record.clone())
            .send()
            .await
            .map_err(|e| PolystoreError::Database(format!("index into {index} failed: {e}")))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(PolystoreError::Database(format!(
                "index into {index} rejected with status {status}"
            )));
        }

        Ok(Some(record))
    }

    async fn find_by_id(&self, model: &str, id: &str) -> Result<Option<Value>> {
        let index = self.resolver.resolve(model);

        let response = self
            .client
            .get(GetParts::IndexId(&index, id))
            .send()
            .await
            .map_err(|e| PolystoreError::Database(format!("get from {index} failed: {e}")))?;

        let status = response.status_code();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PolystoreError::Database(format!(
                "get from {index} rejected with status {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PolystoreError::Serialization(format!("get response parse: {e}")))?;

        Ok(body.get("_source").cloned())
    }

    async fn delete_by_id(&self, model: &str, id: &str) -> Result<()> {
        let index = self.resolver.resolve(model);

        let response = self
            .client
            .delete(DeleteParts::IndexId(&index, id))
            .send()
            .await
            .map_err(|e| PolystoreError::Database(format!("delete from {index} failed: {e}")))?;

        let status = response.status_code();
        // Absent documents delete successfully.
        if status == StatusCode::NOT_FOUND || status.is_success() {
            return Ok(());
        }

        Err(PolystoreError::Database(format!(
            "delete from {index} rejected with status {status}"
        )))
    }

    async fn search(&self, model: &str, query: &SearchQuery) -> Result<ProviderPage> {
        let index = self.resolver.resolve(model);
        let offset = page_offset(query)?;

        let response = self
            .client
            .search(SearchParts::Index(&[index.as_str()]))
            .body(search_body(query, offset))
            .send()
            .await
            .map_err(|e| PolystoreError::Database(format!("search on {index} failed: {e}")))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(PolystoreError::Database(format!(
                "search on {index} rejected with status {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PolystoreError::Serialization(format!("search response parse: {e}")))?;

        let hits = body["hits"]["hits"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        let records: Vec<Value> = hits
            .iter()
            .filter_map(|hit| hit.get("_source").cloned())
            .collect();

        let page = match query.limit {
            Some(limit) if records.len() as u64 == u64::from(limit) => {
                Some(Value::from(offset + records.len() as u64))
            }
            _ => None,
        };

        Ok(ProviderPage { records, page })
    }
}
