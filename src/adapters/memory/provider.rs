//! In-memory datastore provider
//!
//! Volatile, process-local storage used as the test double and default
//! fallback backend. Tables are keyed by physical name, records by id; the
//! inner BTreeMap keeps scans id-ordered so search results are deterministic.

use crate::adapters::datastore::traits::{record_id, DatastoreProvider};
use crate::domain::{NameResolver, PolystoreError, ProviderPage, Result, SearchQuery};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local provider backed by nested maps.
pub struct MemoryProvider {
    resolver: Arc<dyn NameResolver>,
    tables: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryProvider {
    /// Create an empty provider.
    pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
        Self {
            resolver,
            tables: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DatastoreProvider for MemoryProvider {
    async fn upsert(&self, model: &str, record: Value) -> Result<Option<Value>> {
        let id = record_id(&record)?;
        let table = self.resolver.resolve(model);

        let mut tables = self.tables.write().await;
        tables.entry(table).or_default().insert(id, record.clone());
        Ok(Some(record))
    }

    async fn find_by_id(&self, model: &str, id: &str) -> Result<Option<Value>> {
        let table = self.resolver.resolve(model);
        let tables = self.tables.read().await;
        Ok(tables.get(&table).and_then(|records| records.get(id)).cloned())
    }

    async fn delete_by_id(&self, model: &str, id: &str) -> Result<()> {
        let table = self.resolver.resolve(model);
        let mut tables = self.tables.write().await;
        if let Some(records) = tables.get_mut(&table) {
            records.remove(id);
        }
        Ok(())
    }

    async fn search(&self, model: &str, query: &SearchQuery) -> Result<ProviderPage> {
        let table = self.resolver.resolve(model);
        let offset = match &query.page {
            Some(token) => token.as_u64().ok_or_else(|| {
                PolystoreError::Validation("invalid page token for memory backend".to_string())
            })? as usize,
            None => 0,
        };

        let tables = self.tables.read().await;
        let matched: Vec<Value> = tables
            .get(&table)
            .map(|records| {
                records
                    .values()
                    .filter(|record| query.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let remaining = matched.len().saturating_sub(offset);
        let take = query.limit.map(|l| l as usize).unwrap_or(remaining);
        let records: Vec<Value> = matched.into_iter().skip(offset).take(take).collect();

        let page = if records.len() < remaining {
            Some(Value::from((offset + records.len()) as u64))
        } else {
            None
        };

        Ok(ProviderPage { records, page })
    }
}
