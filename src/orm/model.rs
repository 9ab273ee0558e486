//! Typed models over a datastore provider
//!
//! A domain type implementing [`Entity`] can be bound to a provider, gaining
//! persistence capability without knowing which backend sits underneath.
//! [`BoundModel`] covers type-level operations (create, retrieve, search);
//! [`Instance`] is an unsaved in-memory instance with save/delete/to_obj.

use crate::adapters::datastore::DatastoreProvider;
use crate::domain::{Result, SearchQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Contract a domain type satisfies to be bound as a model.
///
/// Entities serialize to JSON objects carrying a string `id` field (the
/// primary identifier returned by [`Entity::id`]).
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Logical model name, resolved to a physical storage name per backend.
    const MODEL_NAME: &'static str;

    /// Primary identifier of this entity.
    fn id(&self) -> &str;
}

/// Result of a search: materialized instances plus the continuation token.
///
/// Instances are plain data snapshots, not live handles; ordering is the
/// backend's and the token passes through unchanged.
#[derive(Debug, Clone)]
pub struct SearchResult<T> {
    /// Materialized matched entities, in backend order.
    pub instances: Vec<T>,

    /// Opaque continuation token, if more results may exist.
    pub page: Option<Value>,
}

/// A domain model bound to a datastore provider.
pub struct BoundModel<T> {
    provider: Arc<dyn DatastoreProvider>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for BoundModel<T> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> BoundModel<T> {
    pub(crate) fn new(provider: Arc<dyn DatastoreProvider>) -> Self {
        Self {
            provider,
            _entity: PhantomData,
        }
    }

    /// Construct an in-memory instance; nothing is persisted until
    /// [`Instance::save`].
    pub fn create(&self, data: T) -> Instance<T> {
        Instance {
            provider: Arc::clone(&self.provider),
            data,
        }
    }

    /// Look up an entity by primary identifier.
    ///
    /// Absence is `Ok(None)`, never an error.
    pub async fn retrieve(&self, id: &str) -> Result<Option<T>> {
        match self.provider.find_by_id(T::MODEL_NAME, id).await? {
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
            None => Ok(None),
        }
    }

    /// Execute a query and materialize every matched record, preserving the
    /// provider's ordering.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult<T>> {
        let page = self.provider.search(T::MODEL_NAME, query).await?;

        let mut instances = Vec::with_capacity(page.records.len());
        for record in page.records {
            instances.push(serde_json::from_value(record)?);
        }

        Ok(SearchResult {
            instances,
            page: page.page,
        })
    }
}

/// An in-memory instance of a bound model.
pub struct Instance<T: Entity> {
    provider: Arc<dyn DatastoreProvider>,
    data: T,
}

impl<T: Entity> Instance<T> {
    /// Persist this instance, returning the persisted materialized form.
    ///
    /// Returns `Ok(None)` in the degenerate case where the provider reports
    /// no resulting record; callers that require an instance treat that as an
    /// invariant violation.
    pub async fn save(&self) -> Result<Option<T>> {
        let record = serde_json::to_value(&self.data)?;
        match self.provider.upsert(T::MODEL_NAME, record).await? {
            Some(persisted) => Ok(Some(serde_json::from_value(persisted)?)),
            None => Ok(None),
        }
    }

    /// Delete the stored record with this instance's identifier.
    pub async fn delete(self) -> Result<()> {
        self.provider
            .delete_by_id(T::MODEL_NAME, self.data.id())
            .await
    }

    /// The materialized plain-data form of this instance.
    pub fn to_obj(&self) -> &T {
        &self.data
    }
}
