//! Datastore abstraction traits
//!
//! This module defines the provider contract every backend adapter
//! implements, and the normalized handle bundle a connection builder returns.

use crate::domain::{ProviderPage, Result, SearchQuery};
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

/// Datastore provider trait
///
/// The opaque capability consumed by the ORM binding. Records are JSON
/// objects carrying a string `id` field; the provider resolves the model's
/// logical name to its physical storage name internally.
#[async_trait]
pub trait DatastoreProvider: Send + Sync {
    /// Insert or replace the record for `model`, returning the persisted form.
    ///
    /// Providers are expected to return `Some`; `None` is defended against in
    /// the service layer rather than trusted never to happen.
    async fn upsert(&self, model: &str, record: Value) -> Result<Option<Value>>;

    /// Look up a record by its primary identifier.
    ///
    /// Returns `Ok(None)` when no record has that identifier; absence is not
    /// an error.
    async fn find_by_id(&self, model: &str, id: &str) -> Result<Option<Value>>;

    /// Delete the record with the given identifier.
    ///
    /// Deleting an absent record completes successfully.
    async fn delete_by_id(&self, model: &str, id: &str) -> Result<()>;

    /// Execute a backend-agnostic query, returning one page of raw records.
    ///
    /// Record ordering and the continuation token are the backend's own and
    /// pass through this layer unchanged.
    async fn search(&self, model: &str, query: &SearchQuery) -> Result<ProviderPage>;
}

/// Future returned by a cleanup operation.
pub type CleanupFuture = BoxFuture<'static, Result<()>>;

/// Release operation returned alongside a connection.
pub type CleanupFn = Box<dyn FnOnce() -> CleanupFuture + Send>;

/// Raw backend client handle, for advanced callers that need to reach past
/// the provider contract.
pub enum BackendHandle {
    /// Memory backend (no external handle)
    Memory,
    /// DynamoDB client
    KeyValue(aws_sdk_dynamodb::Client),
    /// MongoDB client
    Document(mongodb::Client),
    /// Elasticsearch client
    Search(elasticsearch::Elasticsearch),
    /// sqlx Any pool
    Relational(sqlx::AnyPool),
}

impl std::fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendHandle::Memory => "Memory",
            BackendHandle::KeyValue(_) => "KeyValue",
            BackendHandle::Document(_) => "Document",
            BackendHandle::Search(_) => "Search",
            BackendHandle::Relational(_) => "Relational",
        };
        f.debug_tuple(name).finish()
    }
}

/// Normalized result of a connection builder
///
/// The caller that invoked the factory owns this bundle and is responsible
/// for invoking [`DatabaseObjects::cleanup`] once when done; the factory
/// retains no reference after returning.
pub struct DatabaseObjects {
    provider: Arc<dyn DatastoreProvider>,
    handle: BackendHandle,
    cleanup: Option<CleanupFn>,
}

impl DatabaseObjects {
    /// Bundle a provider and handle whose cleanup is a no-op.
    pub fn new(provider: Arc<dyn DatastoreProvider>, handle: BackendHandle) -> Self {
        Self {
            provider,
            handle,
            cleanup: None,
        }
    }

    /// Bundle a provider and handle with an explicit release operation.
    pub fn with_cleanup(
        provider: Arc<dyn DatastoreProvider>,
        handle: BackendHandle,
        cleanup: CleanupFn,
    ) -> Self {
        Self {
            provider,
            handle,
            cleanup: Some(cleanup),
        }
    }

    /// The datastore-provider capability, shared by all models bound to this
    /// connection.
    pub fn provider(&self) -> Arc<dyn DatastoreProvider> {
        Arc::clone(&self.provider)
    }

    /// The raw backend handle.
    pub fn handle(&self) -> &BackendHandle {
        &self.handle
    }

    /// Release the connection's resources.
    ///
    /// Runs the backend's release operation the first time it is called;
    /// subsequent calls are no-ops. Operations issued through the provider
    /// after cleanup yield backend-defined errors.
    pub async fn cleanup(&mut self) -> Result<()> {
        match self.cleanup.take() {
            Some(release) => release().await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for DatabaseObjects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseObjects")
            .field("handle", &self.handle)
            .field("cleanup_pending", &self.cleanup.is_some())
            .finish()
    }
}

/// Extract the mandatory string `id` field from a record.
pub(crate) fn record_id(record: &Value) -> Result<String> {
    record
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            crate::domain::PolystoreError::Validation(
                "record is missing a string \"id\" field".to_string(),
            )
        })
}
