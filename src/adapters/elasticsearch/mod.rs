//! Elasticsearch (search engine) backend
//!
//! Synchronous construction of a stateless HTTP client; cleanup is a no-op.

pub mod client;
pub mod provider;

pub use provider::ElasticsearchProvider;

use crate::adapters::datastore::registry::ConnectionBuilder;
use crate::adapters::datastore::traits::{BackendHandle, DatabaseObjects};
use crate::config::{BackendConfig, BackendKind};
use crate::domain::{NameResolver, PolystoreError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Builder for the search backend.
pub struct ElasticsearchBuilder;

#[async_trait]
impl ConnectionBuilder for ElasticsearchBuilder {
    fn kind(&self) -> BackendKind {
        BackendKind::Search
    }

    async fn build(
        &self,
        config: &BackendConfig,
        resolver: Arc<dyn NameResolver>,
    ) -> Result<DatabaseObjects> {
        match config {
            BackendConfig::Search(config) => {
                let client = client::build_client(config)?;
                let provider = Arc::new(ElasticsearchProvider::new(client.clone(), resolver));
                Ok(DatabaseObjects::new(provider, BackendHandle::Search(client)))
            }
            other => Err(PolystoreError::Configuration(format!(
                "search builder received {} configuration",
                other.kind()
            ))),
        }
    }
}
