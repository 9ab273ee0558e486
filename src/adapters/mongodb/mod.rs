//! MongoDB (document) backend
//!
//! The only connection-oriented backend: the builder awaits a live, verified
//! connection before returning, and cleanup shuts the client down.

pub mod client;
pub mod provider;

pub use provider::MongoDbProvider;

use crate::adapters::datastore::registry::ConnectionBuilder;
use crate::adapters::datastore::traits::{BackendHandle, CleanupFn, DatabaseObjects};
use crate::config::{BackendConfig, BackendKind};
use crate::domain::{NameResolver, PolystoreError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Builder for the document backend.
pub struct MongoDbBuilder;

#[async_trait]
impl ConnectionBuilder for MongoDbBuilder {
    fn kind(&self) -> BackendKind {
        BackendKind::Document
    }

    async fn build(
        &self,
        config: &BackendConfig,
        resolver: Arc<dyn NameResolver>,
    ) -> Result<DatabaseObjects> {
        match config {
            BackendConfig::Document(config) => {
                let client = client::connect(config).await?;
                let database = client.database(&config.database_name());
                let provider = Arc::new(MongoDbProvider::new(database, resolver));

                let cleanup_client = client.clone();
                let cleanup: CleanupFn = Box::new(move || {
                    Box::pin(async move {
                        cleanup_client.shutdown().await;
                        Ok(())
                    })
                });

                Ok(DatabaseObjects::with_cleanup(
                    provider,
                    BackendHandle::Document(client),
                    cleanup,
                ))
            }
            other => Err(PolystoreError::Configuration(format!(
                "document builder received {} configuration",
                other.kind()
            ))),
        }
    }
}
