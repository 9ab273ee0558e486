//! DynamoDB (key-value) backend
//!
//! Synchronous client construction; the client holds no resources requiring
//! explicit release beyond process exit, so cleanup is a no-op.

pub mod client;
pub mod convert;
pub mod provider;

pub use provider::DynamoDbProvider;

use crate::adapters::datastore::registry::ConnectionBuilder;
use crate::adapters::datastore::traits::{BackendHandle, DatabaseObjects};
use crate::config::{BackendConfig, BackendKind};
use crate::domain::{NameResolver, PolystoreError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Builder for the key-value backend.
pub struct DynamoDbBuilder;

#[async_trait]
impl ConnectionBuilder for DynamoDbBuilder {
    fn kind(&self) -> BackendKind {
        BackendKind::KeyValue
    }

    async fn build(
        &self,
        config: &BackendConfig,
        resolver: Arc<dyn NameResolver>,
    ) -> Result<DatabaseObjects> {
        match config {
            BackendConfig::KeyValue(config) => {
                let client = client::build_client(config)?;
                let provider = Arc::new(DynamoDbProvider::new(client.clone(), resolver));
                Ok(DatabaseObjects::new(
                    provider,
                    BackendHandle::KeyValue(client),
                ))
            }
            other => Err(PolystoreError::Configuration(format!(
                "key-value builder received {} configuration",
                other.kind()
            ))),
        }
    }
}
