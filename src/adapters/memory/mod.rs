//! In-memory backend
//!
//! Volatile test double; construction is synchronous and cleanup is a no-op.

pub mod provider;

pub use provider::MemoryProvider;

use crate::adapters::datastore::registry::ConnectionBuilder;
use crate::adapters::datastore::traits::{BackendHandle, DatabaseObjects};
use crate::config::{BackendConfig, BackendKind};
use crate::domain::{NameResolver, PolystoreError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Builder for the in-memory backend.
pub struct MemoryBuilder;

#[async_trait]
impl ConnectionBuilder for MemoryBuilder {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn build(
        &self,
        config: &BackendConfig,
        resolver: Arc<dyn NameResolver>,
    ) -> Result<DatabaseObjects> {
        match config {
            BackendConfig::Memory(_) => {
                tracing::debug!("Creating in-memory datastore");
                let provider = Arc::new(MemoryProvider::new(resolver));
                Ok(DatabaseObjects::new(provider, BackendHandle::Memory))
            }
            other => Err(PolystoreError::Configuration(format!(
                "memory builder received {} configuration",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemoryConfig, NamingConfig};
    use crate::domain::DefaultNameResolver;

    #[tokio::test]
    async fn test_builder_returns_memory_handle() {
        let config = BackendConfig::Memory(MemoryConfig {
            naming: NamingConfig {
                environment: "dev".to_string(),
                system: "orders".to_string(),
            },
        });
        let resolver: Arc<dyn NameResolver> = Arc::new(DefaultNameResolver::new("dev", "orders"));

        let objects = MemoryBuilder.build(&config, resolver).await.unwrap();
        assert!(matches!(objects.handle(), BackendHandle::Memory));
    }
}
