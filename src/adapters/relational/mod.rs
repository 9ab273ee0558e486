//! Relational backend (SQLite, MySQL, PostgreSQL)
//!
//! The three dialects share one implementation. Construction is synchronous:
//! the pool is created lazily and connects on first use, and cleanup is a
//! no-op because pool lifecycle is left to the driver.

pub mod options;
pub mod provider;

pub use options::{driver_options, DriverOptions};
pub use provider::RelationalProvider;

use crate::adapters::datastore::registry::ConnectionBuilder;
use crate::adapters::datastore::traits::{BackendHandle, DatabaseObjects};
use crate::config::{BackendConfig, BackendKind};
use crate::domain::{NameResolver, PolystoreError, Result};
use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use std::sync::Arc;

/// Builder for the relational backend.
pub struct RelationalBuilder;

#[async_trait]
impl ConnectionBuilder for RelationalBuilder {
    fn kind(&self) -> BackendKind {
        BackendKind::Relational
    }

    async fn build(
        &self,
        config: &BackendConfig,
        resolver: Arc<dyn NameResolver>,
    ) -> Result<DatabaseObjects> {
        match config {
            BackendConfig::Relational(config) => {
                sqlx::any::install_default_drivers();

                let options = driver_options(config)?;
                tracing::info!(dialect = %config.dialect, "Creating relational pool");

                let pool = AnyPoolOptions::new()
                    .max_connections(options.max_connections)
                    .connect_lazy(&options.url)
                    .map_err(|e| {
                        PolystoreError::Configuration(format!(
                            "Invalid {} connection options: {e}",
                            config.dialect
                        ))
                    })?;

                let provider = Arc::new(RelationalProvider::new(
                    pool.clone(),
                    config.dialect,
                    resolver,
                ));
                Ok(DatabaseObjects::new(
                    provider,
                    BackendHandle::Relational(pool),
                ))
            }
            other => Err(PolystoreError::Configuration(format!(
                "relational builder received {} configuration",
                other.kind()
            ))),
        }
    }
}
