//! Database-objects factory
//!
//! Public entry point of the layer: takes a tagged backend configuration,
//! dispatches to the matching connection builder through the registry, and
//! returns the normalized handle bundle.

use crate::adapters::datastore::registry::BackendRegistry;
use crate::adapters::datastore::traits::DatabaseObjects;
use crate::config::BackendConfig;
use crate::domain::{NameResolver, PolystoreError, Result};
use std::sync::Arc;

/// Create the database objects for a backend configuration
///
/// Dispatches to the builder registered for `config.kind()`. For
/// connection-oriented backends (the document store) this establishes a real
/// external connection; call it once per logical connection.
///
/// # Errors
///
/// Returns a configuration error before any connection attempt when the
/// configuration is invalid, and propagates builder connection errors
/// unchanged.
pub async fn get_database_objects(config: &BackendConfig) -> Result<DatabaseObjects> {
    let registry = BackendRegistry::with_default_builders();
    get_database_objects_from(&registry, config, None).await
}

/// Variant of [`get_database_objects`] with a caller-supplied name resolver
///
/// The resolver replaces the default `{environment}_{system}_{model}`
/// derivation for every physical name the backend computes.
pub async fn get_database_objects_with_resolver(
    config: &BackendConfig,
    resolver: Arc<dyn NameResolver>,
) -> Result<DatabaseObjects> {
    let registry = BackendRegistry::with_default_builders();
    get_database_objects_from(&registry, config, Some(resolver)).await
}

/// Variant of [`get_database_objects`] with an explicit registry
///
/// # Errors
///
/// Fails with [`PolystoreError::UnsupportedBackend`] when the registry has no
/// builder for the configuration's kind; no partial construction occurs.
pub async fn get_database_objects_from(
    registry: &BackendRegistry,
    config: &BackendConfig,
    resolver: Option<Arc<dyn NameResolver>>,
) -> Result<DatabaseObjects> {
    config
        .validate()
        .map_err(PolystoreError::Configuration)?;

    let kind = config.kind();
    let builder = registry
        .builder_for(kind)
        .ok_or_else(|| PolystoreError::UnsupportedBackend(kind.to_string()))?;

    let resolver: Arc<dyn NameResolver> =
        resolver.unwrap_or_else(|| Arc::new(config.default_resolver()));

    tracing::info!(backend = %kind, "Creating datastore connection");
    builder.build(config, resolver).await
}
