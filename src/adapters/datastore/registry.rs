//! Backend registry
//!
//! Maps each backend kind to its connection builder. The registry performs
//! dispatch only and holds no connection state; adding a backend means
//! registering a new builder, never editing a central branch.

use crate::adapters::datastore::traits::DatabaseObjects;
use crate::config::{BackendConfig, BackendKind};
use crate::domain::{NameResolver, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Connection builder trait
///
/// One implementation per backend kind. Builders are independent and must not
/// share state with each other; each receives the full tagged configuration
/// and the resolver to hand to its provider.
#[async_trait]
pub trait ConnectionBuilder: Send + Sync {
    /// The backend kind this builder constructs.
    fn kind(&self) -> BackendKind;

    /// Build a live connection and provider for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration fields are missing or the
    /// underlying connection attempt fails. No retry happens at this layer.
    async fn build(
        &self,
        config: &BackendConfig,
        resolver: Arc<dyn NameResolver>,
    ) -> Result<DatabaseObjects>;
}

/// Registry of connection builders keyed by backend kind
pub struct BackendRegistry {
    builders: HashMap<BackendKind, Box<dyn ConnectionBuilder>>,
}

impl BackendRegistry {
    /// Create a registry with no builders (for tests and custom assemblies).
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Create a registry covering every supported backend kind.
    pub fn with_default_builders() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(crate::adapters::memory::MemoryBuilder));
        registry.register(Box::new(crate::adapters::dynamodb::DynamoDbBuilder));
        registry.register(Box::new(crate::adapters::mongodb::MongoDbBuilder));
        registry.register(Box::new(crate::adapters::elasticsearch::ElasticsearchBuilder));
        registry.register(Box::new(crate::adapters::relational::RelationalBuilder));
        registry
    }

    /// Register a builder, replacing any existing builder for its kind.
    pub fn register(&mut self, builder: Box<dyn ConnectionBuilder>) {
        self.builders.insert(builder.kind(), builder);
    }

    /// Look up the builder for a backend kind.
    pub fn builder_for(&self, kind: BackendKind) -> Option<&dyn ConnectionBuilder> {
        self.builders.get(&kind).map(Box::as_ref)
    }

    /// The kinds this registry can build.
    pub fn kinds(&self) -> Vec<BackendKind> {
        self.builders.keys().copied().collect()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_default_builders()
    }
}
