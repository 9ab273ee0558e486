//! Physical name resolution
//!
//! Every backend stores a model's records under a physical name: a DynamoDB
//! table, a MongoDB collection, an Elasticsearch index, or a SQL table. The
//! resolver maps a model's logical name to that physical name. It is
//! constructed once from the environment and system identifiers and must be a
//! pure function of its inputs, so identical inputs always resolve to
//! identical physical names.

/// Maps a model's logical name to the physical storage name used by a backend.
///
/// Implementations must be pure: no side effects, and the same model name must
/// always resolve to the same physical name.
pub trait NameResolver: Send + Sync {
    /// Resolve the physical storage name for a model.
    fn resolve(&self, model: &str) -> String;
}

/// Default resolver deriving `{environment}_{system}_{model}`, lowercased.
///
/// Used by every connection builder unless the caller injects a custom
/// resolver through the factory.
#[derive(Debug, Clone)]
pub struct DefaultNameResolver {
    environment: String,
    system: String,
}

impl DefaultNameResolver {
    /// Create a resolver for the given environment and system identifiers.
    pub fn new(environment: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            system: system.into(),
        }
    }
}

impl NameResolver for DefaultNameResolver {
    fn resolve(&self, model: &str) -> String {
        format!("{}_{}_{}", self.environment, self.system, model).to_lowercase()
    }
}
