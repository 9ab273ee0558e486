//! ORM binding
//!
//! The seam through which every backend's provider becomes usable by
//! application code: [`get_orm`] wraps a datastore provider into a model
//! factory ([`Orm::model`]) and an untyped query-execution function
//! ([`Orm::fetch`]). Pure delegation; provider errors propagate unchanged.

pub mod model;

pub use model::{BoundModel, Entity, Instance, SearchResult};

use crate::adapters::datastore::DatastoreProvider;
use crate::domain::{ProviderPage, Result, SearchQuery};
use std::sync::Arc;

/// A datastore provider bound for model definition and query execution.
#[derive(Clone)]
pub struct Orm {
    provider: Arc<dyn DatastoreProvider>,
}

/// Bind a datastore provider.
pub fn get_orm(provider: Arc<dyn DatastoreProvider>) -> Orm {
    Orm { provider }
}

impl Orm {
    /// Model-definition factory: bind an entity type to the provider.
    pub fn model<T: Entity>(&self) -> BoundModel<T> {
        BoundModel::new(Arc::clone(&self.provider))
    }

    /// Query-execution function ("fetcher") below the typed model layer.
    pub async fn fetch(&self, model: &str, query: &SearchQuery) -> Result<ProviderPage> {
        self.provider.search(model, query).await
    }

    /// The underlying provider capability.
    pub fn provider(&self) -> Arc<dyn DatastoreProvider> {
        Arc::clone(&self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryProvider;
    use crate::domain::DefaultNameResolver;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Widget {
        id: String,
    }

    impl Entity for Widget {
        const MODEL_NAME: &'static str = "widget";

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[tokio::test]
    async fn test_fetch_sees_model_writes() {
        let provider = Arc::new(MemoryProvider::new(Arc::new(DefaultNameResolver::new(
            "test", "unit",
        ))));
        let orm = get_orm(provider);

        orm.model::<Widget>()
            .create(Widget {
                id: "w1".to_string(),
            })
            .save()
            .await
            .unwrap();

        let page = orm.fetch("widget", &SearchQuery::new()).await.unwrap();
        assert_eq!(page.records, vec![json!({"id": "w1"})]);
    }
}
