//! Generic CRUD+search service
//!
//! A stateless wrapper bound to exactly one model, exposing a uniform
//! operation set independent of backend kind. It exists only as a closure
//! over its model: no identity, no storage, no per-call state, so one
//! service value is safely shared across concurrent callers.

use crate::domain::{PolystoreError, Result, SearchQuery};
use crate::orm::{BoundModel, Entity, SearchResult};

/// Create/update/delete/retrieve/search over one bound model.
pub struct CrudsService<T> {
    model: BoundModel<T>,
}

impl<T> Clone for CrudsService<T> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
        }
    }
}

/// Wrap a bound model into a CRUD+search service.
pub fn simple_cruds_service<T: Entity>(model: BoundModel<T>) -> CrudsService<T> {
    CrudsService { model }
}

impl<T: Entity> CrudsService<T> {
    /// Persist a new entity, returning the persisted materialized form.
    ///
    /// # Errors
    ///
    /// Fails with [`PolystoreError::InvariantViolation`] if persistence
    /// reports no resulting instance.
    pub async fn create(&self, data: T) -> Result<T> {
        self.persist(data).await
    }

    /// Persist an updated entity; identical behavior to [`Self::create`].
    pub async fn update(&self, data: T) -> Result<T> {
        self.persist(data).await
    }

    async fn persist(&self, data: T) -> Result<T> {
        let instance = self.model.create(data);
        match instance.save().await? {
            Some(saved) => Ok(saved),
            // The ORM contract should make this impossible; check anyway.
            None => Err(PolystoreError::InvariantViolation(format!(
                "save of {} returned no instance",
                T::MODEL_NAME
            ))),
        }
    }

    /// Look up an entity by primary identifier.
    ///
    /// Returns `Ok(None)` when no entity has that identifier; absence is
    /// never an error.
    pub async fn retrieve(&self, id: &str) -> Result<Option<T>> {
        self.model.retrieve(id).await
    }

    /// Delete the entity with the given identifier.
    ///
    /// Idempotent: deleting an absent entity completes successfully as a
    /// no-op.
    pub async fn delete(&self, id: &str) -> Result<()> {
        match self.model.retrieve(id).await? {
            None => Ok(()),
            Some(found) => self.model.create(found).delete().await,
        }
    }

    /// Execute a backend-agnostic query, materializing every matched entity
    /// in provider order; the page token passes through unchanged.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult<T>> {
        self.model.search(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::datastore::DatastoreProvider;
    use crate::adapters::memory::MemoryProvider;
    use crate::domain::{DefaultNameResolver, ProviderPage};
    use crate::orm::get_orm;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use serde_json::Value;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        id: String,
        name: String,
    }

    impl Entity for User {
        const MODEL_NAME: &'static str = "user";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn service() -> CrudsService<User> {
        let provider = Arc::new(MemoryProvider::new(Arc::new(DefaultNameResolver::new(
            "test", "unit",
        ))));
        simple_cruds_service(get_orm(provider).model())
    }

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_retrieve_round_trip() {
        let service = service();
        let created = service.create(user("1", "a")).await.unwrap();
        assert_eq!(created, user("1", "a"));

        let found = service.retrieve("1").await.unwrap();
        assert_eq!(found, Some(user("1", "a")));
    }

    #[tokio::test]
    async fn test_update_overwrites() {
        let service = service();
        service.create(user("1", "a")).await.unwrap();
        service.update(user("1", "b")).await.unwrap();

        let found = service.retrieve("1").await.unwrap().unwrap();
        assert_eq!(found.name, "b");
    }

    #[tokio::test]
    async fn test_retrieve_absent_is_none() {
        let service = service();
        assert_eq!(service.retrieve("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_absent_is_a_noop() {
        let service = service();
        service.create(user("1", "a")).await.unwrap();

        service.delete("missing").await.unwrap();
        assert!(service.retrieve("1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_present_removes() {
        let service = service();
        service.create(user("1", "a")).await.unwrap();

        service.delete("1").await.unwrap();
        assert_eq!(service.retrieve("1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_search_returns_page_token_unchanged() {
        let service = service();
        for id in ["1", "2", "3"] {
            service.create(user(id, "x")).await.unwrap();
        }

        let result = service.search(&SearchQuery::new().limit(2)).await.unwrap();
        assert_eq!(result.instances.len(), 2);
        assert_eq!(result.page, Some(serde_json::json!(2)));
    }

    /// Provider that persists nothing and reports no instance back.
    struct AmnesiacProvider;

    #[async_trait]
    impl DatastoreProvider for AmnesiacProvider {
        async fn upsert(&self, _model: &str, _record: Value) -> Result<Option<Value>> {
            Ok(None)
        }

        async fn find_by_id(&self, _model: &str, _id: &str) -> Result<Option<Value>> {
            Ok(None)
        }

        async fn delete_by_id(&self, _model: &str, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn search(&self, _model: &str, _query: &SearchQuery) -> Result<ProviderPage> {
            Ok(ProviderPage {
                records: Vec::new(),
                page: None,
            })
        }
    }

    #[tokio::test]
    async fn test_missing_instance_after_save_is_an_invariant_violation() {
        let service = simple_cruds_service(get_orm(Arc::new(AmnesiacProvider)).model::<User>());

        let err = service.create(user("1", "a")).await.unwrap_err();
        assert!(matches!(err, PolystoreError::InvariantViolation(_)));
    }

    /// Provider with a canned result page carrying an arbitrary token.
    struct CannedPageProvider;

    #[async_trait]
    impl DatastoreProvider for CannedPageProvider {
        async fn upsert(&self, _model: &str, record: Value) -> Result<Option<Value>> {
            Ok(Some(record))
        }

        async fn find_by_id(&self, _model: &str, _id: &str) -> Result<Option<Value>> {
            Ok(None)
        }

        async fn delete_by_id(&self, _model: &str, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn search(&self, _model: &str, _query: &SearchQuery) -> Result<ProviderPage> {
            Ok(ProviderPage {
                records: vec![
                    serde_json::json!({"id": "2", "name": "b"}),
                    serde_json::json!({"id": "1", "name": "a"}),
                ],
                page: Some(serde_json::json!({"cursor": "opaque-backend-token"})),
            })
        }
    }

    #[tokio::test]
    async fn test_search_passes_provider_order_and_token_through() {
        let service = simple_cruds_service(get_orm(Arc::new(CannedPageProvider)).model::<User>());

        let result = service.search(&SearchQuery::new()).await.unwrap();

        // The provider's ordering survives materialization, and its token
        // comes back byte-for-byte.
        let ids: Vec<_> = result.instances.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(
            result.page,
            Some(serde_json::json!({"cursor": "opaque-backend-token"}))
        );
    }
}
