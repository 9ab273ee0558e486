//! Integration tests for the backend registry and database-objects factory

use async_trait::async_trait;
use polystore::adapters::datastore::{
    get_database_objects, get_database_objects_from, get_database_objects_with_resolver,
    BackendHandle, BackendRegistry, ConnectionBuilder, DatabaseObjects,
};
use polystore::adapters::memory::MemoryProvider;
use polystore::config::{BackendConfig, BackendKind, MemoryConfig, NamingConfig};
use polystore::domain::{NameResolver, PolystoreError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn memory_config() -> BackendConfig {
    BackendConfig::Memory(MemoryConfig {
        naming: NamingConfig {
            environment: "test".to_string(),
            system: "integration".to_string(),
        },
    })
}

/// Builder that records how many times it was invoked.
struct RecordingBuilder {
    kind: BackendKind,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ConnectionBuilder for RecordingBuilder {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn build(
        &self,
        _config: &BackendConfig,
        resolver: Arc<dyn NameResolver>,
    ) -> Result<DatabaseObjects> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let provider = Arc::new(MemoryProvider::new(resolver));
        Ok(DatabaseObjects::new(provider, BackendHandle::Memory))
    }
}

#[tokio::test]
async fn test_factory_invokes_exactly_one_matching_builder() {
    let kinds = [
        BackendKind::Memory,
        BackendKind::KeyValue,
        BackendKind::Document,
        BackendKind::Search,
        BackendKind::Relational,
    ];

    let mut registry = BackendRegistry::empty();
    let counters: Vec<Arc<AtomicUsize>> = kinds
        .iter()
        .map(|&kind| {
            let calls = Arc::new(AtomicUsize::new(0));
            registry.register(Box::new(RecordingBuilder {
                kind,
                calls: Arc::clone(&calls),
            }));
            calls
        })
        .collect();

    get_database_objects_from(&registry, &memory_config(), None)
        .await
        .unwrap();

    for (kind, calls) in kinds.iter().zip(&counters) {
        let expected = if *kind == BackendKind::Memory { 1 } else { 0 };
        assert_eq!(
            calls.load(Ordering::SeqCst),
            expected,
            "unexpected call count for {kind}"
        );
    }
}

#[tokio::test]
async fn test_unregistered_kind_fails_without_side_effects() {
    let registry = BackendRegistry::empty();

    let err = get_database_objects_from(&registry, &memory_config(), None)
        .await
        .unwrap_err();

    match err {
        PolystoreError::UnsupportedBackend(kind) => assert_eq!(kind, "memory"),
        other => panic!("expected UnsupportedBackend, got: {other}"),
    }
}

#[tokio::test]
async fn test_invalid_config_fails_before_dispatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::empty();
    registry.register(Box::new(RecordingBuilder {
        kind: BackendKind::Memory,
        calls: Arc::clone(&calls),
    }));

    let config = BackendConfig::Memory(MemoryConfig {
        naming: NamingConfig {
            environment: String::new(),
            system: "integration".to_string(),
        },
    });

    let err = get_database_objects_from(&registry, &config, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PolystoreError::Configuration(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_memory_backend_builds_and_cleans_up() {
    let mut objects = get_database_objects(&memory_config()).await.unwrap();
    assert!(matches!(objects.handle(), BackendHandle::Memory));

    // Cleanup is a no-op for the memory backend and stays idempotent.
    objects.cleanup().await.unwrap();
    objects.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_custom_resolver_reaches_the_provider() {
    struct Pinned;
    impl NameResolver for Pinned {
        fn resolve(&self, _model: &str) -> String {
            "shared_table".to_string()
        }
    }

    let objects = get_database_objects_with_resolver(&memory_config(), Arc::new(Pinned))
        .await
        .unwrap();
    let provider = objects.provider();

    // Every model resolves to the same physical name, so a record written
    // under one model is visible under another.
    provider
        .upsert("user", serde_json::json!({"id": "1"}))
        .await
        .unwrap();
    let found = provider.find_by_id("order", "1").await.unwrap();
    assert!(found.is_some());
}
