//! End-to-end tests for the CRUD+search service over the memory backend
//!
//! Exercises the full chain: factory -> provider -> ORM binding -> service.

use polystore::adapters::datastore::get_database_objects;
use polystore::config::{BackendConfig, MemoryConfig, NamingConfig};
use polystore::domain::SearchQuery;
use polystore::orm::{get_orm, Entity};
use polystore::service::{simple_cruds_service, CrudsService};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    id: String,
    name: String,
    #[serde(default)]
    tier: String,
}

impl Entity for Account {
    const MODEL_NAME: &'static str = "account";

    fn id(&self) -> &str {
        &self.id
    }
}

fn account(id: &str, name: &str, tier: &str) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        tier: tier.to_string(),
    }
}

async fn service() -> CrudsService<Account> {
    let config = BackendConfig::Memory(MemoryConfig {
        naming: NamingConfig {
            environment: "test".to_string(),
            system: "cruds".to_string(),
        },
    });
    let objects = get_database_objects(&config).await.unwrap();
    simple_cruds_service(get_orm(objects.provider()).model())
}

#[tokio::test]
async fn test_create_then_retrieve_returns_equal_value() {
    let accounts = service().await;

    accounts.create(account("1", "a", "free")).await.unwrap();

    let found = accounts.retrieve("1").await.unwrap();
    assert_eq!(found, Some(account("1", "a", "free")));
}

#[tokio::test]
async fn test_retrieve_unknown_id_is_absent_not_an_error() {
    let accounts = service().await;
    assert_eq!(accounts.retrieve("nope").await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_missing_completes_without_altering_data() {
    let accounts = service().await;
    accounts.create(account("1", "a", "free")).await.unwrap();

    accounts.delete("missing").await.unwrap();

    let all = accounts.search(&SearchQuery::new()).await.unwrap();
    assert_eq!(all.instances.len(), 1);
}

#[tokio::test]
async fn test_update_is_an_upsert() {
    let accounts = service().await;
    accounts.create(account("1", "a", "free")).await.unwrap();
    accounts.update(account("1", "a", "paid")).await.unwrap();

    let found = accounts.retrieve("1").await.unwrap().unwrap();
    assert_eq!(found.tier, "paid");

    // Updating an id never seen before also persists.
    accounts.update(account("9", "z", "free")).await.unwrap();
    assert!(accounts.retrieve("9").await.unwrap().is_some());
}

#[tokio::test]
async fn test_search_filters_and_preserves_provider_order() {
    let accounts = service().await;
    for (id, name, tier) in [
        ("3", "carol", "paid"),
        ("1", "alice", "paid"),
        ("2", "bob", "free"),
    ] {
        accounts.create(account(id, name, tier)).await.unwrap();
    }

    let paid = accounts
        .search(&SearchQuery::new().filter("tier", "paid"))
        .await
        .unwrap();

    let ids: Vec<_> = paid.instances.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert!(paid.page.is_none());
}

#[tokio::test]
async fn test_search_pages_to_exhaustion() {
    let accounts = service().await;
    for id in ["1", "2", "3", "4", "5"] {
        accounts.create(account(id, "x", "free")).await.unwrap();
    }

    let mut seen = Vec::new();
    let mut query = SearchQuery::new().limit(2);
    loop {
        let result = accounts.search(&query).await.unwrap();
        seen.extend(result.instances.into_iter().map(|a| a.id));
        match result.page {
            Some(token) => query = SearchQuery::new().limit(2).page(token),
            None => break,
        }
    }

    assert_eq!(seen, vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn test_services_share_one_connection() {
    let config = BackendConfig::Memory(MemoryConfig {
        naming: NamingConfig {
            environment: "test".to_string(),
            system: "cruds".to_string(),
        },
    });
    let mut objects = get_database_objects(&config).await.unwrap();
    let orm = get_orm(objects.provider());

    let a: CrudsService<Account> = simple_cruds_service(orm.model());
    let b: CrudsService<Account> = simple_cruds_service(orm.model());

    a.create(account("1", "a", "free")).await.unwrap();
    assert!(b.retrieve("1").await.unwrap().is_some());

    objects.cleanup().await.unwrap();
}
