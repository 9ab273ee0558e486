// Polystore - Runtime-selectable datastore access layer
// Copyright (c) 2025 Polystore Contributors
// Licensed under the MIT License

//! # Polystore - Runtime-selectable datastore access layer
//!
//! Polystore lets application services read and write domain models without
//! knowing which physical storage technology backs them. A tagged
//! configuration selects one of seven backend kinds (in-memory, DynamoDB,
//! MongoDB, Elasticsearch, or a relational database in its SQLite, MySQL or
//! PostgreSQL dialect), and the factory returns a uniform provider capability
//! plus an explicit cleanup operation. An ORM binding then turns that
//! provider into typed models with generic CRUD and search operations.
//!
//! ## Architecture
//!
//! - [`config`] - Tagged backend configuration, TOML loading, secrets
//! - [`domain`] - Errors, name resolution, query values
//! - [`adapters`] - Per-backend clients and providers, registry, factory
//! - [`orm`] - Provider binding, typed models and instances
//! - [`service`] - Generic CRUD+search service
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polystore::adapters::datastore::get_database_objects;
//! use polystore::config::load_config;
//! use polystore::orm::{get_orm, Entity};
//! use polystore::service::simple_cruds_service;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Customer {
//!     id: String,
//!     name: String,
//! }
//!
//! impl Entity for Customer {
//!     const MODEL_NAME: &'static str = "customer";
//!
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("polystore.toml")?;
//!
//!     let mut objects = get_database_objects(&config).await?;
//!     let orm = get_orm(objects.provider());
//!     let customers = simple_cruds_service(orm.model::<Customer>());
//!
//!     let created = customers
//!         .create(Customer {
//!             id: "c-1".to_string(),
//!             name: "Ada".to_string(),
//!         })
//!         .await?;
//!     println!("created {}", created.id);
//!
//!     objects.cleanup().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with
//! [`domain::PolystoreError`]; backend driver errors propagate unchanged
//! apart from stringification, and "not found" is an `Ok(None)` outcome, not
//! an error.
//!
//! ## Logging
//!
//! Polystore emits structured events through the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(backend = "relational", "creating datastore connection");
//! warn!(table = "dev_orders_user", "table missing, creating");
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod logging;
pub mod orm;
pub mod service;
