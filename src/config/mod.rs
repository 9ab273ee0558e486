//! Configuration management for polystore.
//!
//! Backend selection is driven by a tagged configuration value: the `backend`
//! tag picks the variant, and each variant carries only the fields its
//! connection builder needs. Configuration is an in-process value; a TOML
//! loader with `${VAR}` environment substitution is provided for services
//! that keep it on disk.
//!
//! # Example Configuration
//!
//! ```toml
//! backend = "relational"
//! environment = "dev"
//! system = "orders"
//! dialect = "postgres"
//! host = "db.internal"
//! database = "orders"
//! username = "app"
//! password = "${ORDERS_DB_PASSWORD}"
//! ```
//!
//! Credentials deserialize into [`SecretString`] values that redact Debug
//! output and zero their memory on drop.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    BackendConfig, BackendKind, Dialect, DocumentConfig, KeyValueConfig, MemoryConfig,
    NamingConfig, RelationalConfig, SearchConfig, TransportConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
