//! Configuration schema types
//!
//! This module defines the tagged backend configuration consumed by the
//! database-objects factory. Exactly one variant is active per configuration
//! value; the tag fully determines which connection builder runs.

use crate::config::SecretString;
use crate::domain::DefaultNameResolver;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backend kind selection
///
/// The registry key for builder dispatch. The three relational dialects share
/// the `Relational` kind and one builder; the dialect lives in
/// [`RelationalConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Volatile in-memory storage (testing and default fallback)
    Memory,
    /// Distributed key-value store (DynamoDB)
    KeyValue,
    /// Document store (MongoDB)
    Document,
    /// Full-text search engine (Elasticsearch)
    Search,
    /// Relational database (SQLite, MySQL or PostgreSQL)
    Relational,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::KeyValue => write!(f, "key_value"),
            BackendKind::Document => write!(f, "document"),
            BackendKind::Search => write!(f, "search"),
            BackendKind::Relational => write!(f, "relational"),
        }
    }
}

/// Relational dialect selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// SQLite (file-based)
    Sqlite,
    /// MySQL
    Mysql,
    /// PostgreSQL
    Postgres,
}

impl Dialect {
    /// File-based dialects address a file path instead of a named database.
    pub fn is_file_based(&self) -> bool {
        matches!(self, Dialect::Sqlite)
    }

    /// Conventional server port for the dialect, if it has one.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Dialect::Sqlite => None,
            Dialect::Mysql => Some(3306),
            Dialect::Postgres => Some(5432),
        }
    }

    /// URL scheme understood by the sqlx Any driver.
    pub fn scheme(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.scheme())
    }
}

/// Identifiers every backend needs for physical-name derivation
///
/// Flattened into each backend variant, so TOML keeps `environment` and
/// `system` at the top level next to the `backend` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Environment identifier (e.g. "dev", "prod")
    pub environment: String,

    /// System identifier (the owning application or service)
    pub system: String,
}

impl NamingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.environment.is_empty() {
            return Err("environment cannot be empty".to_string());
        }
        if self.system.is_empty() {
            return Err("system cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Memory backend configuration
///
/// Carries only the naming identifiers; storage is process-local.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Naming identifiers
    #[serde(flatten)]
    pub naming: NamingConfig,
}

/// Transport tuning for the key-value store client
///
/// Connection reuse and pooling are the SDK's defaults; what this layer tunes
/// is how long the client waits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// End-to-end operation timeout in seconds
    #[serde(default = "default_operation_timeout_seconds")]
    pub operation_timeout_seconds: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: default_connect_timeout_seconds(),
            operation_timeout_seconds: default_operation_timeout_seconds(),
        }
    }
}

/// Key-value store (DynamoDB) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyValueConfig {
    /// Naming identifiers
    #[serde(flatten)]
    pub naming: NamingConfig,

    /// AWS region (e.g. "us-east-1")
    pub region: String,

    /// Static access key id
    ///
    /// Required because the builder is synchronous; the SDK's default
    /// credential chain is an asynchronous lookup.
    pub access_key_id: String,

    /// Static secret access key
    pub secret_access_key: SecretString,

    /// Optional transport tuning
    #[serde(default)]
    pub transport: TransportConfig,
}

impl KeyValueConfig {
    fn validate(&self) -> Result<(), String> {
        if self.region.is_empty() {
            return Err("key_value.region cannot be empty".to_string());
        }
        if self.access_key_id.is_empty() {
            return Err("key_value.access_key_id cannot be empty".to_string());
        }
        if self.secret_access_key.expose_secret().is_empty() {
            return Err("key_value.secret_access_key cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Document store (MongoDB) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Naming identifiers
    #[serde(flatten)]
    pub naming: NamingConfig,

    /// Server host name
    pub host: String,

    /// Server port
    #[serde(default = "default_document_port")]
    pub port: u16,

    /// Username for authentication (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for authentication (optional)
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Logical database name override
    ///
    /// When absent the name is computed from environment + system.
    #[serde(default)]
    pub database: Option<String>,

    /// Enable TLS on the connection
    #[serde(default)]
    pub tls: bool,
}

impl DocumentConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("document.host cannot be empty".to_string());
        }
        if self.username.is_some() && self.password.is_none() {
            return Err("document.password is required when document.username is set".to_string());
        }
        Ok(())
    }

    /// Logical database name: the configured override, or
    /// `{environment}_{system}` lowercased.
    pub fn database_name(&self) -> String {
        match &self.database {
            Some(name) => name.clone(),
            None => format!("{}_{}", self.naming.environment, self.naming.system).to_lowercase(),
        }
    }

    /// Driver connection URI.
    pub fn connection_uri(&self) -> String {
        let credentials = match (&self.username, &self.password) {
            (Some(user), Some(pass)) => format!("{}:{}@", user, pass.expose_secret()),
            _ => String::new(),
        };
        let tls = if self.tls { "?tls=true" } else { "" };
        format!(
            "mongodb://{}{}:{}/{}",
            credentials, self.host, self.port, tls
        )
    }
}

/// Search engine (Elasticsearch) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Naming identifiers
    #[serde(flatten)]
    pub naming: NamingConfig,

    /// Endpoint host name
    pub host: String,

    /// Endpoint port
    #[serde(default = "default_search_port")]
    pub port: u16,

    /// Username for basic authentication
    pub username: String,

    /// Password for basic authentication
    pub password: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl SearchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("search.host cannot be empty".to_string());
        }
        if self.username.is_empty() {
            return Err("search.username cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("search.password cannot be empty".to_string());
        }
        Ok(())
    }

    /// HTTPS endpoint the client is constructed over.
    pub fn endpoint(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

/// Relational database configuration (all three dialects)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationalConfig {
    /// Naming identifiers
    #[serde(flatten)]
    pub naming: NamingConfig,

    /// Dialect selection
    pub dialect: Dialect,

    /// Database name (server dialects only; file-based dialects address a path)
    #[serde(default)]
    pub database: Option<String>,

    /// Server host name (server dialects)
    #[serde(default)]
    pub host: Option<String>,

    /// Server port (server dialects; dialect default when absent)
    #[serde(default)]
    pub port: Option<u16>,

    /// Username for authentication (server dialects)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for authentication (server dialects)
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Database file path (file-based dialects)
    #[serde(default)]
    pub path: Option<String>,

    /// Extra driver options forwarded as URL parameters
    ///
    /// Factory-only keys (dialect, environment, system, pool size) are never
    /// forwarded; only what lands here reaches the driver.
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl RelationalConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dialect.is_file_based() {
            match &self.path {
                Some(path) if !path.is_empty() => Ok(()),
                _ => Err(format!(
                    "relational.path is required for the {} dialect",
                    self.dialect
                )),
            }
        } else {
            if self.host.as_deref().unwrap_or("").is_empty() {
                return Err(format!(
                    "relational.host is required for the {} dialect",
                    self.dialect
                ));
            }
            if self.database.as_deref().unwrap_or("").is_empty() {
                return Err(format!(
                    "relational.database is required for the {} dialect",
                    self.dialect
                ));
            }
            Ok(())
        }
    }
}

/// Tagged backend configuration
///
/// The `backend` tag selects the variant; each variant carries only the
/// fields its builder needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Volatile in-memory storage
    Memory(MemoryConfig),
    /// Distributed key-value store
    KeyValue(KeyValueConfig),
    /// Document store
    Document(DocumentConfig),
    /// Full-text search engine
    Search(SearchConfig),
    /// Relational database
    Relational(RelationalConfig),
}

impl BackendConfig {
    /// The backend kind this configuration targets.
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendConfig::Memory(_) => BackendKind::Memory,
            BackendConfig::KeyValue(_) => BackendKind::KeyValue,
            BackendConfig::Document(_) => BackendKind::Document,
            BackendConfig::Search(_) => BackendKind::Search,
            BackendConfig::Relational(_) => BackendKind::Relational,
        }
    }

    /// The naming identifiers shared by every variant.
    pub fn naming(&self) -> &NamingConfig {
        match self {
            BackendConfig::Memory(config) => &config.naming,
            BackendConfig::KeyValue(config) => &config.naming,
            BackendConfig::Document(config) => &config.naming,
            BackendConfig::Search(config) => &config.naming,
            BackendConfig::Relational(config) => &config.naming,
        }
    }

    /// Default name resolver derived from the naming identifiers.
    pub fn default_resolver(&self) -> DefaultNameResolver {
        let naming = self.naming();
        DefaultNameResolver::new(&naming.environment, &naming.system)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.naming().validate()?;
        match self {
            BackendConfig::Memory(_) => Ok(()),
            BackendConfig::KeyValue(config) => config.validate(),
            BackendConfig::Document(config) => config.validate(),
            BackendConfig::Search(config) => config.validate(),
            BackendConfig::Relational(config) => config.validate(),
        }
    }
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_operation_timeout_seconds() -> u64 {
    30
}

fn default_document_port() -> u16 {
    27017
}

fn default_search_port() -> u16 {
    9200
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    5
}
