//! Dialect-aware driver connection options
//!
//! The relational builder turns its configuration into the URL handed to the
//! sqlx Any driver. File-based dialects address a file path and never carry a
//! named `database` component; server dialects always do. Factory-only keys
//! (dialect, environment, system, pool size) are stripped here; only what
//! this module emits reaches the driver.

use crate::config::{Dialect, RelationalConfig};
use crate::domain::{PolystoreError, Result};
use secrecy::ExposeSecret;

/// What the relational builder forwards to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    /// Connection URL in the dialect's scheme
    pub url: String,

    /// Maximum pool size (pool tuning, not part of the URL)
    pub max_connections: u32,
}

/// Build driver connection options from a relational configuration.
///
/// # Errors
///
/// Returns a configuration error when required fields for the dialect are
/// absent (also enforced by config validation).
pub fn driver_options(config: &RelationalConfig) -> Result<DriverOptions> {
    let url = match config.dialect {
        Dialect::Sqlite => file_url(config)?,
        Dialect::Mysql | Dialect::Postgres => server_url(config)?,
    };

    Ok(DriverOptions {
        url,
        max_connections: config.max_connections,
    })
}

fn file_url(config: &RelationalConfig) -> Result<String> {
    let path = config.path.as_deref().filter(|p| !p.is_empty()).ok_or_else(|| {
        PolystoreError::Configuration(format!(
            "relational.path is required for the {} dialect",
            config.dialect
        ))
    })?;

    // The database file is created on first use unless the caller overrides
    // the open mode.
    let mut params = config.params.clone();
    params.entry("mode".to_string()).or_insert_with(|| "rwc".to_string());

    Ok(format!(
        "{}://{}{}",
        config.dialect.scheme(),
        path,
        query_string(&params)
    ))
}

fn server_url(config: &RelationalConfig) -> Result<String> {
    let host = config.host.as_deref().filter(|h| !h.is_empty()).ok_or_else(|| {
        PolystoreError::Configuration(format!(
            "relational.host is required for the {} dialect",
            config.dialect
        ))
    })?;
    let database = config
        .database
        .as_deref()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            PolystoreError::Configuration(format!(
                "relational.database is required for the {} dialect",
                config.dialect
            ))
        })?;

    let credentials = match (&config.username, &config.password) {
        (Some(user), Some(pass)) => format!("{}:{}@", user, pass.expose_secret()),
        (Some(user), None) => format!("{user}@"),
        _ => String::new(),
    };

    let port = config
        .port
        .or_else(|| config.dialect.default_port())
        .map(|p| format!(":{p}"))
        .unwrap_or_default();

    Ok(format!(
        "{}://{}{}{}/{}{}",
        config.dialect.scheme(),
        credentials,
        host,
        port,
        database,
        query_string(&config.params)
    ))
}

fn query_string(params: &std::collections::BTreeMap<String, String>) -> String {
    if params.is_empty() {
        return String::new();
    }
    let joined: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    format!("?{}", joined.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NamingConfig, RelationalConfig};
    use std::collections::BTreeMap;
    use test_case::test_case;

    fn base(dialect: Dialect) -> RelationalConfig {
        RelationalConfig {
            naming: NamingConfig {
                environment: "dev".to_string(),
                system: "orders".to_string(),
            },
            dialect,
            database: Some("orders".to_string()),
            host: Some("db.internal".to_string()),
            port: None,
            username: Some("app".to_string()),
            password: Some(crate::config::secret_string("pw")),
            path: Some("/var/lib/orders.db".to_string()),
            params: BTreeMap::new(),
            max_connections: 5,
        }
    }

    #[test]
    fn test_sqlite_url_omits_database_component() {
        let options = driver_options(&base(Dialect::Sqlite)).unwrap();
        assert_eq!(options.url, "sqlite:///var/lib/orders.db?mode=rwc");
        assert!(!options.url.contains("orders.db/orders"));
    }

    #[test_case(Dialect::Mysql, "mysql://app:pw@db.internal:3306/orders" ; "mysql includes database")]
    #[test_case(Dialect::Postgres, "postgres://app:pw@db.internal:5432/orders" ; "postgres includes database")]
    fn test_server_url_includes_database_component(dialect: Dialect, expected: &str) {
        let options = driver_options(&base(dialect)).unwrap();
        assert_eq!(options.url, expected);
    }

    #[test]
    fn test_explicit_port_wins_over_dialect_default() {
        let mut config = base(Dialect::Postgres);
        config.port = Some(6432);
        let options = driver_options(&config).unwrap();
        assert!(options.url.contains("db.internal:6432"));
    }

    #[test]
    fn test_driver_params_are_forwarded() {
        let mut config = base(Dialect::Postgres);
        config
            .params
            .insert("sslmode".to_string(), "require".to_string());
        let options = driver_options(&config).unwrap();
        assert!(options.url.ends_with("/orders?sslmode=require"));
    }

    #[test]
    fn test_factory_only_keys_never_reach_the_driver() {
        let options = driver_options(&base(Dialect::Mysql)).unwrap();
        assert!(!options.url.contains("dev"));
        assert!(!options.url.contains("system"));
        assert!(!options.url.contains("max_connections"));
        assert!(!options.url.contains("dialect"));
    }

    #[test]
    fn test_sqlite_caller_open_mode_wins() {
        let mut config = base(Dialect::Sqlite);
        config
            .params
            .insert("mode".to_string(), "ro".to_string());
        let options = driver_options(&config).unwrap();
        assert!(options.url.ends_with("?mode=ro"));
    }

    #[test]
    fn test_missing_path_is_a_configuration_error() {
        let mut config = base(Dialect::Sqlite);
        config.path = None;
        assert!(driver_options(&config).is_err());
    }

    #[test]
    fn test_missing_database_is_a_configuration_error() {
        let mut config = base(Dialect::Postgres);
        config.database = None;
        assert!(driver_options(&config).is_err());
    }
}
