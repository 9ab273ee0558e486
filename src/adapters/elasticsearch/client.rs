//! Elasticsearch client construction
//!
//! Synchronous construction of a stateless HTTP client over a single-node
//! HTTPS endpoint with embedded basic credentials. Nothing to release on
//! cleanup.

use crate::config::SearchConfig;
use crate::domain::{PolystoreError, Result};
use elasticsearch::auth::Credentials;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::http::Url;
use elasticsearch::Elasticsearch;
use secrecy::ExposeSecret;
use std::time::Duration;

/// Build an Elasticsearch client from configuration.
///
/// # Errors
///
/// Returns a configuration error for an unparsable endpoint and a connection
/// error if the transport cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<Elasticsearch> {
    let endpoint = config.endpoint();
    let url = Url::parse(&endpoint).map_err(|e| {
        PolystoreError::Configuration(format!("Invalid search endpoint {endpoint}: {e}"))
    })?;

    let pool = SingleNodeConnectionPool::new(url);
    let transport = TransportBuilder::new(pool)
        .auth(Credentials::Basic(
            config.username.clone(),
            config.password.expose_secret().as_ref().to_string(),
        ))
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .build()
        .map_err(|e| {
            PolystoreError::Connection(format!("Failed to build search transport: {e}"))
        })?;

    tracing::info!(endpoint = %endpoint, "Creating Elasticsearch client");
    Ok(Elasticsearch::new(transport))
}
