//! MongoDB client construction
//!
//! The document store is connection-oriented: construction parses the URI,
//! builds the client, and awaits a ping against the logical database before
//! returning, so a bad endpoint surfaces here rather than on first use.

use crate::config::DocumentConfig;
use crate::domain::{PolystoreError, Result};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;

/// Connect to MongoDB and verify the connection.
///
/// # Errors
///
/// Returns a connection error if the URI is malformed, the client cannot be
/// constructed, or the ping fails. Transient failures are surfaced
/// immediately; retry policy belongs to the caller.
pub async fn connect(config: &DocumentConfig) -> Result<Client> {
    let uri = config.connection_uri();

    let options = ClientOptions::parse(&uri).await.map_err(|e| {
        PolystoreError::Connection(format!("Invalid MongoDB connection URI: {e}"))
    })?;

    let client = Client::with_options(options).map_err(|e| {
        PolystoreError::Connection(format!("Failed to create MongoDB client: {e}"))
    })?;

    let database = config.database_name();
    client
        .database(&database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| {
            PolystoreError::Connection(format!(
                "Failed to connect to MongoDB at {}:{}: {e}",
                config.host, config.port
            ))
        })?;

    tracing::info!(host = %config.host, database = %database, "Connected to MongoDB");
    Ok(client)
}
