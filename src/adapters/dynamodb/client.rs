//! DynamoDB client construction
//!
//! Construction is synchronous: region, static credentials, and timeout
//! tuning come straight from configuration, with no async credential-chain
//! lookup. Connection reuse is the SDK transport's default behavior.

use crate::config::KeyValueConfig;
use crate::domain::Result;
use aws_sdk_dynamodb::config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::Client;
use secrecy::ExposeSecret;
use std::time::Duration;

/// Build a DynamoDB client from configuration.
///
/// # Errors
///
/// This construction itself is infallible once configuration has been
/// validated; the signature stays fallible to match the other client
/// constructors.
pub fn build_client(config: &KeyValueConfig) -> Result<Client> {
    let credentials = Credentials::new(
        config.access_key_id.clone(),
        config.secret_access_key.expose_secret().as_ref().to_string(),
        None,
        None,
        "polystore",
    );

    let timeouts = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(config.transport.connect_timeout_seconds))
        .operation_timeout(Duration::from_secs(
            config.transport.operation_timeout_seconds,
        ))
        .build();

    let sdk_config = aws_sdk_dynamodb::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .timeout_config(timeouts)
        .build();

    tracing::info!(region = %config.region, "Creating DynamoDB client");
    Ok(Client::from_conf(sdk_config))
}
