//! Backend integrations for polystore.
//!
//! This module contains the datastore abstraction and one adapter per
//! backend kind:
//!
//! - [`datastore`] - Provider contract, builder registry, and factory
//! - [`memory`] - Volatile in-memory test double
//! - [`dynamodb`] - Key-value store (DynamoDB)
//! - [`mongodb`] - Document store (MongoDB)
//! - [`elasticsearch`] - Full-text search engine (Elasticsearch)
//! - [`relational`] - SQLite/MySQL/PostgreSQL behind one sqlx implementation
//!
//! # Design Pattern
//!
//! Each adapter pairs a client constructor with a [`datastore::DatastoreProvider`]
//! implementation and registers a [`datastore::ConnectionBuilder`] keyed by
//! backend kind. The factory dispatches through the registry, so adding a
//! backend means registering a builder rather than editing a central branch.

pub mod datastore;
pub mod dynamodb;
pub mod elasticsearch;
pub mod memory;
pub mod mongodb;
pub mod relational;
