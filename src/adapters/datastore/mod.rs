//! Datastore abstraction layer
//!
//! The provider contract, the builder registry, and the factory that turns a
//! tagged backend configuration into a live connection bundle.

pub mod factory;
pub mod registry;
pub mod traits;

pub use factory::{
    get_database_objects, get_database_objects_from, get_database_objects_with_resolver,
};
pub use registry::{BackendRegistry, ConnectionBuilder};
pub use traits::{BackendHandle, CleanupFn, CleanupFuture, DatabaseObjects, DatastoreProvider};
