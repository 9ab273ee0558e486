//! Domain types for polystore.
//!
//! This module contains the types shared by every layer of the crate:
//!
//! - **Error types** ([`PolystoreError`]) and the [`Result`] alias
//! - **Name resolution** ([`NameResolver`], [`DefaultNameResolver`])
//! - **Query values** ([`SearchQuery`], [`ProviderPage`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PolystoreError>`]:
//!
//! ```rust
//! use polystore::domain::{PolystoreError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(PolystoreError::Validation("record is missing an id".into()))
//! }
//! ```

pub mod errors;
pub mod naming;
pub mod query;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::PolystoreError;
pub use naming::{DefaultNameResolver, NameResolver};
pub use query::{ProviderPage, SearchQuery};
pub use result::Result;
