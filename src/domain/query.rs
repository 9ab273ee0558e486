//! Backend-agnostic query values
//!
//! A [`SearchQuery`] describes what to match (equality filters), how much to
//! return (`limit`), and where to continue (`page`, an opaque continuation
//! token produced by a previous search against the same backend). Providers
//! translate it into backend-native calls; this layer never interprets the
//! page token beyond passing it through.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A backend-agnostic search query.
///
/// Filters are exact-equality matches against top-level record fields. The
/// `page` token is opaque: callers feed back whatever the previous
/// [`crate::orm::SearchResult`] carried.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Field name to expected value, matched for equality.
    #[serde(default)]
    pub filter: BTreeMap<String, Value>,

    /// Maximum number of records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Opaque continuation token from a previous search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Value>,
}

impl SearchQuery {
    /// Create an empty query matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter on a top-level field.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// Cap the number of returned records.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue from an opaque page token.
    pub fn page(mut self, token: Value) -> Self {
        self.page = Some(token);
        self
    }

    /// Whether a record satisfies every equality filter.
    ///
    /// Used by providers that filter in process (memory); backends with a
    /// native query language translate the filters instead.
    pub fn matches(&self, record: &Value) -> bool {
        self.filter
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

/// One page of raw records returned by a datastore provider.
///
/// `records` preserve the ordering produced by the backend; `page` is the
/// continuation token to hand back verbatim, or `None` when the result set is
/// exhausted.
#[derive(Debug, Clone)]
pub struct ProviderPage {
    /// Raw matched records, in backend order.
    pub records: Vec<Value>,

    /// Opaque continuation token, if more records may exist.
    pub page: Option<Value>,
}
