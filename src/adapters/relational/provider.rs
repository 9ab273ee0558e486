//! Relational datastore provider
//!
//! One implementation serves all three dialects. Records are stored as JSON
//! text in a two-column table (`id`, `doc`) created on first use. The
//! dialects differ only in bind-parameter markers and the expression that
//! extracts a JSON field for filtering; both are isolated in pure helpers
//! below. Filter values are compared by their JSON text representation.

use crate::adapters::datastore::traits::{record_id, DatastoreProvider};
use crate::config::Dialect;
use crate::domain::{NameResolver, PolystoreError, ProviderPage, Result, SearchQuery};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{AnyPool, Row};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Provider over a sqlx Any pool.
pub struct RelationalProvider {
    pool: AnyPool,
    dialect: Dialect,
    resolver: Arc<dyn NameResolver>,
    ensured: Mutex<HashSet<String>>,
}

impl RelationalProvider {
    /// Wrap a pool, dialect and resolver.
    pub fn new(pool: AnyPool, dialect: Dialect, resolver: Arc<dyn NameResolver>) -> Self {
        Self {
            pool,
            dialect,
            resolver,
            ensured: Mutex::new(HashSet::new()),
        }
    }

    fn table(&self, model: &str) -> Result<String> {
        let table = self.resolver.resolve(model);
        safe_identifier(&table)?;
        Ok(table)
    }

    async fn ensure_table(&self, table: &str) -> Result<()> {
        // Check-then-create without holding the lock across the DDL round
        // trip; IF NOT EXISTS makes concurrent creation harmless.
        if self.ensured.lock().await.contains(table) {
            return Ok(());
        }

        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {table} (id VARCHAR(255) PRIMARY KEY, doc TEXT NOT NULL)"
        );
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| PolystoreError::Database(format!("create table {table} failed: {e}")))?;

        self.ensured.lock().await.insert(table.to_string());
        Ok(())
    }
}

/// Bind-parameter marker for the dialect at a 1-based position.
pub(crate) fn placeholder(dialect: Dialect, position: usize) -> String {
    match dialect {
        Dialect::Postgres => format!("${position}"),
        Dialect::Sqlite | Dialect::Mysql => "?".to_string(),
    }
}

/// Expression extracting a top-level JSON field from `doc` as text.
pub(crate) fn json_field_expr(dialect: Dialect, field: &str) -> String {
    match dialect {
        Dialect::Sqlite => format!("CAST(json_extract(doc, '$.{field}') AS TEXT)"),
        Dialect::Mysql => format!("CAST(JSON_UNQUOTE(JSON_EXTRACT(doc, '$.{field}')) AS CHAR)"),
        Dialect::Postgres => format!("(doc::jsonb ->> '{field}')"),
    }
}

/// Text representation a filter value is compared against.
pub(crate) fn bind_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Reject identifiers that cannot be embedded in SQL safely.
pub(crate) fn safe_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_head = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if valid_head && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(PolystoreError::Validation(format!(
            "unsafe SQL identifier: {name:?}"
        )))
    }
}

/// Build the search statement and its bind values.
///
/// Pure function of the inputs; the offset comes from the query's page token.
pub(crate) fn search_statement(
    dialect: Dialect,
    table: &str,
    query: &SearchQuery,
    offset: u64,
) -> Result<(String, Vec<String>)> {
    let mut sql = format!("SELECT doc FROM {table}");
    let mut binds = Vec::new();

    if !query.filter.is_empty() {
        let mut clauses = Vec::with_capacity(query.filter.len());
        for (field, expected) in &query.filter {
            safe_identifier(field)?;
            let marker = placeholder(dialect, binds.len() + 1);
            clauses.push(format!("{} = {marker}", json_field_expr(dialect, field)));
            binds.push(bind_text(expected));
        }
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    sql.push_str(" ORDER BY id");

    match (query.limit, offset) {
        (Some(limit), 0) => sql.push_str(&format!(" LIMIT {limit}")),
        (Some(limit), skip) => sql.push_str(&format!(" LIMIT {limit} OFFSET {skip}")),
        (None, 0) => {}
        // No limit but a continuation offset: every dialect spells
        // "all remaining rows" differently.
        (None, skip) => match dialect {
            Dialect::Sqlite => sql.push_str(&format!(" LIMIT -1 OFFSET {skip}")),
            Dialect::Mysql => {
                sql.push_str(&format!(" LIMIT 18446744073709551615 OFFSET {skip}"))
            }
            Dialect::Postgres => sql.push_str(&format!(" OFFSET {skip}")),
        },
    }

    Ok((sql, binds))
}

#[async_trait]
impl DatastoreProvider for RelationalProvider {
    async fn upsert(&self, model: &str, record: Value) -> Result<Option<Value>> {
        let id = record_id(&record)?;
        let table = self.table(model)?;
        self.ensure_table(&table).await?;

        let doc = serde_json::to_string(&record)?;

        // Whole-record replace; no cross-statement atomicity is promised at
        // this layer.
        let delete = format!(
            "DELETE FROM {table} WHERE id = {}",
            placeholder(self.dialect, 1)
        );
        sqlx::query(&delete)
            .bind(&id)
            .execute(&self.pool)
            .await
            .map_err(|e| PolystoreError::Database(format!("delete from {table} failed: {e}")))?;

        let insert = format!(
            "INSERT INTO {table} (id, doc) VALUES ({}, {})",
            placeholder(self.dialect, 1),
            placeholder(self.dialect, 2)
        );
        sqlx::query(&insert)
            .bind(&id)
            .bind(&doc)
            .execute(&self.pool)
            .await
            .map_err(|e| PolystoreError::Database(format!("insert into {table} failed: {e}")))?;

        Ok(Some(record))
    }

    async fn find_by_id(&self, model: &str, id: &str) -> Result<Option<Value>> {
        let table = self.table(model)?;
        self.ensure_table(&table).await?;

        let select = format!(
            "SELECT doc FROM {table} WHERE id = {}",
            placeholder(self.dialect, 1)
        );
        let row = sqlx::query(&select)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PolystoreError::Database(format!("select from {table} failed: {e}")))?;

        match row {
            Some(row) => {
                let doc: String = row.try_get("doc").map_err(|e| {
                    PolystoreError::Database(format!("doc column decode failed: {e}"))
                })?;
                Ok(Some(serde_json::from_str(&doc)?))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, model: &str, id: &str) -> Result<()> {
        let table = self.table(model)?;
        self.ensure_table(&table).await?;

        let delete = format!(
            "DELETE FROM {table} WHERE id = {}",
            placeholder(self.dialect, 1)
        );
        sqlx::query(&delete)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PolystoreError::Database(format!("delete from {table} failed: {e}")))?;

        Ok(())
    }

    async fn search(&self, model: &str, query: &SearchQuery) -> Result<ProviderPage> {
        let table = self.table(model)?;
        self.ensure_table(&table).await?;

        let offset = match &query.page {
            Some(token) => token.as_u64().ok_or_else(|| {
                PolystoreError::Validation(
                    "invalid page token for relational backend".to_string(),
                )
            })?,
            None => 0,
        };

        let (sql, binds) = search_statement(self.dialect, &table, query, offset)?;
        let mut statement = sqlx::query(&sql);
        for bind in &binds {
            statement = statement.bind(bind);
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PolystoreError::Database(format!("select from {table} failed: {e}")))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let doc: String = row
                .try_get("doc")
                .map_err(|e| PolystoreError::Database(format!("doc column decode failed: {e}")))?;
            records.push(serde_json::from_str(&doc)?);
        }

        let page = match query.limit {
            Some(limit) if records.len() as u64 == u64::from(limit) => {
                Some(Value::from(offset + records.len() as u64))
            }
            _ => None,
        };

        Ok(ProviderPage { records, page })
    }
}
