use crate::errors::DaoError;
use crate::query_builder::{Condition, SelectStatement};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A single row keyed by column name
pub type Row = Map<String, Value>;

/// Executes finalized queries against a relational backend.
///
/// Conditions arrive as `?`-placeholder text with their positional arguments. A
/// list argument belongs to a single placeholder (set membership). Errors are
/// returned as-is to the caller of the facade.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Insert `rows` in one statement, returning the affected row count
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<u64, DaoError>;

    /// Write `values` into every row matching `condition`
    async fn update(&self, table: &str, values: Row, condition: Condition)
        -> Result<u64, DaoError>;

    /// Delete every row matching `condition`
    async fn delete(&self, table: &str, condition: Condition) -> Result<u64, DaoError>;

    /// Fetch the rows described by `statement`
    async fn select(&self, table: &str, statement: SelectStatement)
        -> Result<Vec<Row>, DaoError>;

    /// Count the rows described by `statement`
    async fn count(&self, table: &str, statement: SelectStatement) -> Result<i64, DaoError>;
}

#[async_trait]
impl<S: DataStore + ?Sized> DataStore for Arc<S> {
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<u64, DaoError> {
        (**self).insert(table, rows).await
    }

    async fn update(
        &self,
        table: &str,
        values: Row,
        condition: Condition,
    ) -> Result<u64, DaoError> {
        (**self).update(table, values, condition).await
    }

    async fn delete(&self, table: &str, condition: Condition) -> Result<u64, DaoError> {
        (**self).delete(table, condition).await
    }

    async fn select(
        &self,
        table: &str,
        statement: SelectStatement,
    ) -> Result<Vec<Row>, DaoError> {
        (**self).select(table, statement).await
    }

    async fn count(&self, table: &str, statement: SelectStatement) -> Result<i64, DaoError> {
        (**self).count(table, statement).await
    }
}
