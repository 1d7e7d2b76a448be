//! PostgreSQL [`DataStore`] backed by a sqlx pool

pub mod sql;

use crate::errors::DaoError;
use crate::query_builder::{Arg, Condition, SelectStatement};
use crate::traits::{DataStore, Row};
use crate::validation::ValidatedTableName;
use crate::DbPool;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::Query as SqlxQuery;
use sqlx::types::Json;
use sqlx::{Postgres, Row as _};

pub use sql::PgStatement;

// Binds one argument with the Postgres type its Rust value carries. Strings are
// always text; nested lists and JSON documents go as jsonb.
macro_rules! bind_arg {
    ($query:expr, $arg:expr) => {
        match $arg {
            Arg::Uuid(uuid) => $query.bind(uuid),
            Arg::Timestamp(ts) => $query.bind(ts),
            Arg::List(items) => $query.bind(Json(Value::Array(
                items.iter().map(Arg::to_json).collect(),
            ))),
            Arg::Value(Value::String(s)) => $query.bind(s),
            Arg::Value(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            Arg::Value(Value::Bool(b)) => $query.bind(b),
            Arg::Value(Value::Null) => $query.bind(Option::<String>::None),
            Arg::Value(document) => $query.bind(Json(document)),
        }
    };
}

fn bind_params(sql: &str, params: Vec<Arg>) -> SqlxQuery<'_, Postgres, PgArguments> {
    let mut query = sqlx::query(sql);
    for param in params {
        query = bind_arg!(query, param);
    }
    query
}

#[cfg(feature = "debug-logging")]
fn trace_params(operation: &str, params: &[Arg]) {
    let values: Vec<Value> = params.iter().map(Arg::to_json).collect();
    tracing::trace!("[{}] params: {}", operation, Value::Array(values));
}

#[cfg(not(feature = "debug-logging"))]
fn trace_params(_operation: &str, _params: &[Arg]) {}

/// Runs finalized statements against PostgreSQL.
///
/// Rows come back as JSON objects (`row_to_json`), so any record type that
/// deserializes from its column names can be read without a `FromRow` impl.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl std::fmt::Debug for PgStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStore")
            .field("pool_size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn execute(
        &self,
        table: &str,
        operation: &str,
        statement: PgStatement,
    ) -> Result<u64, DaoError> {
        tracing::debug!("[{}] {}", operation, statement.sql);
        trace_params(operation, &statement.params);

        let result = bind_params(&statement.sql, statement.params)
            .execute(&self.pool)
            .await
            .map_err(|e| DaoError::database_operation(table, operation, e))?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl DataStore for PgStore {
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<u64, DaoError> {
        let table_name = ValidatedTableName::new(table)?;
        let statement = sql::insert(&table_name, &rows)?;
        self.execute(table, "insert", statement).await
    }

    async fn update(
        &self,
        table: &str,
        values: Row,
        condition: Condition,
    ) -> Result<u64, DaoError> {
        let table_name = ValidatedTableName::new(table)?;
        let statement = sql::update(&table_name, &values, &condition)?;
        self.execute(table, "update", statement).await
    }

    async fn delete(&self, table: &str, condition: Condition) -> Result<u64, DaoError> {
        let table_name = ValidatedTableName::new(table)?;
        let statement = sql::delete(&table_name, &condition)?;
        self.execute(table, "delete", statement).await
    }

    async fn select(
        &self,
        table: &str,
        statement: SelectStatement,
    ) -> Result<Vec<Row>, DaoError> {
        let table_name = ValidatedTableName::new(table)?;
        let PgStatement { sql, params } = sql::select(&table_name, &statement)?;
        tracing::debug!("[select] {}", sql);
        trace_params("select", &params);

        let rows = bind_params(&sql, params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DaoError::database_operation(table, "select", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<Json<Row>, _>("record")
                    .map(|Json(record)| record)
                    .map_err(|e| DaoError::database_operation(table, "select", e))
            })
            .collect()
    }

    async fn count(&self, table: &str, statement: SelectStatement) -> Result<i64, DaoError> {
        let table_name = ValidatedTableName::new(table)?;
        let PgStatement { sql, params } = sql::count(&table_name, &statement)?;
        tracing::debug!("[count] {}", sql);
        trace_params("count", &params);

        let row = bind_params(&sql, params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DaoError::database_operation(table, "count", e))?;

        row.try_get::<i64, _>("total")
            .map_err(|e| DaoError::database_operation(table, "count", e))
    }
}
