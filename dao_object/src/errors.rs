use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Database error during {operation} on {table}: {source}")]
    DatabaseOperation {
        table: String,
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Refusing {operation} on {table} without a WHERE condition")]
    MissingWhereClause { table: String, operation: String },

    #[error("Condition has {placeholders} placeholders but {args} arguments")]
    PlaceholderMismatch { placeholders: usize, args: usize },

    #[error("Store error: {0}")]
    Store(String),
}

impl DaoError {
    pub fn database_operation(table: &str, operation: &str, source: sqlx::Error) -> Self {
        Self::DatabaseOperation {
            table: table.to_string(),
            operation: operation.to_string(),
            source,
        }
    }

    pub fn missing_where_clause(table: &str, operation: &str) -> Self {
        Self::MissingWhereClause {
            table: table.to_string(),
            operation: operation.to_string(),
        }
    }
}
