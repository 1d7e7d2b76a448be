//! Error types for the QueryDao crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryDaoError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
