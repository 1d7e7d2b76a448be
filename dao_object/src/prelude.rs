//! Convenience re-exports for common DAO usage

// Core traits
pub use crate::traits::{DataStore, Row, TableMetadata};

// Error types
pub use crate::errors::DaoError;

// Facade and stores
pub use crate::generic_dao::Dao;
pub use crate::pg_store::PgStore;

pub use crate::id_type::PrimaryKey;
pub use crate::page::Page;

// Query building
pub use crate::query_builder::{Arg, Condition, Pagination, Query, SelectStatement, SortOrder};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::PgPool;
pub use uuid::Uuid;
