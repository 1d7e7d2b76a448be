//! # QueryDao
//!
//! A typed data-access layer for PostgreSQL: fluent query conditions with AND/OR
//! bracket groups, generic CRUD for any serde record, and pagination.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use querydao::prelude::*;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub id: Option<i64>,
//!     pub name: String,
//!     pub age: i32,
//! }
//!
//! impl TableMetadata for User {
//!     fn table_name() -> &'static str {
//!         "users"
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "querydao".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let querydao = QueryDao::new(config).await?;
//!     let dao = querydao.dao();
//!
//!     dao.insert(&User { id: None, name: "Ann".to_string(), age: 31 }).await?;
//!
//!     let query = Query::<User>::new()
//!         .ge("age", 18)
//!         .or_bracket(|q| q.like_right("name", "A"))
//!         .order_by_desc(["age"]);
//!
//!     let mut page = Page::new(1, 20);
//!     dao.select_page(&mut page, &query).await?;
//!     println!("{} of {} users", page.records.len(), page.total);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::QueryDao;
pub use errors::QueryDaoError;

// Re-export centralized config
pub use config::{AppConfig, DaoConfig, DatabaseConfig};

// Re-export internal crates used by the public API
pub use dao_object;

// Re-export external dependencies used in public API
pub use sqlx;
pub use async_trait;
