//! Convenience re-exports for common QueryDao usage
//!
//! # Example
//!
//! ```rust
//! use querydao::prelude::*;
//! ```

pub use crate::core::QueryDao;
pub use crate::errors::QueryDaoError;

// Re-export centralized config
pub use config::{AppConfig, DaoConfig, DatabaseConfig};

// Re-export commonly used dao-object types for convenience
pub use dao_object::prelude::*;

// Common external dependencies
pub use async_trait;
pub use sqlx;
pub use tokio;
