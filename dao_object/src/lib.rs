//! DAO Object - generic data access over any store
//!
//! This crate provides the query descriptor and its condition builder, the
//! pagination calculator, the [`Dao`] facade and a PostgreSQL [`DataStore`].

pub mod errors;
pub mod generic_dao;
pub mod id_type;
pub mod page;
pub mod pg_store;
pub mod prelude;
pub mod query_builder;
pub mod traits;
pub mod validation;

pub use errors::DaoError;
pub use generic_dao::Dao;
pub use id_type::PrimaryKey;
pub use page::Page;
pub use pg_store::PgStore;
pub use query_builder::{
    Arg, Condition, ConditionBuilder, LogicalOperator, Pagination, Query, QueryOperator,
    SelectStatement, SortOrder, UpdateMap,
};
pub use traits::*;
pub use validation::{ValidatedColumnName, ValidatedTableName, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
