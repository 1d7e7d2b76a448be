//! Traits for database operations
//!
//! [`TableMetadata`] describes a record shape, [`DataStore`] is the seam to the
//! relational backend that executes finalized queries.

pub mod data_store;
pub mod table_metadata;

pub use data_store::{DataStore, Row};
pub use table_metadata::TableMetadata;
