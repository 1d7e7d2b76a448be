//! Record shapes
//!
//! Any serde-serializable struct can be stored once it names its table:
//!
//! ```
//! use dao_object::TableMetadata;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Customer {
//!     pub id: Option<i64>,
//!     pub first_name: String,
//!     pub active: bool,
//! }
//!
//! impl TableMetadata for Customer {
//!     fn table_name() -> &'static str {
//!         "customers"
//!     }
//! }
//! ```
//!
//! Serialized field names are the column names. Reads map rows back through
//! `Deserialize`, so projections only need `Deserialize`.

use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait TableMetadata: Serialize + DeserializeOwned + Send + Sync {
    /// The table name in the database
    fn table_name() -> &'static str;

    /// Primary-key column, when it differs from the configured default
    fn primary_key_field() -> Option<&'static str> {
        None
    }
}
