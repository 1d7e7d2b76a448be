//! Query builder utilities
//!
//! Fluent, typed query descriptors and the clause builders they are made of.

pub mod arg;
pub mod builder;
pub mod condition;
pub mod filter;
pub mod grouping;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;
pub mod update;


pub use arg::Arg;
pub use builder::Query;
pub use condition::{Condition, ConditionBuilder, PLACEHOLDER};
pub use filter::{LogicalOperator, QueryOperator};
pub use grouping::GroupBy;
pub use ordering::{OrderBy, SortOrder};
pub use pagination::Pagination;
pub use sql_generation::SelectStatement;
pub use update::UpdateMap;
