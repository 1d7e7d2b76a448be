//! Primary-key values
//!
//! By-id operations accept any of the usual key types and bind them with their
//! own type.

use crate::query_builder::Arg;
use serde_json::Value;
use std::fmt::Debug;
use uuid::Uuid;

/// A value that can identify a single row through its primary-key column
pub trait PrimaryKey: Clone + Send + Sync + Debug {
    fn to_arg(&self) -> Arg;
}

macro_rules! numeric_primary_key {
    ($($ty:ty),*) => {
        $(
            impl PrimaryKey for $ty {
                fn to_arg(&self) -> Arg {
                    Arg::Value(Value::from(*self))
                }
            }
        )*
    };
}

numeric_primary_key!(i16, i32, i64, u16, u32, u64);

impl PrimaryKey for String {
    fn to_arg(&self) -> Arg {
        Arg::from(self)
    }
}

impl PrimaryKey for &str {
    fn to_arg(&self) -> Arg {
        Arg::from(*self)
    }
}

impl PrimaryKey for Uuid {
    fn to_arg(&self) -> Arg {
        Arg::Uuid(*self)
    }
}
