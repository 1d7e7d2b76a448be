//! Bound condition arguments
//!
//! An [`Arg`] keeps the type the caller had in hand, so a store binds a `Uuid` as
//! `uuid` and a `String` as text no matter what the text looks like.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Plain JSON: strings are text, arrays and objects are JSON documents
    Value(Value),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    /// Set membership list, one placeholder for the whole list
    List(Vec<Arg>),
}

impl Arg {
    /// JSON view of the argument, used for logging and comparisons
    pub fn to_json(&self) -> Value {
        match self {
            Arg::Value(value) => value.clone(),
            Arg::Uuid(uuid) => Value::String(uuid.to_string()),
            Arg::Timestamp(ts) => Value::String(ts.to_rfc3339()),
            Arg::List(items) => Value::Array(items.iter().map(Arg::to_json).collect()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Arg::List(_))
    }
}

impl PartialEq<Value> for Arg {
    fn eq(&self, other: &Value) -> bool {
        self.to_json() == *other
    }
}

macro_rules! value_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Value(Value::from(value))
                }
            }
        )*
    };
}

value_arg!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, String, &str, Value);

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Value(Value::String(value.clone()))
    }
}

impl From<Uuid> for Arg {
    fn from(value: Uuid) -> Self {
        Arg::Uuid(value)
    }
}

impl From<DateTime<Utc>> for Arg {
    fn from(value: DateTime<Utc>) -> Self {
        Arg::Timestamp(value)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Value(Value::Null), Into::into)
    }
}
