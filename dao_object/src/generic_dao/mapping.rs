//! Conversions between records and rows

use crate::errors::DaoError;
use crate::traits::Row;
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::Value;

/// Serialize a record into a row keyed by field name
pub(crate) fn encode_entity<T: Serialize>(entity: &T) -> Result<Row, DaoError> {
    match serde_json::to_value(entity)? {
        Value::Object(row) => Ok(row),
        other => Err(DaoError::Serialization(serde_json::Error::custom(format!(
            "records must serialize to an object, got {}",
            other
        )))),
    }
}

pub(crate) fn decode_row<R: DeserializeOwned>(row: Row) -> Result<R, DaoError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

pub(crate) fn decode_rows<R: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<R>, DaoError> {
    rows.into_iter().map(decode_row).collect()
}

/// `null`, `false`, numeric zero and the empty string
pub(crate) fn is_default_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Keep only the columns an entity-driven update writes
pub(crate) fn non_default_columns(row: Row, primary_key: &str) -> Row {
    row.into_iter()
        .filter(|(column, value)| column != primary_key && !is_default_value(value))
        .collect()
}
