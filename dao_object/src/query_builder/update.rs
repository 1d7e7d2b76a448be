use crate::traits::data_store::Row;
use serde_json::Value;

/// Explicit column values for query-driven updates.
///
/// Unlike updating from an entity, every value here is written as given,
/// including `null`, `false`, zero and empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateMap {
    values: Row,
}

impl UpdateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing an earlier value for the same column
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn to_row(&self) -> Row {
        self.values.clone()
    }
}
