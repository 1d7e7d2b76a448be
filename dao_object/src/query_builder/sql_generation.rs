//! Finalized read statement handed to a [`DataStore`](crate::traits::DataStore)

use crate::query_builder::condition::Condition;
use crate::query_builder::pagination::Pagination;

/// Everything a store needs to run a read: the merged WHERE condition, the
/// projection, and the optional ORDER BY / GROUP BY / HAVING / LIMIT parts.
///
/// Absent clauses are `None` (or empty), never an empty keyword.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    pub condition: Condition,
    pub columns: Vec<String>,
    pub distinct: bool,
    pub order: Option<String>,
    pub group: Option<String>,
    pub having: Option<Condition>,
    pub pagination: Option<Pagination>,
}

impl SelectStatement {
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        let pagination = self.pagination.unwrap_or_default().with_limit(limit);
        self.pagination = Some(pagination);
        self
    }

    /// The same filter without ordering or paging, for counting rows
    pub fn for_count(&self) -> Self {
        Self {
            order: None,
            pagination: None,
            ..self.clone()
        }
    }

    /// Projection text: `*` when no column was chosen
    pub fn projection(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        }
    }
}
