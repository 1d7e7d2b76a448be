//! ORDER BY clause builder

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Ordered list of sort keys, rendered as `a ASC, b DESC`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBy {
    columns: Vec<(String, SortOrder)>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<I, S>(&mut self, columns: I, order: SortOrder)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns
            .extend(columns.into_iter().map(|column| (column.into(), order)));
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The clause body without the `ORDER BY` keyword, `None` when empty
    pub fn to_sql(&self) -> Option<String> {
        if self.columns.is_empty() {
            return None;
        }

        Some(
            self.columns
                .iter()
                .map(|(column, order)| format!("{} {}", column, order.to_sql()))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
