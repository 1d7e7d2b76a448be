/// GROUP BY column list, rendered comma-joined
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupBy {
    pub fields: Vec<String>,
}

impl GroupBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(columns.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The clause body without the `GROUP BY` keyword, `None` when empty
    pub fn to_sql(&self) -> Option<String> {
        if self.fields.is_empty() {
            None
        } else {
            Some(self.fields.join(", "))
        }
    }
}
