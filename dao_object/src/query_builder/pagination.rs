//! Pagination calculator
//!
//! Turns a 1-based page number and a page size into LIMIT/OFFSET. Out-of-range
//! input is corrected here, at the point of use: a page number below 1 becomes 1
//! and a non-positive size becomes the default size.

use config::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// LIMIT/OFFSET for `page` of `size` rows, falling back to a size of 10
    pub fn for_page(page: i64, size: i64) -> Self {
        Self::for_page_with_default(page, size, DEFAULT_PAGE_SIZE)
    }

    /// Like [`Pagination::for_page`] with a caller-chosen fallback size
    pub fn for_page_with_default(page: i64, size: i64, default_size: i64) -> Self {
        let page = if page <= 0 { 1 } else { page };
        let size = match (size, default_size) {
            (size, _) if size > 0 => size,
            (_, default_size) if default_size > 0 => default_size,
            _ => DEFAULT_PAGE_SIZE,
        };
        let offset = (page - 1).saturating_mul(size);

        Self::new().with_limit(size).with_offset(offset)
    }

    pub fn to_sql(&self) -> String {
        let mut clauses = Vec::new();

        if let Some(limit) = self.limit {
            clauses.push(format!("LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            clauses.push(format!("OFFSET {}", offset));
        }

        clauses.join(" ")
    }
}
