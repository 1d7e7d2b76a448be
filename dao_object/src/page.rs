use crate::query_builder::Pagination;
use serde::{Deserialize, Serialize};

/// One page of a paginated read.
///
/// `current` and `size` are taken as given; invalid values are corrected when the
/// page is executed, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub current: i64,
    pub size: i64,
    pub total: i64,
    pub records: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(current: i64, size: i64) -> Self {
        Self {
            current,
            size,
            total: 0,
            records: Vec::new(),
        }
    }

    /// LIMIT/OFFSET for this page, falling back to `default_size` rows per page
    pub fn pagination(&self, default_size: i64) -> Pagination {
        Pagination::for_page_with_default(self.current, self.size, default_size)
    }

    /// Number of pages needed for `total` rows at the normalized page size
    pub fn pages(&self, default_size: i64) -> i64 {
        let size = self.pagination(default_size).limit.unwrap_or(1).max(1);
        if self.total <= 0 {
            0
        } else {
            self.total / size + i64::from(self.total % size != 0)
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(1, config::DEFAULT_PAGE_SIZE)
    }
}
