use serde::{Deserialize, Serialize};

/// Default page size for `find_all` listings.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Limit/offset pagination window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Window covering every record.
    pub fn all() -> Self {
        Self::new(usize::MAX, 0)
    }

    /// Build a page from optional caller input, falling back to `default_limit`.
    pub fn from_options(limit: Option<usize>, offset: Option<usize>, default_limit: usize) -> Self {
        Self {
            limit: limit.unwrap_or(default_limit),
            offset: offset.unwrap_or(0),
        }
    }

    /// Apply the window to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT, 0)
    }
}
