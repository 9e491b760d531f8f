//! Pagination primitives for history queries.

use serde::{Deserialize, Serialize};

/// Requested page window (1-based).
///
/// Both fields are clamped to at least 1; a zero limit would make the page
/// count undefined.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl PageParams {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

/// One page of results plus the totals needed to render pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl<T> Page<T> {
    /// Slice a page out of an already-ordered collection.
    pub fn slice(ordered: impl IntoIterator<Item = T>, total: u64, params: PageParams) -> Self {
        let items: Vec<T> = ordered
            .into_iter()
            .skip(params.offset())
            .take(params.limit as usize)
            .collect();

        Self {
            items,
            page: params.page,
            limit: params.limit,
            total,
            pages: total.div_ceil(params.limit as u64) as u32,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            pages: self.pages,
        }
    }
}
