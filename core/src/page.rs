use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Effective page request: 1-based page number and a positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: u64,
    page_size: u64,
}

impl PageParams {
    /// Non-positive page numbers become 1, non-positive page sizes become
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: if page <= 0 { 1 } else { page as u64 },
            page_size: if page_size <= 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size as u64
            },
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size)
    }

    pub fn has_more(&self, total: u64) -> bool {
        self.page < self.total_pages(total)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingMetaData {
    pub has_previous: bool,
    pub has_next: bool,
    pub total_pages: u64,
    pub total_records: u64,
    pub page_index: u64,
}

impl PagingMetaData {
    pub fn new(total: u64, params: &PageParams) -> Self {
        Self {
            has_previous: params.page > 1,
            has_next: params.has_more(total),
            total_pages: params.total_pages(total),
            total_records: total,
            page_index: params.page,
        }
    }
}

/// One page of records together with its navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    meta: PagingMetaData,
    data: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, total: u64, params: &PageParams) -> Self {
        Self {
            meta: PagingMetaData::new(total, params),
            data,
        }
    }

    pub fn meta(&self) -> &PagingMetaData {
        &self.meta
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_parts(self) -> (Vec<T>, PagingMetaData) {
        (self.data, self.meta)
    }
}
