//! Offset-based pagination types.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::error::{DomainError, DomainResult};

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    /// Create a page request; `size` must be positive.
    pub fn new(page: u64, size: u64) -> DomainResult<Self> {
        let request = Self { page, size };
        request.check()?;
        Ok(request)
    }

    /// Reject zero-sized pages (deserialized requests bypass `new`)
    pub fn check(&self) -> DomainResult<()> {
        if self.size == 0 {
            return Err(DomainError::validation("page size must be greater than zero"));
        }
        Ok(())
    }

    /// Number of records preceding this page
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = if request.size > 0 {
            total.div_ceil(request.size)
        } else {
            0
        };

        Self {
            items,
            page: request.page,
            size: request.size,
            total,
            total_pages,
        }
    }

    /// Whether a later page exists
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }
}
