//! Page requests for paged queries.

use serde::Serialize;

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{DomainError, DomainResult};

/// A single page of a query result.
///
/// `index` is 1-based: the first page is page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    index: u64,
    size: u64,
}

impl PageRequest {
    /// Validate and build a page request. Sizes above [`MAX_PAGE_SIZE`] are capped.
    pub fn new(index: u64, size: u64) -> DomainResult<Self> {
        if index == 0 {
            return Err(DomainError::invalid_page("page index starts at 1"));
        }
        if size == 0 {
            return Err(DomainError::invalid_page("page size must be at least 1"));
        }

        Ok(Self {
            index,
            size: size.min(MAX_PAGE_SIZE),
        })
    }

    /// 1-based page index
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Rows per page
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of rows skipped before this page
    pub fn offset(&self) -> u64 {
        (self.index - 1) * self.size
    }

    /// 0-based page number, as used by SQL engines that count pages from zero
    pub fn zero_based(&self) -> u64 {
        self.index - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
