//! Client-side pagination over a loaded dataset.
//!
//! Pages are 1-based. Navigation stops at the bounds instead of wrapping, and
//! an empty dataset has zero pages.

use crate::error::{Result, ViewerError};
use crate::models::RankedEntry;

pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    items_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(items_per_page: usize) -> Result<Self> {
        let mut pagination = Self::default();
        pagination.set_items_per_page(items_per_page)?;
        Ok(pagination)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Changing the page size always goes back to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<()> {
        if items_per_page == 0 {
            return Err(ViewerError::ConfigError(
                "items per page must be a positive integer".to_string(),
            ));
        }
        self.items_per_page = items_per_page;
        self.current_page = 1;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.items_per_page)
    }

    /// Returns true if the page changed.
    pub fn prev(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the page changed.
    pub fn next(&mut self, len: usize) -> bool {
        if self.current_page < self.total_pages(len) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn page<'a>(&self, entries: &'a [RankedEntry]) -> Page<'a> {
        paginate(entries, self.current_page, self.items_per_page)
    }

    /// Control state, or `None` when everything fits on one page.
    pub fn controls(&self, len: usize) -> Option<PageControls> {
        let total_pages = self.total_pages(len);
        if total_pages <= 1 {
            return None;
        }
        Some(PageControls {
            current_page: self.current_page,
            total_pages,
            prev_enabled: self.current_page != 1,
            next_enabled: self.current_page != total_pages,
        })
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// One page of entries along with the rank shown for its first item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a> {
    pub items: &'a [RankedEntry],
    pub first_display_rank: usize,
}

impl<'a> Page<'a> {
    /// Items paired with their display rank.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a RankedEntry)> + 'a {
        let first = self.first_display_rank;
        self.items.iter().enumerate().map(move |(i, e)| (first + i, e))
    }
}

/// `entries[(page-1)*size .. page*size]`, clipped; out of range yields an empty page.
pub fn paginate(entries: &[RankedEntry], page: usize, page_size: usize) -> Page<'_> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(entries.len());
    let items = if start < entries.len() {
        &entries[start..end]
    } else {
        &[]
    };
    Page {
        items,
        first_display_rank: start + 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub current_page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}
