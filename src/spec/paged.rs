use serde::{Deserialize, Serialize};

/// One page of results plus the unpaged total — the shape search
/// queries return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    /// The items in the current page.
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total_count: usize,
    /// Current page number (1-based).
    pub page: usize,
    /// The page size the window was built from.
    pub page_size: usize,
}

impl<T> Paged<T> {
    /// Assemble a page envelope.
    pub fn new(items: Vec<T>, total_count: usize, page: usize, page_size: usize) -> Self {
        Self {
            items,
            total_count,
            page,
            page_size,
        }
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            (self.total_count + self.page_size - 1) / self.page_size
        }
    }

    /// Whether a page follows this one.
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Whether a page precedes this one.
    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}
