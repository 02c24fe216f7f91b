//! Offset pagination.

use serde::{Deserialize, Serialize};

/// A 1-based page of results with a fixed page size.
///
/// The backend paginates by offset, so a page becomes `skip`/`limit`
/// query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number. Zero is treated as the first page.
    pub page: u32,
    /// Maximum number of items per page.
    pub limit: u32,
}

impl Page {
    /// Default page size for meal and recipe listings.
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Default page size for ingredient listings.
    pub const INGREDIENT_LIMIT: u32 = 100;

    /// Creates a page.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Returns the first page with the given size.
    #[must_use]
    pub const fn first(limit: u32) -> Self {
        Self::new(1, limit)
    }

    /// Returns the offset of the first item: `(page - 1) * limit`.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page.saturating_sub(1) as u64) * (self.limit as u64)
    }

    /// Returns the following page.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_skip_is_derived_from_page_and_limit() {
        assert_eq!(Page::new(1, 20).skip(), 0);
        assert_eq!(Page::new(3, 20).skip(), 40);
        assert_eq!(Page::new(2, 100).skip(), 100);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        assert_eq!(Page::new(0, 20).skip(), 0);
    }

    #[test]
    fn test_next_page() {
        assert_eq!(Page::default().next(), Page::new(2, 20));
    }
}
