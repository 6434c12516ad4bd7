//! Fixed-size pagination over an in-memory list.
//!
//! Pages are zero-based. Navigation stops at the ends instead of wrapping, and
//! the current page is clamped whenever the list it pages over shrinks.

/// Notifications shown per page on the overview.
pub const NOTIFICATIONS_PER_PAGE: usize = 5;

/// Current page of a list split into pages of `page_size` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Paginator {
    /// Start on the first page. A zero `page_size` is treated as one.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 { 1 } else { page_size },
            page: 0,
        }
    }

    /// Start on `page`, clamped to the pages available for `total` items.
    #[must_use]
    pub const fn at(page_size: usize, page: usize, total: usize) -> Self {
        let mut paginator = Self::new(page_size);
        paginator.page = page;
        paginator.clamp(total);
        paginator
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` items (`ceil(total / page_size)`).
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub const fn has_next(&self, total: usize) -> bool {
        self.page + 1 < self.page_count(total)
    }

    /// Advance one page unless already on the last.
    pub const fn next(&mut self, total: usize) {
        if self.has_next(total) {
            self.page += 1;
        }
    }

    /// Go back one page unless already on the first.
    pub const fn prev(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    /// Move back onto the last page if `total` no longer reaches the current
    /// one.
    pub const fn clamp(&mut self, total: usize) {
        let last = self.page_count(total).saturating_sub(1);
        if self.page > last {
            self.page = last;
        }
    }

    /// Items on the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.page.saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        items.get(start..end).unwrap_or_default()
    }
}
