//! Multi-column page geometry.
//!
//! Items fill a page column by column: with `R` rows per page, local index
//! `k` sits at row `k % R`, column `k / R`. Layouts are cheap to compute and
//! are recomputed for every frame rather than stored.

use std::ops::Range;

/// Header and footer lines that are always drawn.
pub const BASE_CHROME_LINES: u16 = 8;

/// Largest column count a user may request.
pub const MAX_COLUMNS: usize = 4;

/// Optional one-line banners that eat into the grid's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChromeLines {
    pub message: bool,
    pub banner: bool,
    pub clipboard: bool,
    pub page: bool,
}

impl ChromeLines {
    /// Total lines not available to the grid.
    pub fn overhead(self) -> u16 {
        BASE_CHROME_LINES
            + u16::from(self.message)
            + u16::from(self.banner)
            + u16::from(self.clipboard)
            + u16::from(self.page)
    }
}

/// Location of one item on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub page: usize,
    pub row: usize,
    pub column: usize,
}

/// Resolved geometry for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub effective_columns: usize,
    pub rows_per_page: usize,
    pub items_per_page: usize,
    pub total_pages: usize,
}

impl GridLayout {
    /// Computes the layout for `item_count` items.
    ///
    /// `requested_columns` is clamped to `1..=MAX_COLUMNS`. With more than one
    /// column requested, the count shrinks to the largest `c` for which the
    /// items fill at least `c` full columns (`item_count >= rows * c`), so a
    /// short listing is not spread thin. The usable height never drops
    /// below one row.
    pub fn compute(
        requested_columns: usize,
        item_count: usize,
        terminal_rows: u16,
        overhead: u16,
    ) -> Self {
        let requested = requested_columns.clamp(1, MAX_COLUMNS);
        let rows = usize::from(terminal_rows.saturating_sub(overhead)).max(1);

        let effective_columns = if requested == 1 {
            1
        } else {
            (2..=requested)
                .rev()
                .find(|&c| item_count >= rows * c)
                .unwrap_or(1)
        };

        let items_per_page = rows * effective_columns;
        let total_pages = item_count.div_ceil(items_per_page).max(1);

        Self {
            effective_columns,
            rows_per_page: rows,
            items_per_page,
            total_pages,
        }
    }

    /// Computes the layout together with the chrome it needs.
    ///
    /// The page banner only appears when there is more than one page, and
    /// showing it costs a row, so the layout is computed twice when needed.
    pub fn with_chrome(
        requested_columns: usize,
        item_count: usize,
        terminal_rows: u16,
        chrome: ChromeLines,
    ) -> (Self, ChromeLines) {
        let chrome = ChromeLines {
            page: false,
            ..chrome
        };
        let layout = Self::compute(requested_columns, item_count, terminal_rows, chrome.overhead());
        if layout.total_pages <= 1 {
            return (layout, chrome);
        }

        let chrome = ChromeLines {
            page: true,
            ..chrome
        };
        let layout = Self::compute(requested_columns, item_count, terminal_rows, chrome.overhead());
        (layout, chrome)
    }

    /// Page containing `index`, clamped to the last page.
    pub fn page_of(&self, index: usize) -> usize {
        (index / self.items_per_page).min(self.total_pages - 1)
    }

    pub fn cell_of(&self, index: usize) -> GridCell {
        let local = index % self.items_per_page;
        GridCell {
            page: index / self.items_per_page,
            row: local % self.rows_per_page,
            column: local / self.rows_per_page,
        }
    }

    /// Global index of a cell, or `None` if it lies past `total`.
    pub fn index_at(&self, page: usize, row: usize, column: usize, total: usize) -> Option<usize> {
        if row >= self.rows_per_page || column >= self.effective_columns {
            return None;
        }
        let index = page * self.items_per_page + column * self.rows_per_page + row;
        (index < total).then_some(index)
    }

    /// Indices shown on `page` out of `total` items.
    pub fn page_range(&self, page: usize, total: usize) -> Range<usize> {
        let start = (page * self.items_per_page).min(total);
        let end = (start + self.items_per_page).min(total);
        start..end
    }

    /// `"{cols} cols · page {p}/{n}"`, 1-based.
    pub fn summary(&self, page: usize) -> String {
        format!(
            "{} cols · page {}/{}",
            self.effective_columns,
            page + 1,
            self.total_pages
        )
    }
}
