//! Cursor movement over a column-major grid.
//!
//! Up and Down step through the listing in reading order, which in a
//! column-major grid already flows from the bottom of one column to the top
//! of the next and on to the next page. Left and Right jump a whole column
//! and stop at the page edge instead of crossing it.

use crate::nav::grid::GridLayout;

/// A movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

/// Returns the cursor index after `movement`, for a listing of `total` items.
///
/// The result is always in `0..total`, or `0` for an empty listing.
///
/// PageUp and PageDown always land on the first index of a page. The target
/// page is clamped to the first and last page, so paging past either end
/// returns to the start of the current page.
pub fn navigate(index: usize, movement: Movement, total: usize, layout: &GridLayout) -> usize {
    if total == 0 {
        return 0;
    }
    let last = total - 1;
    let index = index.min(last);
    let rows = layout.rows_per_page;
    let per_page = layout.items_per_page;

    match movement {
        Movement::Up => index.saturating_sub(1),
        Movement::Down => (index + 1).min(last),
        Movement::Left | Movement::Right if layout.effective_columns <= 1 => index,
        Movement::Left => {
            let column = layout.cell_of(index).column;
            if column == 0 {
                index
            } else {
                index - rows
            }
        }
        Movement::Right => {
            let column = layout.cell_of(index).column;
            let target = index + rows;
            if column + 1 >= layout.effective_columns || target > last {
                index
            } else {
                target
            }
        }
        Movement::PageUp => {
            let page = index / per_page;
            page.saturating_sub(1) * per_page
        }
        Movement::PageDown => {
            let page = index / per_page;
            (page + 1).min(last / per_page) * per_page
        }
    }
}

/// Page to display for `index`, clamped into `0..total_pages`.
pub fn page_for(index: usize, layout: &GridLayout) -> usize {
    layout.page_of(index)
}
