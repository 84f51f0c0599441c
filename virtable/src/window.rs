//! Window arithmetic.
//!
//! Everything here is pure: no pool, no model, no callbacks. The engine feeds these functions
//! the current [`crate::ViewportState`] numbers and applies the result.

use crate::{SlotRow, VirtualRange};

/// Number of slots needed to cover `viewport_height`.
///
/// One row more than fits completely, so the last partially visible row never shows a gap
/// while it scrolls into place. A zero height (not yet measured) still yields one slot.
pub fn visible_count(viewport_height: u32, row_height: u32) -> usize {
    if row_height == 0 {
        return 1;
    }
    (viewport_height / row_height) as usize + 1
}

/// Index of the first row scrolled (at least partially) past the top edge.
pub fn window_start(scroll_offset: u64, row_height: u32) -> usize {
    if row_height == 0 {
        return 0;
    }
    usize::try_from(scroll_offset / row_height as u64).unwrap_or(usize::MAX)
}

/// Largest window start that still keeps every slot on a data row.
pub fn max_hidden_rows_top(total_rows: usize, visible_rows: usize) -> usize {
    total_rows.saturating_sub(visible_rows)
}

/// Ring-buffer phase of the pool: which pool position currently holds the window start.
pub fn ring_phase(hidden_rows_top: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    hidden_rows_top % visible_rows
}

/// Where the slot at `slot_position` in the pool lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotPlacement {
    /// Window position (row index, possibly past the data).
    pub index: usize,
    /// Vertical offset from the top of the spacer.
    pub offset: u64,
}

/// Maps a pool position onto the window.
///
/// Positions rotate with `rows_offset`, so scrolling by one row moves exactly one slot from
/// one end of the window to the other while every other slot keeps its row.
pub fn slot_placement(
    hidden_rows_top: usize,
    visible_rows: usize,
    rows_offset: usize,
    slot_position: usize,
    row_height: u32,
) -> SlotPlacement {
    let position_index = if visible_rows == 0 {
        0
    } else {
        (visible_rows - rows_offset % visible_rows + slot_position) % visible_rows
    };
    let index = hidden_rows_top.saturating_add(position_index);
    SlotPlacement {
        index,
        offset: row_offset(index, row_height),
    }
}

/// Inverse of [`slot_placement`]: the pool position that must hold window position `index`.
///
/// Returns `None` when `index` is outside the window.
pub fn ring_position(
    index: usize,
    hidden_rows_top: usize,
    visible_rows: usize,
    rows_offset: usize,
) -> Option<usize> {
    if index < hidden_rows_top || index - hidden_rows_top >= visible_rows {
        return None;
    }
    Some((index - hidden_rows_top + rows_offset) % visible_rows)
}

/// Pixel offset of row `index`.
pub fn row_offset(index: usize, row_height: u32) -> u64 {
    (index as u64).saturating_mul(row_height as u64)
}

/// Resolves a window position against the data.
pub fn row_for(index: usize, total_rows: usize) -> SlotRow {
    if index < total_rows {
        SlotRow::Row(index)
    } else {
        SlotRow::Empty
    }
}

/// Rows of the window that have data.
pub fn visible_range(hidden_rows_top: usize, visible_rows: usize, total_rows: usize) -> VirtualRange {
    let start_index = hidden_rows_top.min(total_rows);
    let end_index = hidden_rows_top.saturating_add(visible_rows).min(total_rows);
    VirtualRange {
        start_index,
        end_index,
    }
}

/// Height of the full-list spacer.
pub fn spacer_height(total_rows: usize, row_height: u32) -> u64 {
    row_offset(total_rows, row_height)
}

/// Whether the viewport shows the end of the spacer (within 1px).
pub fn is_scrolled_to_bottom(spacer_height: u64, scroll_offset: u64, viewport_height: u32) -> bool {
    spacer_height
        .saturating_sub(scroll_offset)
        .saturating_sub(viewport_height as u64)
        < 1
}

/// How the pool must change when the number of visible rows changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolPlan {
    Unchanged,
    /// Add `top` rows directly above the window (`hidden_rows_top - 1`, `- 2`, ...) and `end`
    /// rows directly below it (`hidden_rows_top + visible_rows`, `+ 1`, ...).
    Grow { top: usize, end: usize },
    /// Drop the slots covering these window positions.
    Shrink { remove: VirtualRange },
}

impl PoolPlan {
    /// Window start once the plan is applied.
    pub fn next_hidden_rows_top(&self, hidden_rows_top: usize) -> usize {
        match self {
            Self::Grow { top, .. } => hidden_rows_top - top,
            Self::Unchanged | Self::Shrink { .. } => hidden_rows_top,
        }
    }

    /// Window positions to create, nearest to the current window first.
    pub fn for_each_added_index(
        &self,
        hidden_rows_top: usize,
        visible_rows: usize,
        mut f: impl FnMut(usize),
    ) {
        let Self::Grow { top, end } = *self else {
            return;
        };
        for i in 1..=top {
            f(hidden_rows_top - i);
        }
        let first_below = hidden_rows_top.saturating_add(visible_rows);
        for i in 0..end {
            f(first_below.saturating_add(i));
        }
    }
}

/// Decides which rows to add or drop when the pool goes from `visible_rows` to
/// `new_visible_rows` slots.
///
/// - Shrinking drops the bottom-most positions so the top row stays put.
/// - Growing while scrolled to the bottom adds rows above the window, keeping the bottom
///   edge in place.
/// - Otherwise rows are added below the window; once that would run past the data, earlier
///   rows are revealed above it instead.
pub fn plan_resize(
    hidden_rows_top: usize,
    visible_rows: usize,
    new_visible_rows: usize,
    total_rows: usize,
    scrolled_to_bottom: bool,
) -> PoolPlan {
    if new_visible_rows == visible_rows {
        return PoolPlan::Unchanged;
    }

    if new_visible_rows < visible_rows {
        return PoolPlan::Shrink {
            remove: VirtualRange {
                start_index: hidden_rows_top.saturating_add(new_visible_rows),
                end_index: hidden_rows_top.saturating_add(visible_rows),
            },
        };
    }

    let grow = new_visible_rows - visible_rows;
    if scrolled_to_bottom {
        // Rows above index 0 do not exist; whatever does not fit above goes below.
        let top = grow.min(hidden_rows_top);
        return PoolPlan::Grow {
            top,
            end: grow - top,
        };
    }

    let mut top = 0usize;
    let mut end = 0usize;
    for _ in 0..grow {
        let next = hidden_rows_top
            .saturating_add(visible_rows)
            .saturating_add(end);
        let first = hidden_rows_top - top;
        if next >= total_rows && first > 0 {
            top += 1;
        } else {
            end += 1;
        }
    }
    PoolPlan::Grow { top, end }
}
