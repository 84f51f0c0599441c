//! Scroll handling: moves the window and recycles slots through the ring.

use crate::window;
use crate::{RowPool, SlotEvent, ViewportState};

/// Window start for `scroll_offset`, optionally kept inside the data.
pub(crate) fn target_hidden_rows_top(
    scroll_offset: u64,
    viewport: &ViewportState,
    total_rows: usize,
    clamp_to_rows: bool,
) -> usize {
    let start = window::window_start(scroll_offset, viewport.row_height());
    if clamp_to_rows {
        start.min(window::max_hidden_rows_top(total_rows, viewport.visible_rows()))
    } else {
        start
    }
}

/// Points every slot at the window position its pool position maps to.
///
/// Only slots whose position actually changed are reported, so re-running with the same
/// window emits nothing.
pub(crate) fn reflow(
    viewport: &ViewportState,
    pool: &mut RowPool,
    total_rows: usize,
    mut f: impl FnMut(SlotEvent),
) -> usize {
    let hidden_rows_top = viewport.hidden_rows_top();
    let visible_rows = viewport.visible_rows();
    let rows_offset = viewport.rows_offset();
    let row_height = viewport.row_height();

    let mut changed = 0usize;
    for (i, slot) in pool.slots_mut().iter_mut().enumerate() {
        let placement =
            window::slot_placement(hidden_rows_top, visible_rows, rows_offset, i, row_height);
        let row = window::row_for(placement.index, total_rows);
        if slot.reassign(placement.index, row, placement.offset) {
            changed += 1;
            f(SlotEvent::Reassigned(*slot));
        }
    }
    changed
}

/// Applies a scroll offset reported by the host.
pub(crate) fn apply_scroll(
    viewport: &mut ViewportState,
    pool: &mut RowPool,
    scroll_offset: u64,
    total_rows: usize,
    clamp_to_rows: bool,
    f: impl FnMut(SlotEvent),
) {
    let hidden_rows_top = target_hidden_rows_top(scroll_offset, viewport, total_rows, clamp_to_rows);
    viewport.set_hidden_rows_top(hidden_rows_top);
    let _changed = reflow(viewport, pool, total_rows, f);
    vtrace!(
        scroll_offset,
        hidden_rows_top,
        rows_offset = viewport.rows_offset(),
        changed = _changed,
        "apply_scroll"
    );
}
