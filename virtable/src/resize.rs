//! Viewport resize handling: grows or shrinks the pool.

use crate::window::{self, PoolPlan};
use crate::{RowPool, SlotEvent, ViewportState};

/// Resizes the pool to `new_visible_rows` slots.
///
/// Existing slots keep their rows; only added and removed slots are reported. Once the new
/// slot count is committed the pool is reordered so the ring formula keeps mapping every
/// slot to the row it already shows.
pub(crate) fn apply_resize(
    viewport: &mut ViewportState,
    pool: &mut RowPool,
    new_visible_rows: usize,
    total_rows: usize,
    scrolled_to_bottom: bool,
    mut f: impl FnMut(SlotEvent),
) -> PoolPlan {
    let hidden_rows_top = viewport.hidden_rows_top();
    let visible_rows = viewport.visible_rows();
    let row_height = viewport.row_height();

    let plan = window::plan_resize(
        hidden_rows_top,
        visible_rows,
        new_visible_rows,
        total_rows,
        scrolled_to_bottom,
    );
    vdebug!(
        visible_rows,
        new_visible_rows,
        hidden_rows_top,
        scrolled_to_bottom,
        plan = ?plan,
        "apply_resize"
    );

    match plan {
        PoolPlan::Unchanged => return plan,
        PoolPlan::Shrink { remove } => {
            for index in (remove.start_index..remove.end_index).rev() {
                match pool.remove_index(index) {
                    Some(slot) => f(SlotEvent::Removed(slot.id)),
                    None => {
                        vwarn!(index, "apply_resize: no slot covers index");
                    }
                }
            }
        }
        PoolPlan::Grow { .. } => {
            plan.for_each_added_index(hidden_rows_top, visible_rows, |index| {
                let slot = pool.spawn(
                    index,
                    window::row_for(index, total_rows),
                    window::row_offset(index, row_height),
                );
                f(SlotEvent::Created(slot));
            });
        }
    }

    // `visible_rows` must be committed before the ring phase is recomputed.
    viewport.set_window(plan.next_hidden_rows_top(hidden_rows_top), new_visible_rows);

    let hidden_rows_top = viewport.hidden_rows_top();
    let visible_rows = viewport.visible_rows();
    let rows_offset = viewport.rows_offset();
    pool.reorder_by_key(|slot| {
        window::ring_position(slot.index, hidden_rows_top, visible_rows, rows_offset)
            .unwrap_or(usize::MAX)
    });

    plan
}
