use alloc::string::String;

use crate::{TableModel, WidthBroadcast};

/// An in-progress column drag, alive between pointer-down and pointer-up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDragState {
    pub column_id: String,
    pub anchor_pointer_x: i32,
    pub anchor_width: u32,
}

/// Interactive column resizing: `Idle` until a resizer is grabbed, `Dragging` until it is
/// released.
///
/// The controller never touches the viewport or the pool, so drags and resizes can
/// interleave freely.
#[derive(Clone, Debug, Default)]
pub struct ColumnWidthController {
    drag: Option<ColumnDragState>,
    last: Option<WidthBroadcast>,
}

impl ColumnWidthController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_state(&self) -> Option<&ColumnDragState> {
        self.drag.as_ref()
    }

    /// Grabs the resizer of `column_id` at `pointer_x`.
    ///
    /// Returns `false` (and stays idle) for unknown or non-resizable columns. Grabbing while
    /// already dragging restarts the drag on the new column.
    pub fn pointer_down(
        &mut self,
        model: &TableModel,
        column_id: &str,
        pointer_x: i32,
        default_width: u32,
        default_min: u32,
    ) -> bool {
        let Some(column) = model.column(column_id) else {
            vwarn!(column_id, "pointer_down on unknown column");
            return false;
        };
        if !column.resizable {
            return false;
        }
        let anchor_width = column.effective_width(default_width, default_min);
        vdebug!(column_id, pointer_x, anchor_width, "column drag started");
        self.drag = Some(ColumnDragState {
            column_id: column.id.clone(),
            anchor_pointer_x: pointer_x,
            anchor_width,
        });
        self.last = None;
        true
    }

    /// Follows the pointer and stores the resulting width on the model column.
    ///
    /// The width is `anchor_width + (pointer_x - anchor_pointer_x)` clamped to the column's
    /// bounds. Returns the broadcast to apply, or `None` when no drag is active.
    pub fn pointer_move(
        &mut self,
        model: &mut TableModel,
        pointer_x: i32,
        default_min: u32,
    ) -> Option<WidthBroadcast> {
        let drag = self.drag.as_ref()?;
        let column = model.column(&drag.column_id)?;

        let delta = i64::from(pointer_x) - i64::from(drag.anchor_pointer_x);
        let raw = (i64::from(drag.anchor_width) + delta).clamp(0, i64::from(u32::MAX));
        let width = column.clamp_width(u32::try_from(raw).unwrap_or(u32::MAX), default_min);

        model.set_column_width(&drag.column_id, width);
        vtrace!(column_id = drag.column_id.as_str(), width, "column width broadcast");

        let broadcast = WidthBroadcast {
            column_id: drag.column_id.clone(),
            width,
        };
        self.last = Some(broadcast.clone());
        Some(broadcast)
    }

    /// Releases the resizer. Returns the last broadcast of the drag, if any.
    pub fn pointer_up(&mut self) -> Option<WidthBroadcast> {
        self.drag.take()?;
        vdebug!(width = ?self.last.as_ref().map(|b| b.width), "column drag ended");
        self.last.take()
    }
}
