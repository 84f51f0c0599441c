use alloc::vec::Vec;

use crate::column::{ColumnDragState, ColumnWidthController};
use crate::state::{FrameState, ViewportState};
use crate::window;
use crate::{
    Column, ConfigError, DebugTint, Row, RowPool, Slot, SlotEvent, TableModel, TableOptions,
    Value, VirtualRange, WidthBroadcast,
};

/// A headless windowed table.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects. Slots are plain values identified by [`crate::SlotId`].
/// - Your adapter drives it with viewport heights, scroll offsets and pointer positions.
/// - Every pool mutation is reported through a `FnMut(SlotEvent)` the adapter mirrors onto
///   its own row elements.
///
/// All handlers take `&mut self` and finish synchronously, so signals are applied strictly in
/// call order. For a host-facing wrapper, see the `virtable-adapter` crate.
#[derive(Clone, Debug)]
pub struct VirtualTable {
    options: TableOptions,
    model: TableModel,
    viewport: ViewportState,
    pool: RowPool,
    columns: ColumnWidthController,

    viewport_height: u32,
    scroll_offset: u64,
    mounted: bool,
}

impl VirtualTable {
    /// Creates a table, validating the configuration up front.
    ///
    /// Fails when `row_height` is zero, column ids repeat, a column's width bounds are
    /// inverted, or a column is resizable while `on_change_column_width` is unset.
    pub fn new(
        options: TableOptions,
        columns: Vec<Column>,
        rows: Vec<Row>,
    ) -> Result<Self, ConfigError> {
        if options.row_height == 0 {
            return Err(ConfigError::ZeroRowHeight);
        }
        if options.on_change_column_width.is_none() {
            if let Some(column) = columns.iter().find(|c| c.resizable) {
                return Err(ConfigError::MissingColumnWidthCallback {
                    column: column.id.clone(),
                });
            }
        }
        let model = TableModel::new(columns, rows)?;
        vdebug!(
            row_height = options.row_height,
            columns = model.columns().len(),
            total_rows = model.total_rows(),
            "VirtualTable::new"
        );
        Ok(Self {
            viewport: ViewportState::new(options.row_height, 1),
            options,
            model,
            pool: RowPool::new(),
            columns: ColumnWidthController::new(),
            viewport_height: 0,
            scroll_offset: 0,
            mounted: false,
        })
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn model(&self) -> &TableModel {
        &self.model
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn pool(&self) -> &RowPool {
        &self.pool
    }

    pub fn slots(&self) -> &[Slot] {
        self.pool.slots()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn row_height(&self) -> u32 {
        self.options.row_height
    }

    pub fn total_rows(&self) -> usize {
        self.model.total_rows()
    }

    pub fn visible_rows(&self) -> usize {
        self.viewport.visible_rows()
    }

    pub fn hidden_rows_top(&self) -> usize {
        self.viewport.hidden_rows_top()
    }

    pub fn rows_offset(&self) -> usize {
        self.viewport.rows_offset()
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Height of the spacer that stands in for the full list.
    pub fn spacer_height(&self) -> u64 {
        self.model.spacer_height(self.options.row_height)
    }

    /// Data rows covered by the window.
    pub fn visible_range(&self) -> VirtualRange {
        window::visible_range(
            self.viewport.hidden_rows_top(),
            self.viewport.visible_rows(),
            self.model.total_rows(),
        )
    }

    pub fn is_scrolled_to_bottom(&self) -> bool {
        window::is_scrolled_to_bottom(self.spacer_height(), self.scroll_offset, self.viewport_height)
    }

    /// Collects the rows currently backed by a slot into `out` (ascending, clears `out`
    /// first).
    pub fn assigned_rows(&self, out: &mut Vec<usize>) {
        self.pool.assigned_rows(out);
    }

    /// Iterates over slots in pool order without allocations.
    pub fn for_each_slot(&self, mut f: impl FnMut(&Slot)) {
        for slot in self.pool.slots() {
            f(slot);
        }
    }

    pub fn lookup_cell(&self, row_index: usize, column_id: &str) -> Option<&Value> {
        self.model.lookup_cell(row_index, column_id)
    }

    /// Background tint of window position `index`, when `debug` is enabled.
    pub fn debug_tint(&self, index: usize) -> Option<DebugTint> {
        self.options.debug.then(|| DebugTint::for_index(index))
    }

    /// Effective layout width of `column_id`.
    pub fn column_width(&self, column_id: &str) -> Option<u32> {
        let column = self.model.column(column_id)?;
        Some(column.effective_width(
            self.options.default_column_width,
            self.options.min_column_width,
        ))
    }

    /// Returns the host-reported geometry, for persisting scroll position.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport_height: self.viewport_height,
            scroll_offset: self.scroll_offset,
        }
    }

    /// Mounts the table onto a viewport of `viewport_height` pixels.
    ///
    /// Creates `visible_count(viewport_height)` slots starting at row 0. Mounting an already
    /// mounted table rebuilds the pool.
    pub fn mount(&mut self, viewport_height: u32, mut f: impl FnMut(SlotEvent)) {
        if self.mounted {
            vwarn!("mount: table already mounted, rebuilding");
            self.pool.drain(|slot| f(SlotEvent::Removed(slot.id)));
        }
        self.viewport_height = viewport_height;
        self.scroll_offset = 0;
        self.mounted = true;
        let visible_rows = window::visible_count(viewport_height, self.options.row_height);
        vdebug!(viewport_height, visible_rows, "mount");
        self.rebuild(visible_rows, f);
    }

    /// Mounts and restores a previously captured [`FrameState`].
    pub fn mount_with_frame(&mut self, frame: FrameState, mut f: impl FnMut(SlotEvent)) {
        self.mount(frame.viewport_height, &mut f);
        self.on_scroll(frame.scroll_offset, f);
    }

    /// Swaps the row collection and resets the window to the top.
    ///
    /// The pool is torn down and rebuilt at the current visible row count; all old slot ids
    /// are reported as removed.
    pub fn update_rows(&mut self, rows: Vec<Row>, mut f: impl FnMut(SlotEvent)) {
        let _previous = self.model.replace_rows(rows);
        vdebug!(
            previous = _previous.len(),
            total_rows = self.model.total_rows(),
            "update_rows"
        );
        self.scroll_offset = 0;
        if !self.mounted {
            self.viewport.reset(self.viewport.visible_rows());
            return;
        }
        self.pool.drain(|slot| f(SlotEvent::Removed(slot.id)));
        self.rebuild(self.viewport.visible_rows(), f);
    }

    /// Applies a scroll offset reported by the host.
    pub fn on_scroll(&mut self, scroll_offset: u64, f: impl FnMut(SlotEvent)) {
        self.scroll_offset = scroll_offset;
        if !self.mounted {
            return;
        }
        crate::scroll::apply_scroll(
            &mut self.viewport,
            &mut self.pool,
            scroll_offset,
            self.model.total_rows(),
            self.options.clamp_to_rows,
            f,
        );
    }

    /// Applies a viewport height reported by the host.
    ///
    /// Growing while scrolled to the bottom reveals rows above the window; otherwise rows are
    /// added below it. Shrinking drops the bottom-most slots.
    ///
    /// "Scrolled to the bottom" is judged against the new height, the way a host sees it
    /// once the resized viewport has been laid out.
    pub fn on_viewport_resize(&mut self, viewport_height: u32, f: impl FnMut(SlotEvent)) {
        self.viewport_height = viewport_height;
        if !self.mounted {
            return;
        }
        let scrolled_to_bottom = self.is_scrolled_to_bottom();
        let new_visible_rows = window::visible_count(viewport_height, self.options.row_height);
        crate::resize::apply_resize(
            &mut self.viewport,
            &mut self.pool,
            new_visible_rows,
            self.model.total_rows(),
            scrolled_to_bottom,
            f,
        );
    }

    /// Drops every slot. The table can be mounted again afterwards.
    pub fn dispose(&mut self, mut f: impl FnMut(SlotEvent)) {
        vdebug!(slots = self.pool.len(), "dispose");
        self.pool.drain(|slot| f(SlotEvent::Removed(slot.id)));
        self.columns.pointer_up();
        self.mounted = false;
    }

    pub fn is_resizing_column(&self) -> bool {
        self.columns.is_dragging()
    }

    pub fn column_drag(&self) -> Option<&ColumnDragState> {
        self.columns.drag_state()
    }

    /// Starts dragging the resizer of `column_id`.
    ///
    /// Returns `false` when the column is unknown or not resizable.
    pub fn begin_column_resize(&mut self, column_id: &str, pointer_x: i32) -> bool {
        self.columns.pointer_down(
            &self.model,
            column_id,
            pointer_x,
            self.options.default_column_width,
            self.options.min_column_width,
        )
    }

    /// Follows the pointer during a column drag.
    ///
    /// Stores the new width on the column, fires `on_change_column_width`, and returns the
    /// broadcast for the host to apply to every header and cell of the column. Returns
    /// `None` when no drag is active.
    pub fn drag_column_resize(&mut self, pointer_x: i32) -> Option<WidthBroadcast> {
        let broadcast =
            self.columns
                .pointer_move(&mut self.model, pointer_x, self.options.min_column_width)?;
        if let Some(cb) = &self.options.on_change_column_width {
            cb(&broadcast.column_id, broadcast.width);
        }
        Some(broadcast)
    }

    /// Releases the column resizer. Returns the final width of the drag, if it moved.
    pub fn end_column_resize(&mut self) -> Option<WidthBroadcast> {
        self.columns.pointer_up()
    }

    fn rebuild(&mut self, visible_rows: usize, mut f: impl FnMut(SlotEvent)) {
        self.viewport.reset(visible_rows);
        let total_rows = self.model.total_rows();
        let row_height = self.options.row_height;
        for index in 0..self.viewport.visible_rows() {
            let slot = self.pool.spawn(
                index,
                window::row_for(index, total_rows),
                window::row_offset(index, row_height),
            );
            f(SlotEvent::Created(slot));
        }
    }
}
