use virtable::{Column, DebugTint, Slot, SlotId, SlotRow, TableModel, VirtualTable};

/// The rendering surface a table is mounted onto.
///
/// Implemented by the host toolkit (DOM, TUI buffer, immediate-mode GUI, ...). The
/// controller owns the surface while mounted and is the only caller, so methods take
/// `&mut self` and never need interior mutability.
pub trait HostSurface {
    /// What a rendered row looks like to the host.
    type Content;

    /// Current height of the scroll viewport, in pixels. Called at mount and on every
    /// resize signal.
    fn measure_viewport_height(&self) -> u32;

    /// Sizes the spacer that stands in for the full list.
    fn set_spacer_height(&mut self, height: u64);

    /// Moves the viewport's scroll position (used to jump back to the top on data refresh).
    fn set_scroll_offset(&mut self, offset: u64);

    /// Adds a row element for a new slot.
    fn create_slot(&mut self, slot: SlotId, offset: u64, content: Self::Content);

    /// Moves an existing row element and replaces its content.
    fn update_slot(&mut self, slot: SlotId, offset: u64, content: Self::Content);

    /// Drops the row element of a slot that left the pool.
    fn remove_slot(&mut self, slot: SlotId);

    /// Applies a width to the header and every rendered cell of `column_id`.
    fn set_column_width(&mut self, column_id: &str, width: u32);

    /// Releases observers and listeners. Called once on dispose.
    fn release(&mut self) {}
}

/// Everything a [`RowRenderer`] needs to render one slot.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    /// Window position of the slot (used for the debug tint).
    pub index: usize,
    /// [`SlotRow::Empty`] when the position has no data.
    pub row: SlotRow,
    pub model: &'a TableModel,
    pub tint: Option<DebugTint>,
    pub default_column_width: u32,
    pub min_column_width: u32,
}

impl<'a> RenderContext<'a> {
    /// Context for `slot` as the table currently lays it out.
    pub fn for_slot(table: &'a VirtualTable, slot: &Slot) -> Self {
        let options = table.options();
        Self {
            index: slot.index,
            row: slot.row,
            model: table.model(),
            tint: table.debug_tint(slot.index),
            default_column_width: options.default_column_width,
            min_column_width: options.min_column_width,
        }
    }

    /// Current layout width of `column`, including widths set by a drag.
    pub fn column_width(&self, column: &Column) -> u32 {
        column.effective_width(self.default_column_width, self.min_column_width)
    }
}

/// Produces the visual content for one slot.
pub trait RowRenderer {
    type Output;

    /// Renders `cx.row` using the model's current columns and widths.
    ///
    /// The renderer must return its empty state for [`SlotRow::Empty`] rather than stale
    /// content.
    fn render_row_content(&self, cx: &RenderContext<'_>) -> Self::Output;
}

/// Durable storage for column widths (e.g. a key-value store).
pub trait ColumnWidthStore {
    fn persist_column_width(&mut self, column_id: &str, width: u32);
}

impl<F: FnMut(&str, u32)> ColumnWidthStore for F {
    fn persist_column_width(&mut self, column_id: &str, width: u32) {
        self(column_id, width)
    }
}
