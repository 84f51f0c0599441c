use crate::window;

/// Window geometry of a mounted table.
///
/// `rows_offset` is derived: every setter that touches `hidden_rows_top` or `visible_rows`
/// recomputes it before returning, so it always matches the modulus in effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportState {
    row_height: u32,
    visible_rows: usize,
    hidden_rows_top: usize,
    rows_offset: usize,
}

impl ViewportState {
    pub fn new(row_height: u32, visible_rows: usize) -> Self {
        Self {
            row_height,
            visible_rows: visible_rows.max(1),
            hidden_rows_top: 0,
            rows_offset: 0,
        }
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn hidden_rows_top(&self) -> usize {
        self.hidden_rows_top
    }

    pub fn rows_offset(&self) -> usize {
        self.rows_offset
    }

    pub(crate) fn set_hidden_rows_top(&mut self, hidden_rows_top: usize) {
        self.hidden_rows_top = hidden_rows_top;
        self.rows_offset = window::ring_phase(self.hidden_rows_top, self.visible_rows);
    }

    /// Commits a new slot count and window start together.
    pub(crate) fn set_window(&mut self, hidden_rows_top: usize, visible_rows: usize) {
        self.visible_rows = visible_rows.max(1);
        self.set_hidden_rows_top(hidden_rows_top);
    }

    pub(crate) fn reset(&mut self, visible_rows: usize) {
        self.set_window(0, visible_rows);
    }
}

/// A lightweight snapshot of what the host last reported.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so a table can
/// be restored to the same scroll position across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport_height: u32,
    pub scroll_offset: u64,
}
