use alloc::sync::Arc;

use crate::{DEFAULT_COLUMN_WIDTH, DEFAULT_MIN_COLUMN_WIDTH};

/// Default fixed row height, in pixels.
pub const DEFAULT_ROW_HEIGHT: u32 = 32;

/// A callback fired for every broadcast column width: `(column_id, width)`.
///
/// It runs on every pointer move of a drag, so persistence behind it should be rate limited
/// (see `virtable-adapter`'s `Debouncer`).
pub type OnChangeColumnWidth = Arc<dyn Fn(&str, u32) + Send + Sync>;

/// Configuration for [`crate::VirtualTable`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
pub struct TableOptions {
    /// Fixed height of every row. Cannot change for the lifetime of the table.
    pub row_height: u32,

    /// Tints each row by index so recycled slots can be checked visually.
    pub debug: bool,

    /// Required as soon as one column is resizable.
    pub on_change_column_width: Option<OnChangeColumnWidth>,

    /// Width of columns that do not declare one.
    pub default_column_width: u32,

    /// Lower width bound of columns that do not declare a `min_width`.
    pub min_column_width: u32,

    /// Keeps the window inside the data: the first rendered row never goes past
    /// `total_rows - visible_rows`.
    ///
    /// When disabled, scrolling past the end yields trailing empty slots instead.
    pub clamp_to_rows: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            debug: false,
            on_change_column_width: None,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            clamp_to_rows: true,
        }
    }
}

impl Clone for TableOptions {
    fn clone(&self) -> Self {
        Self {
            row_height: self.row_height,
            debug: self.debug,
            on_change_column_width: self.on_change_column_width.clone(),
            default_column_width: self.default_column_width,
            min_column_width: self.min_column_width,
            clamp_to_rows: self.clamp_to_rows,
        }
    }
}

impl TableOptions {
    pub fn new(row_height: u32) -> Self {
        Self {
            row_height,
            ..Self::default()
        }
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_on_change_column_width(
        mut self,
        on_change: Option<impl Fn(&str, u32) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change_column_width = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_default_column_width(mut self, width: u32) -> Self {
        self.default_column_width = width;
        self
    }

    pub fn with_min_column_width(mut self, width: u32) -> Self {
        self.min_column_width = width;
        self
    }

    pub fn with_clamp_to_rows(mut self, clamp_to_rows: bool) -> Self {
        self.clamp_to_rows = clamp_to_rows;
        self
    }
}

impl core::fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableOptions")
            .field("row_height", &self.row_height)
            .field("debug", &self.debug)
            .field(
                "on_change_column_width",
                &self.on_change_column_width.as_ref().map(|_| ".."),
            )
            .field("default_column_width", &self.default_column_width)
            .field("min_column_width", &self.min_column_width)
            .field("clamp_to_rows", &self.clamp_to_rows)
            .finish()
    }
}
