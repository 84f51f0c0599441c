use alloc::string::String;

use thiserror::Error;

/// Configuration problems detected when a table is constructed.
///
/// These are reported up front so a misconfigured table never reaches its first scroll or
/// drag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `row_height` was zero.
    #[error("row height must be greater than zero")]
    ZeroRowHeight,

    /// A resizable column exists but no width change callback was configured.
    #[error("column `{column}` is resizable but no on_change_column_width callback is set")]
    MissingColumnWidthCallback {
        /// The first resizable column found.
        column: String,
    },

    /// Two columns share the same id.
    #[error("duplicate column id `{column}`")]
    DuplicateColumnId {
        /// The repeated id.
        column: String,
    },

    /// A column's `min_width` exceeds its `max_width`.
    #[error("column `{column}` has min_width {min} greater than max_width {max}")]
    InvalidWidthBounds {
        /// The offending column.
        column: String,
        /// Declared lower bound.
        min: u32,
        /// Declared upper bound.
        max: u32,
    },
}
