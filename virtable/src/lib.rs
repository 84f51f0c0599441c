//! A headless windowing engine for very large, fixed-row-height tables.
//!
//! For host wiring (element creation, debounced width persistence), see the
//! `virtable-adapter` crate.
//!
//! Only the rows that fit in the viewport (plus one overscan row) are ever materialized. A
//! small pool of slots is recycled as the user scrolls: each slot keeps its identity and is
//! merely pointed at a new row and offset, while a spacer as tall as the full list keeps the
//! scrollbar honest.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport height, at mount and whenever it changes
//! - the scroll offset
//! - pointer positions while a column resizer is dragged
//! - elements for the slots reported through [`SlotEvent`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod column;
mod error;
mod key;
mod model;
mod options;
mod pool;
mod resize;
mod scroll;
mod state;
mod table;
mod types;
pub mod window;

#[cfg(test)]
mod tests;

pub use column::{ColumnDragState, ColumnWidthController};
pub use error::ConfigError;
pub use model::TableModel;
pub use options::{DEFAULT_ROW_HEIGHT, OnChangeColumnWidth, TableOptions};
pub use pool::RowPool;
pub use state::{FrameState, ViewportState};
pub use table::VirtualTable;
pub use types::{
    Column, ColumnType, DEFAULT_COLUMN_WIDTH, DEFAULT_MIN_COLUMN_WIDTH, DebugTint, Row, Slot,
    SlotEvent, SlotId, SlotRow, Value, VirtualRange, WidthBroadcast,
};
pub use window::{PoolPlan, SlotPlacement};
