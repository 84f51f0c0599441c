//! Host wiring for the `virtable` crate.
//!
//! The `virtable` crate is UI-agnostic and focuses on windowing math and slot recycling. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A [`TableController`] that mirrors slot events onto a [`HostSurface`]
//! - Debounced persistence of dragged column widths ([`Debouncer`], [`WidthPersister`])
//! - A plain-text [`RowRenderer`] and a drag handle for the viewport's bottom edge
//!
//! Time is adapter-driven: callers pass `now_ms` and call `tick` from their own timer.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod debounce;
mod error;
mod handle;
mod host;
mod render;


pub use controller::TableController;
pub use debounce::{DEFAULT_PERSIST_DELAY_MS, Debouncer, WidthPersister};
pub use error::AdapterError;
pub use handle::{DEFAULT_GRAB_HEIGHT, ViewportResizeHandle};
pub use host::{ColumnWidthStore, HostSurface, RenderContext, RowRenderer};
pub use render::{RenderedCell, RenderedRow, TextRowRenderer};
