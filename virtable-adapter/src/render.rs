use alloc::string::{String, ToString};
use alloc::vec::Vec;

use virtable::{Column, ColumnType, DebugTint, SlotRow};

use crate::{RenderContext, RowRenderer};

/// One cell of a [`RenderedRow`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedCell {
    pub column_id: String,
    /// CSS-style classes: `cell`, `cell-<type>`, then `cell-empty` / `cell-editable` /
    /// `cell-sticky`.
    pub classes: Vec<&'static str>,
    pub text: String,
    /// Layout width of the column at render time.
    pub width: u32,
}

impl RenderedCell {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

/// Text content for one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedRow {
    pub index: usize,
    pub row: SlotRow,
    pub tint: Option<DebugTint>,
    pub cells: Vec<RenderedCell>,
}

impl RenderedRow {
    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    pub fn cell(&self, column_id: &str) -> Option<&RenderedCell> {
        self.cells.iter().find(|c| c.column_id == column_id)
    }
}

/// Renders every visible column as plain text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextRowRenderer;

fn type_class(kind: ColumnType) -> &'static str {
    match kind {
        ColumnType::Text => "cell-text",
        ColumnType::Date => "cell-date",
        ColumnType::Integer => "cell-integer",
    }
}

fn render_cell(column: &Column, cx: &RenderContext<'_>) -> RenderedCell {
    let mut classes = alloc::vec!["cell", type_class(column.kind)];
    let text = match cx.row.index() {
        Some(i) => cx
            .model
            .lookup_cell(i, &column.id)
            .map(ToString::to_string)
            .unwrap_or_default(),
        None => {
            classes.push("cell-empty");
            String::new()
        }
    };
    if column.editable {
        classes.push("cell-editable");
    }
    if column.sticky {
        classes.push("cell-sticky");
    }
    RenderedCell {
        column_id: column.id.clone(),
        classes,
        text,
        width: cx.column_width(column),
    }
}

impl RowRenderer for TextRowRenderer {
    type Output = RenderedRow;

    fn render_row_content(&self, cx: &RenderContext<'_>) -> RenderedRow {
        RenderedRow {
            index: cx.index,
            row: cx.row,
            tint: cx.tint,
            cells: cx
                .model
                .visible_columns()
                .map(|c| render_cell(c, cx))
                .collect(),
        }
    }
}
