use alloc::vec::Vec;

use crate::key::ColumnIdSet;
use crate::window;
use crate::{Column, ConfigError, Row, Value};

/// Column definitions plus the full row collection.
///
/// Rows are replaced wholesale; columns live as long as the table and only their widths
/// change.
#[derive(Clone, Debug, Default)]
pub struct TableModel {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl TableModel {
    /// Builds a model, rejecting duplicate column ids and inverted width bounds.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Result<Self, ConfigError> {
        validate_columns(&columns)?;
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns that are laid out (not `hidden`), in order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|c| !c.hidden)
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub(crate) fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn spacer_height(&self, row_height: u32) -> u64 {
        window::spacer_height(self.rows.len(), row_height)
    }

    /// The value at (`row_index`, `column_id`), or `None` when either is unknown.
    pub fn lookup_cell(&self, row_index: usize, column_id: &str) -> Option<&Value> {
        self.rows.get(row_index)?.get(column_id)
    }

    /// Swaps in a new row collection, returning the old one.
    pub(crate) fn replace_rows(&mut self, rows: Vec<Row>) -> Vec<Row> {
        core::mem::replace(&mut self.rows, rows)
    }

    /// Stores `width` on the column. Returns `false` for unknown ids.
    pub(crate) fn set_column_width(&mut self, column_id: &str, width: u32) -> bool {
        match self.column_mut(column_id) {
            Some(column) => {
                column.width = Some(width);
                true
            }
            None => false,
        }
    }
}

fn validate_columns(columns: &[Column]) -> Result<(), ConfigError> {
    let mut seen = ColumnIdSet::new();
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(ConfigError::DuplicateColumnId {
                column: column.id.clone(),
            });
        }
        if let (Some(min), Some(max)) = (column.min_width, column.max_width) {
            if min > max {
                return Err(ConfigError::InvalidWidthBounds {
                    column: column.id.clone(),
                    min,
                    max,
                });
            }
        }
    }
    Ok(())
}
