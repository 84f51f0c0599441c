use alloc::string::String;
use core::fmt;

use chrono::NaiveDate;

use crate::key::CellMap;

/// Smallest width a column may be dragged to when it does not declare its own `min_width`.
pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 40;

/// Width used for columns that do not declare a `width`.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnType {
    #[default]
    Text,
    Date,
    Integer,
}

/// A column definition.
///
/// `width` is mutated in place while the column is drag-resized; the rest is fixed for the
/// lifetime of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    pub id: String,
    pub label: String,
    pub kind: ColumnType,
    pub editable: bool,
    pub hidden: bool,
    /// Pinned while the row scrolls horizontally; hosts style it through `cell-sticky`.
    pub sticky: bool,
    pub resizable: bool,
    pub width: Option<u32>,
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            editable: false,
            hidden: false,
            sticky: false,
            resizable: false,
            width: None,
            min_width: None,
            max_width: None,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ColumnType::Text)
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_width_bounds(mut self, min_width: Option<u32>, max_width: Option<u32>) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    /// Lower width bound, falling back to `default_min`.
    pub fn min_width_or(&self, default_min: u32) -> u32 {
        self.min_width.unwrap_or(default_min)
    }

    /// Upper width bound (unbounded when `max_width` is unset).
    pub fn max_width_or_unbounded(&self) -> u32 {
        self.max_width.unwrap_or(u32::MAX)
    }

    /// Clamps `width` into this column's `[min, max]` bounds.
    pub fn clamp_width(&self, width: u32, default_min: u32) -> u32 {
        let min = self.min_width_or(default_min);
        let max = self.max_width_or_unbounded().max(min);
        width.clamp(min, max)
    }

    /// The width the column is laid out with.
    pub fn effective_width(&self, default_width: u32, default_min: u32) -> u32 {
        self.clamp_width(self.width.unwrap_or(default_width), default_min)
    }
}

/// A typed cell value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum Value {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl Value {
    pub fn kind(&self) -> ColumnType {
        match self {
            Self::Text(_) => ColumnType::Text,
            Self::Integer(_) => ColumnType::Integer,
            Self::Date(_) => ColumnType::Date,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// A single row of data, keyed by column id.
///
/// Rows have no identity of their own: they are addressed by their index in the row
/// collection, and that index is meaningless after the collection is replaced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Row {
    cells: CellMap<Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column_id, value);
        self
    }

    pub fn insert(&mut self, column_id: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(column_id.into(), value.into());
    }

    pub fn get(&self, column_id: &str) -> Option<&Value> {
        self.cells.get(column_id)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Stable identity of a pool slot (the host's row element handle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(pub u64);

/// The data row a slot displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotRow {
    Row(usize),
    /// The slot's window position has no backing data (before the first or past the last
    /// row). Hosts render a placeholder.
    Empty,
}

impl SlotRow {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Row(i) => Some(i),
            Self::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A pool member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub id: SlotId,
    /// Window position this slot covers. May exceed the row count when the window runs past
    /// the end of the data.
    pub index: usize,
    pub row: SlotRow,
    /// Vertical offset from the top of the spacer.
    pub offset: u64,
}

impl Slot {
    /// Points the slot at a new window position.
    ///
    /// Returns `true` when the position changed, i.e. the host must re-render the slot.
    pub fn reassign(&mut self, index: usize, row: SlotRow, offset: u64) -> bool {
        if self.index == index && self.row == row && self.offset == offset {
            return false;
        }
        self.index = index;
        self.row = row;
        self.offset = offset;
        true
    }
}

/// A pool mutation the host must mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotEvent {
    /// A new slot was added to the pool.
    Created(Slot),
    /// An existing slot now covers a different row (new content and offset).
    Reassigned(Slot),
    /// The slot left the pool; the host may drop its element.
    Removed(SlotId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// Row background used in debug mode. Alpha is fixed at 0.3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugTint {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl DebugTint {
    /// Cycles through six colours so neighbouring rows are always distinguishable.
    pub fn for_index(index: usize) -> Self {
        let channel = |phase: usize| {
            if (index + phase) % 6 < 3 { 0 } else { 255 }
        };
        Self {
            red: channel(0),
            green: channel(2),
            blue: channel(4),
        }
    }
}

impl fmt::Display for DebugTint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, 0.3)", self.red, self.green, self.blue)
    }
}

/// A column width update to apply to every header and cell of `column_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidthBroadcast {
    pub column_id: String,
    pub width: u32,
}
