use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Cells of a single row, keyed by column id.
#[cfg(feature = "std")]
pub(crate) type CellMap<V> = HashMap<String, V>;
#[cfg(not(feature = "std"))]
pub(crate) type CellMap<V> = BTreeMap<String, V>;

/// Column ids seen while validating a column set.
#[cfg(feature = "std")]
pub(crate) type ColumnIdSet<'a> = std::collections::HashSet<&'a str>;
#[cfg(not(feature = "std"))]
pub(crate) type ColumnIdSet<'a> = alloc::collections::BTreeSet<&'a str>;
