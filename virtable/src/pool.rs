use alloc::vec::Vec;

use crate::{Slot, SlotId, SlotRow};

/// The recycled row slots of a mounted table.
///
/// Pool order is meaningful: the slot at position `i` is placed through
/// [`crate::window::slot_placement`] with that `i`. Slot ids are never reused, so a host can
/// key its elements by [`SlotId`] across a full rebuild.
#[derive(Clone, Debug, Default)]
pub struct RowPool {
    slots: Vec<Slot>,
    next_id: u64,
}

impl RowPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    pub fn find(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    /// Appends a new slot covering window position `index`.
    pub(crate) fn spawn(&mut self, index: usize, row: SlotRow, offset: u64) -> Slot {
        let slot = Slot {
            id: SlotId(self.next_id),
            index,
            row,
            offset,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.slots.push(slot);
        slot
    }

    /// Removes the slot covering window position `index`, if any.
    pub(crate) fn remove_index(&mut self, index: usize) -> Option<Slot> {
        let pos = self.slots.iter().position(|s| s.index == index)?;
        Some(self.slots.remove(pos))
    }

    /// Empties the pool, handing each removed slot to `f`.
    pub(crate) fn drain(&mut self, mut f: impl FnMut(Slot)) {
        for slot in self.slots.drain(..) {
            f(slot);
        }
    }

    /// Reorders slots by `key` without touching their contents.
    pub(crate) fn reorder_by_key(&mut self, key: impl FnMut(&Slot) -> usize) {
        self.slots.sort_by_key(key);
    }

    /// Row indexes currently backed by data, ascending.
    pub fn assigned_rows(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(self.slots.iter().filter_map(|s| s.row.index()));
        out.sort_unstable();
    }
}
