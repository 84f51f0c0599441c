use alloc::vec::Vec;

use virtable::{Column, Row, Slot, SlotEvent, TableOptions, VirtualTable, WidthBroadcast};

use crate::{
    AdapterError, ColumnWidthStore, DEFAULT_PERSIST_DELAY_MS, HostSurface, RenderContext,
    RowRenderer, WidthPersister,
};

/// A framework-neutral controller that wraps a [`virtable::VirtualTable`] and mirrors it onto
/// a [`HostSurface`].
///
/// This type does not hold any UI objects of its own. Adapters drive it by calling:
/// - `mount(host)` once the surface exists, `dispose()` when it goes away
/// - `on_scroll` / `on_resize` when UI events occur
/// - `pointer_down` / `pointer_move` / `pointer_up` for column resizer drags
/// - `tick(now_ms)` each frame/timer tick (for debounced width persistence)
///
/// Slot events coming out of the table are rendered through the [`RowRenderer`] and applied
/// to the host in the order they were emitted.
#[derive(Debug)]
pub struct TableController<H, R, S> {
    table: VirtualTable,
    renderer: R,
    persister: WidthPersister<S>,
    host: Option<H>,
    events: Vec<SlotEvent>,
}

impl<H, R, S> TableController<H, R, S>
where
    H: HostSurface,
    R: RowRenderer<Output = H::Content>,
    S: ColumnWidthStore,
{
    /// Builds the table and its controller.
    ///
    /// Widths reach `store` through the debounced persister, so `on_change_column_width` may
    /// be left unset even with resizable columns.
    pub fn new(
        options: TableOptions,
        columns: Vec<Column>,
        rows: Vec<Row>,
        renderer: R,
        store: S,
    ) -> Result<Self, AdapterError> {
        let options = if options.on_change_column_width.is_none() {
            options.with_on_change_column_width(Some(|_column_id: &str, _width: u32| {
                atrace!(column_id = _column_id, width = _width, "column width broadcast");
            }))
        } else {
            options
        };
        let table = VirtualTable::new(options, columns, rows)?;
        Ok(Self::from_table(table, renderer, store))
    }

    pub fn from_table(table: VirtualTable, renderer: R, store: S) -> Self {
        Self {
            table,
            renderer,
            persister: WidthPersister::new(store, DEFAULT_PERSIST_DELAY_MS),
            host: None,
            events: Vec::new(),
        }
    }

    /// Overrides the quiet period before a dragged width is persisted.
    ///
    /// Widths already waiting are persisted first.
    pub fn with_persist_delay(mut self, delay_ms: u64) -> Self {
        self.persister.flush();
        self.persister = WidthPersister::new(self.persister.into_store(), delay_ms);
        self
    }

    pub fn table(&self) -> &VirtualTable {
        &self.table
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn store(&self) -> &S {
        self.persister.store()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn is_mounted(&self) -> bool {
        self.host.is_some()
    }

    /// Attaches `host`, sizes the spacer, and renders the initial pool.
    pub fn mount(&mut self, mut host: H) -> Result<(), AdapterError> {
        if self.host.is_some() {
            return Err(AdapterError::AlreadyMounted);
        }
        let viewport_height = host.measure_viewport_height();
        host.set_spacer_height(self.table.spacer_height());
        self.table.mount(viewport_height, |ev| self.events.push(ev));
        adebug!(
            viewport_height,
            slots = self.events.len(),
            "controller mount"
        );
        self.host = Some(host);
        self.flush_events()
    }

    /// Replaces the rows, scrolls the host back to the top, and re-renders the pool.
    pub fn update_rows(&mut self, rows: Vec<Row>) -> Result<(), AdapterError> {
        let host = self.host.as_mut().ok_or(AdapterError::NotMounted)?;
        self.table.update_rows(rows, |ev| self.events.push(ev));
        host.set_scroll_offset(0);
        host.set_spacer_height(self.table.spacer_height());
        self.flush_events()
    }

    /// Call this when the host reports a scroll offset change.
    pub fn on_scroll(&mut self, scroll_offset: u64) -> Result<(), AdapterError> {
        if self.host.is_none() {
            return Err(AdapterError::NotMounted);
        }
        self.table.on_scroll(scroll_offset, |ev| self.events.push(ev));
        self.flush_events()
    }

    /// Call this when the viewport may have changed size. The height is measured on the host.
    pub fn on_resize(&mut self) -> Result<(), AdapterError> {
        let host = self.host.as_ref().ok_or(AdapterError::NotMounted)?;
        let viewport_height = host.measure_viewport_height();
        if viewport_height == self.table.viewport_height() {
            return Ok(());
        }
        self.table
            .on_viewport_resize(viewport_height, |ev| self.events.push(ev));
        self.flush_events()
    }

    /// Presses the resizer of `column_id`. Returns whether a drag started.
    pub fn pointer_down(&mut self, column_id: &str, pointer_x: i32) -> Result<bool, AdapterError> {
        if self.host.is_none() {
            return Err(AdapterError::NotMounted);
        }
        Ok(self.table.begin_column_resize(column_id, pointer_x))
    }

    /// Follows the pointer during a column drag.
    ///
    /// The new width is applied to the host right away; persistence is debounced from
    /// `now_ms`.
    pub fn pointer_move(
        &mut self,
        pointer_x: i32,
        now_ms: u64,
    ) -> Result<Option<WidthBroadcast>, AdapterError> {
        let host = self.host.as_mut().ok_or(AdapterError::NotMounted)?;
        let Some(broadcast) = self.table.drag_column_resize(pointer_x) else {
            return Ok(None);
        };
        host.set_column_width(&broadcast.column_id, broadcast.width);
        self.persister
            .schedule(&broadcast.column_id, broadcast.width, now_ms);
        Ok(Some(broadcast))
    }

    /// Releases the column resizer. Pending widths still wait for their quiet period.
    pub fn pointer_up(&mut self) -> Option<WidthBroadcast> {
        self.table.end_column_resize()
    }

    /// Advances timers. Returns how many column widths were persisted.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.persister.tick(now_ms)
    }

    /// Detaches and returns the host after removing every slot from it.
    ///
    /// Widths still waiting are persisted immediately.
    pub fn dispose(&mut self) -> Option<H> {
        let mut host = self.host.take()?;
        self.table.dispose(|ev| self.events.push(ev));
        for ev in self.events.drain(..) {
            if let SlotEvent::Removed(id) = ev {
                host.remove_slot(id);
            }
        }
        host.release();
        let _persisted = self.persister.flush();
        adebug!(persisted = _persisted, "controller dispose");
        Some(host)
    }

    fn flush_events(&mut self) -> Result<(), AdapterError> {
        let host = self.host.as_mut().ok_or(AdapterError::NotMounted)?;
        for ev in self.events.drain(..) {
            match ev {
                SlotEvent::Created(slot) => {
                    let content = render_slot(&self.table, &self.renderer, &slot);
                    host.create_slot(slot.id, slot.offset, content);
                }
                SlotEvent::Reassigned(slot) => {
                    let content = render_slot(&self.table, &self.renderer, &slot);
                    host.update_slot(slot.id, slot.offset, content);
                }
                SlotEvent::Removed(id) => host.remove_slot(id),
            }
        }
        Ok(())
    }
}

fn render_slot<R: RowRenderer>(table: &VirtualTable, renderer: &R, slot: &Slot) -> R::Output {
    renderer.render_row_content(&RenderContext::for_slot(table, slot))
}
