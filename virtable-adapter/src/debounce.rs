use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::ColumnWidthStore;

/// Default quiet period before a dragged column width is persisted.
pub const DEFAULT_PERSIST_DELAY_MS: u64 = 250;

/// A time-driven debouncer (adapter-driven: you pass `now_ms`).
///
/// Trailing mode (the default) fires the last value once no call arrived for `wait_ms`.
/// Leading mode fires the first call of a burst immediately and swallows the rest until
/// the burst has been quiet for `wait_ms`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debouncer<T> {
    wait_ms: u64,
    leading: bool,
    pending: Option<T>,
    deadline: Option<u64>,
}

impl<T> Debouncer<T> {
    /// A trailing-edge debouncer.
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            leading: false,
            pending: None,
            deadline: None,
        }
    }

    /// A leading-edge debouncer.
    pub fn leading(wait_ms: u64) -> Self {
        Self {
            leading: true,
            ..Self::new(wait_ms)
        }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    /// Whether a burst is still open (a trailing value may be waiting).
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records a call at `now_ms`.
    ///
    /// Returns the value when it must fire right away (leading edge of a burst).
    pub fn call(&mut self, value: T, now_ms: u64) -> Option<T> {
        let idle = self.deadline.is_none_or(|d| now_ms >= d);
        self.deadline = Some(now_ms.saturating_add(self.wait_ms));
        if self.leading {
            return idle.then_some(value);
        }
        self.pending = Some(value);
        None
    }

    /// Advances time. Returns the trailing value once the burst has been quiet long enough.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        let deadline = self.deadline?;
        if now_ms < deadline {
            return None;
        }
        self.deadline = None;
        self.pending.take()
    }

    /// Ends the burst now, returning the trailing value if any.
    pub fn flush(&mut self) -> Option<T> {
        self.deadline = None;
        self.pending.take()
    }

    /// Drops the burst without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }
}

/// Rate-limits column width persistence: each column's width reaches the store only after
/// its drag has been still for the debounce delay.
#[derive(Debug)]
pub struct WidthPersister<S> {
    store: S,
    wait_ms: u64,
    pending: BTreeMap<String, Debouncer<u32>>,
}

impl<S: ColumnWidthStore> WidthPersister<S> {
    pub fn new(store: S, wait_ms: u64) -> Self {
        Self {
            store,
            wait_ms,
            pending: BTreeMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn has_pending(&self) -> bool {
        self.pending.values().any(Debouncer::is_pending)
    }

    /// Queues `width` for `column_id`, replacing any width still waiting.
    pub fn schedule(&mut self, column_id: &str, width: u32, now_ms: u64) {
        let wait_ms = self.wait_ms;
        self.pending
            .entry(column_id.into())
            .or_insert_with(|| Debouncer::new(wait_ms))
            .call(width, now_ms);
    }

    /// Persists every width whose quiet period has elapsed. Returns how many were written.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let mut written = 0usize;
        for (column_id, debouncer) in self.pending.iter_mut() {
            if let Some(width) = debouncer.poll(now_ms) {
                atrace!(column_id = column_id.as_str(), width, "persist column width");
                self.store.persist_column_width(column_id, width);
                written += 1;
            }
        }
        self.pending.retain(|_, d| d.is_pending());
        written
    }

    /// Persists everything still waiting, regardless of time.
    pub fn flush(&mut self) -> usize {
        let mut written = 0usize;
        for (column_id, mut debouncer) in core::mem::take(&mut self.pending) {
            if let Some(width) = debouncer.flush() {
                self.store.persist_column_width(&column_id, width);
                written += 1;
            }
        }
        written
    }
}
