use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::Mutex;

use chrono::NaiveDate;
use proptest::prelude::*;

fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            Row::new()
                .with("a", format!("a{i}"))
                .with("b", i as i64)
        })
        .collect()
}

fn columns() -> Vec<Column> {
    alloc::vec![
        Column::text("a", "Attr1"),
        Column::new("b", "Attr2", ColumnType::Integer),
    ]
}

fn table(row_height: u32, total_rows: usize) -> VirtualTable {
    VirtualTable::new(TableOptions::new(row_height), columns(), rows(total_rows)).unwrap()
}

fn mounted(row_height: u32, total_rows: usize, viewport_height: u32) -> VirtualTable {
    let mut t = table(row_height, total_rows);
    t.mount(viewport_height, |_| {});
    t
}

fn assigned(t: &VirtualTable) -> Vec<usize> {
    let mut out = Vec::new();
    t.assigned_rows(&mut out);
    out
}

fn slot_ids(t: &VirtualTable) -> Vec<SlotId> {
    let mut ids: Vec<SlotId> = t.slots().iter().map(|s| s.id).collect();
    ids.sort_unstable();
    ids
}

/// Checks the window invariant plus ring consistency of the pool order.
fn assert_window(t: &VirtualTable) {
    let hidden = t.hidden_rows_top();
    let visible = t.visible_rows();
    let total = t.total_rows();

    assert_eq!(t.slots().len(), visible, "pool size");
    assert!(t.rows_offset() < visible);
    assert_eq!(t.rows_offset(), hidden % visible);

    let expected: Vec<usize> = (hidden..hidden + visible).filter(|&i| i < total).collect();
    assert_eq!(assigned(t), expected);

    for (i, slot) in t.slots().iter().enumerate() {
        let p = window::slot_placement(hidden, visible, t.rows_offset(), i, t.row_height());
        assert_eq!(slot.index, p.index, "slot {i} index");
        assert_eq!(slot.offset, p.offset, "slot {i} offset");
        assert_eq!(slot.row, window::row_for(slot.index, total));
    }
}

#[test]
fn visible_count_adds_one_overscan_row() {
    assert_eq!(window::visible_count(160, 16), 11);
    assert_eq!(window::visible_count(170, 16), 11);
    assert_eq!(window::visible_count(15, 16), 1);
    // Not measured yet.
    assert_eq!(window::visible_count(0, 32), 1);
}

#[test]
fn window_start_floors() {
    assert_eq!(window::window_start(0, 16), 0);
    assert_eq!(window::window_start(15, 16), 0);
    assert_eq!(window::window_start(16, 16), 1);
    assert_eq!(window::window_start(32, 16), 2);
}

#[test]
fn slot_placement_rotates_with_phase() {
    // hidden=2, visible=11 => phase 2: positions 0 and 1 wrap to the end of the window.
    let p0 = window::slot_placement(2, 11, 2, 0, 16);
    assert_eq!(p0.index, 11);
    assert_eq!(p0.offset, 176);
    let p2 = window::slot_placement(2, 11, 2, 2, 16);
    assert_eq!(p2.index, 2);
    assert_eq!(p2.offset, 32);

    for i in 0..11 {
        let p = window::slot_placement(2, 11, 2, i, 16);
        assert_eq!(window::ring_position(p.index, 2, 11, 2), Some(i));
    }
    assert_eq!(window::ring_position(1, 2, 11, 2), None);
    assert_eq!(window::ring_position(13, 2, 11, 2), None);
}

#[test]
fn out_of_range_rows_are_empty() {
    assert_eq!(window::row_for(98, 99), SlotRow::Row(98));
    assert_eq!(window::row_for(99, 99), SlotRow::Empty);
}

#[test]
fn mount_creates_initial_window() {
    let mut t = table(16, 99);
    let mut created = Vec::new();
    t.mount(160, |e| {
        if let SlotEvent::Created(slot) = e {
            created.push(slot);
        }
    });

    assert_eq!(t.visible_rows(), 11);
    assert_eq!(created.len(), 11);
    assert_eq!(assigned(&t), (0..11).collect::<Vec<_>>());
    assert_eq!(created[3].offset, 48);
    assert_eq!(t.spacer_height(), 99 * 16);
    assert_window(&t);
}

#[test]
fn mount_on_unmeasured_viewport_keeps_one_slot() {
    let t = mounted(32, 10, 0);
    assert_eq!(t.visible_rows(), 1);
    assert_eq!(assigned(&t), alloc::vec![0]);
}

#[test]
fn scroll_moves_window_without_recreating_slots() {
    let mut t = mounted(16, 99, 160);
    let ids = slot_ids(&t);

    let mut events = Vec::new();
    t.on_scroll(32, |e| events.push(e));

    assert_eq!(t.hidden_rows_top(), 2);
    assert_eq!(t.rows_offset(), 2);
    assert_eq!(t.slots().len(), 11);
    assert_eq!(assigned(&t), (2..13).collect::<Vec<_>>());
    assert_eq!(slot_ids(&t), ids);

    // Only the two slots that wrapped around were re-rendered.
    assert_eq!(events.len(), 2);
    assert!(
        events
            .iter()
            .all(|e| matches!(e, SlotEvent::Reassigned(s) if s.index == 11 || s.index == 12))
    );
    assert_window(&t);
}

#[test]
fn scrolling_one_row_reassigns_exactly_one_slot() {
    let mut t = mounted(10, 1_000, 95);
    for step in 1..40u64 {
        let mut n = 0;
        t.on_scroll(step * 10, |_| n += 1);
        assert_eq!(n, 1, "step {step}");
        assert_window(&t);
    }
}

#[test]
fn sub_row_scroll_reassigns_nothing() {
    let mut t = mounted(10, 100, 95);
    let mut n = 0;
    t.on_scroll(7, |_| n += 1);
    assert_eq!(n, 0);
    assert_eq!(t.hidden_rows_top(), 0);
}

#[test]
fn scroll_is_idempotent() {
    let mut t = mounted(16, 99, 160);
    t.on_scroll(300, |_| {});
    let first: Vec<Slot> = t.slots().to_vec();

    let mut n = 0;
    t.on_scroll(300, |_| n += 1);
    assert_eq!(n, 0);
    assert_eq!(t.slots(), &first[..]);
}

#[test]
fn scroll_is_clamped_to_last_full_window() {
    let mut t = mounted(10, 20, 50);
    t.on_scroll(180, |_| {});
    assert_eq!(t.hidden_rows_top(), 14);
    assert_eq!(assigned(&t), (14..20).collect::<Vec<_>>());
    assert_window(&t);
}

#[test]
fn unclamped_scroll_renders_trailing_empty_slots() {
    let mut t = VirtualTable::new(
        TableOptions::new(10).with_clamp_to_rows(false),
        columns(),
        rows(20),
    )
    .unwrap();
    t.mount(50, |_| {});
    t.on_scroll(180, |_| {});

    assert_eq!(t.hidden_rows_top(), 18);
    assert_eq!(assigned(&t), alloc::vec![18, 19]);
    let empty = t.slots().iter().filter(|s| s.row.is_empty()).count();
    assert_eq!(empty, 4);
    assert_window(&t);
}

#[test]
fn grow_adds_rows_below_window() {
    let mut t = mounted(10, 100, 90);
    let mut created = Vec::new();
    t.on_viewport_resize(120, |e| {
        if let SlotEvent::Created(s) = e {
            created.push(s.index);
        }
    });

    assert_eq!(t.visible_rows(), 13);
    assert_eq!(created, alloc::vec![10, 11, 12]);
    assert_eq!(t.hidden_rows_top(), 0);
    assert_window(&t);
}

#[test]
fn grow_at_bottom_reveals_rows_above() {
    let mut t = mounted(10, 100, 90);
    t.on_scroll(910, |_| {});
    assert!(t.is_scrolled_to_bottom());
    let hidden_before = t.hidden_rows_top();
    assert_eq!(hidden_before, 90);

    let mut created = Vec::new();
    t.on_viewport_resize(120, |e| {
        if let SlotEvent::Created(s) = e {
            created.push(s.index);
        }
    });

    assert_eq!(created, alloc::vec![89, 88, 87]);
    assert!(created.iter().all(|&i| i < hidden_before));
    assert!(t.slots().iter().all(|s| s.index < 100));
    assert_eq!(t.hidden_rows_top(), 87);
    assert_eq!(assigned(&t), (87..100).collect::<Vec<_>>());
    assert_window(&t);
}

#[test]
fn grow_keeps_existing_slots_untouched() {
    let mut t = mounted(10, 100, 90);
    t.on_scroll(455, |_| {});
    let before: Vec<Slot> = t.slots().to_vec();

    let mut reassigned = 0;
    t.on_viewport_resize(200, |e| {
        if matches!(e, SlotEvent::Reassigned(_)) {
            reassigned += 1;
        }
    });
    assert_eq!(reassigned, 0);
    for slot in &before {
        assert_eq!(t.pool().find(slot.id), Some(slot));
    }
    assert_window(&t);
}

#[test]
fn shrink_removes_bottom_slots_first() {
    let mut t = mounted(10, 100, 120);
    t.on_scroll(200, |_| {});
    assert_eq!(assigned(&t), (20..33).collect::<Vec<_>>());

    let mut removed = Vec::new();
    t.on_viewport_resize(50, |e| {
        if let SlotEvent::Removed(id) = e {
            removed.push(id);
        }
    });

    assert_eq!(t.visible_rows(), 6);
    assert_eq!(removed.len(), 7);
    assert_eq!(assigned(&t), (20..26).collect::<Vec<_>>());
    assert_eq!(t.rows_offset(), 20 % 6);
    assert_window(&t);
}

#[test]
fn resize_round_trip_restores_visible_rows() {
    let mut t = mounted(10, 100, 120);
    t.on_scroll(200, |_| {});
    let original = t.visible_rows();

    t.on_viewport_resize(30, |_| {});
    assert_eq!(t.visible_rows(), 4);
    assert_window(&t);

    t.on_viewport_resize(120, |_| {});
    assert_eq!(t.visible_rows(), original);
    assert_window(&t);
}

#[test]
fn resize_to_same_row_count_is_noop() {
    let mut t = mounted(10, 100, 90);
    let mut n = 0;
    t.on_viewport_resize(99, |_| n += 1);
    assert_eq!(n, 0);
    assert_eq!(t.visible_rows(), 10);
    assert_eq!(t.viewport_height(), 99);
}

#[test]
fn plan_prefers_earlier_rows_over_rows_past_the_end() {
    let plan = window::plan_resize(5, 4, 8, 10, false);
    assert_eq!(plan, PoolPlan::Grow { top: 3, end: 1 });
    assert_eq!(plan.next_hidden_rows_top(5), 2);

    let mut added = Vec::new();
    plan.for_each_added_index(5, 4, |i| added.push(i));
    assert_eq!(added, alloc::vec![4, 3, 2, 9]);
}

#[test]
fn plan_at_bottom_spills_below_when_top_is_exhausted() {
    let plan = window::plan_resize(2, 5, 9, 7, true);
    assert_eq!(plan, PoolPlan::Grow { top: 2, end: 2 });
}

#[test]
fn plan_at_top_of_short_list_adds_empty_rows_below() {
    let plan = window::plan_resize(0, 3, 6, 4, false);
    assert_eq!(plan, PoolPlan::Grow { top: 0, end: 3 });
}

#[test]
fn plan_shrink_drops_highest_positions() {
    let plan = window::plan_resize(20, 13, 6, 100, false);
    assert_eq!(
        plan,
        PoolPlan::Shrink {
            remove: VirtualRange {
                start_index: 26,
                end_index: 33,
            }
        }
    );
}

#[test]
fn update_rows_resets_window() {
    let mut t = mounted(16, 99, 160);
    t.on_scroll(320, |_| {});
    assert_eq!(t.hidden_rows_top(), 20);
    let old_ids = slot_ids(&t);

    let mut removed = 0;
    let mut created = 0;
    t.update_rows(rows(20), |e| match e {
        SlotEvent::Removed(_) => removed += 1,
        SlotEvent::Created(_) => created += 1,
        SlotEvent::Reassigned(_) => panic!("rebuild must not reassign"),
    });

    assert_eq!(removed, 11);
    assert_eq!(created, 11);
    assert_eq!(t.total_rows(), 20);
    assert_eq!(t.hidden_rows_top(), 0);
    assert_eq!(t.scroll_offset(), 0);
    assert_eq!(t.spacer_height(), 20 * 16);
    assert_eq!(assigned(&t), (0..11).collect::<Vec<_>>());
    assert!(slot_ids(&t).iter().all(|id| !old_ids.contains(id)));
    assert_window(&t);
}

#[test]
fn update_rows_keeps_resized_slot_count() {
    let mut t = mounted(10, 100, 90);
    t.on_viewport_resize(40, |_| {});
    t.update_rows(rows(3), |_| {});
    assert_eq!(t.visible_rows(), 5);
    assert_eq!(assigned(&t), alloc::vec![0, 1, 2]);
    assert_window(&t);
}

#[test]
fn dispose_releases_every_slot() {
    let mut t = mounted(16, 99, 160);
    let mut removed = 0;
    t.dispose(|e| {
        assert!(matches!(e, SlotEvent::Removed(_)));
        removed += 1;
    });
    assert_eq!(removed, 11);
    assert!(t.pool().is_empty());
    assert!(!t.is_mounted());

    // Signals after dispose only record geometry.
    let mut n = 0;
    t.on_scroll(64, |_| n += 1);
    t.on_viewport_resize(320, |_| n += 1);
    assert_eq!(n, 0);
}

#[test]
fn mount_with_frame_restores_scroll() {
    let mut t = mounted(16, 99, 160);
    t.on_scroll(480, |_| {});
    let frame = t.frame_state();

    let mut restored = table(16, 99);
    restored.mount_with_frame(frame, |_| {});
    assert_eq!(restored.hidden_rows_top(), 30);
    assert_eq!(assigned(&restored), assigned(&t));
    assert_window(&restored);
}

#[test]
fn lookup_cell_returns_typed_values() {
    let t = table(16, 5);
    assert_eq!(t.lookup_cell(3, "a"), Some(&Value::Text("a3".into())));
    assert_eq!(t.lookup_cell(3, "b"), Some(&Value::Integer(3)));
    assert_eq!(t.lookup_cell(3, "zzz"), None);
    assert_eq!(t.lookup_cell(5, "a"), None);
}

#[test]
fn value_display_follows_column_type() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert_eq!(format!("{}", Value::from(date)), "2024-03-01");
    assert_eq!(format!("{}", Value::from(42i64)), "42");
    assert_eq!(format!("{}", Value::from("hi")), "hi");
    assert_eq!(Value::from(date).kind(), ColumnType::Date);
}

#[test]
fn debug_tint_cycles_through_six_colours() {
    let t = VirtualTable::new(TableOptions::new(16).with_debug(true), columns(), rows(1)).unwrap();
    let tint = t.debug_tint(0).unwrap();
    assert_eq!((tint.red, tint.green, tint.blue), (0, 0, 255));
    assert_eq!(format!("{}", DebugTint::for_index(3)), "rgba(255, 255, 0, 0.3)");
    assert_eq!(DebugTint::for_index(1), DebugTint::for_index(7));
    assert_ne!(DebugTint::for_index(1), DebugTint::for_index(2));

    assert_eq!(table(16, 1).debug_tint(0), None);
}

#[test]
fn config_rejects_resizable_column_without_callback() {
    let cols = alloc::vec![Column::text("name", "Name").with_resizable(true)];
    let err = VirtualTable::new(TableOptions::default(), cols, rows(1)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingColumnWidthCallback {
            column: "name".into()
        }
    );
}

#[test]
fn config_rejects_zero_row_height_and_bad_columns() {
    assert_eq!(
        VirtualTable::new(TableOptions::new(0), columns(), rows(1)).unwrap_err(),
        ConfigError::ZeroRowHeight
    );

    let dup = alloc::vec![Column::text("a", "A"), Column::text("a", "B")];
    assert_eq!(
        VirtualTable::new(TableOptions::default(), dup, rows(1)).unwrap_err(),
        ConfigError::DuplicateColumnId { column: "a".into() }
    );

    let bounds = alloc::vec![Column::text("a", "A").with_width_bounds(Some(90), Some(60))];
    assert_eq!(
        VirtualTable::new(TableOptions::default(), bounds, rows(1)).unwrap_err(),
        ConfigError::InvalidWidthBounds {
            column: "a".into(),
            min: 90,
            max: 60
        }
    );
}

fn resizable_table(calls: Arc<Mutex<Vec<(String, u32)>>>) -> VirtualTable {
    let cols = alloc::vec![
        Column::text("name", "Name")
            .with_resizable(true)
            .with_width(150),
        Column::text("note", "Note")
            .with_resizable(true)
            .with_width(100)
            .with_width_bounds(None, Some(120)),
        Column::text("fixed", "Fixed"),
    ];
    let opts = TableOptions::new(16).with_on_change_column_width(Some(
        move |column_id: &str, width: u32| {
            calls.lock().unwrap().push((column_id.into(), width));
        },
    ));
    VirtualTable::new(opts, cols, rows(10)).unwrap()
}

#[test]
fn column_drag_broadcasts_and_persists_width() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut t = resizable_table(Arc::clone(&calls));

    assert!(t.begin_column_resize("name", 500));
    assert_eq!(t.column_drag().unwrap().anchor_width, 150);

    let b = t.drag_column_resize(530).unwrap();
    assert_eq!(
        b,
        WidthBroadcast {
            column_id: "name".into(),
            width: 180
        }
    );
    assert_eq!(t.column_width("name"), Some(180));
    assert_eq!(t.model().column("name").unwrap().width, Some(180));
    assert_eq!(*calls.lock().unwrap(), alloc::vec![(String::from("name"), 180)]);

    let last = t.end_column_resize().unwrap();
    assert_eq!(last.width, 180);
    assert!(!t.is_resizing_column());
    assert_eq!(t.drag_column_resize(600), None);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn column_drag_is_relative_to_the_anchor() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut t = resizable_table(calls);

    t.begin_column_resize("name", 100);
    t.drag_column_resize(150);
    t.drag_column_resize(120);
    assert_eq!(t.column_width("name"), Some(170));

    // A second drag anchors on the width the first one left behind.
    t.end_column_resize();
    t.begin_column_resize("name", 0);
    assert_eq!(t.column_drag().unwrap().anchor_width, 170);
}

#[test]
fn column_drag_respects_width_bounds() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut t = resizable_table(calls);

    t.begin_column_resize("name", 500);
    assert_eq!(t.drag_column_resize(0).unwrap().width, DEFAULT_MIN_COLUMN_WIDTH);
    t.end_column_resize();

    t.begin_column_resize("note", 0);
    assert_eq!(t.drag_column_resize(500).unwrap().width, 120);
}

#[test]
fn column_drag_ignores_unknown_and_fixed_columns() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut t = resizable_table(Arc::clone(&calls));

    assert!(!t.begin_column_resize("fixed", 0));
    assert!(!t.begin_column_resize("missing", 0));
    assert_eq!(t.drag_column_resize(50), None);
    assert_eq!(t.end_column_resize(), None);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn column_drag_does_not_touch_the_window() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut t = resizable_table(calls);
    t.mount(64, |_| {});

    t.begin_column_resize("name", 0);
    t.on_viewport_resize(160, |_| {});
    t.on_scroll(16, |_| {});
    assert!(t.is_resizing_column());
    assert_eq!(t.drag_column_resize(10).unwrap().width, 160);
    assert_window(&t);
}

#[test]
fn effective_width_uses_defaults() {
    let c = Column::text("x", "X");
    assert_eq!(c.effective_width(DEFAULT_COLUMN_WIDTH, DEFAULT_MIN_COLUMN_WIDTH), 150);
    let narrow = Column::text("x", "X").with_width(10);
    assert_eq!(narrow.effective_width(DEFAULT_COLUMN_WIDTH, DEFAULT_MIN_COLUMN_WIDTH), 40);
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Scroll(u64),
    Resize(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..20_000).prop_map(Op::Scroll),
        (0u32..800).prop_map(Op::Resize),
    ]
}

proptest! {
    #[test]
    fn prop_window_start_is_monotonic(row_height in 1u32..64, a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(window::window_start(lo, row_height) <= window::window_start(hi, row_height));
        prop_assert_eq!(window::window_start(lo, row_height), (lo / row_height as u64) as usize);
    }

    #[test]
    fn prop_unclamped_scroll_tracks_offset(row_height in 1u32..64, offset in 0u64..100_000) {
        let mut t = VirtualTable::new(
            TableOptions::new(row_height).with_clamp_to_rows(false),
            columns(),
            rows(50),
        )
        .unwrap();
        t.mount(300, |_| {});
        t.on_scroll(offset, |_| {});
        prop_assert_eq!(t.hidden_rows_top(), (offset / row_height as u64) as usize);
    }

    #[test]
    fn prop_window_invariant_holds(
        row_height in 1u32..40,
        total in 0usize..300,
        height in 0u32..600,
        clamp in any::<bool>(),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut t = VirtualTable::new(
            TableOptions::new(row_height).with_clamp_to_rows(clamp),
            columns(),
            rows(total),
        )
        .unwrap();
        t.mount(height, |_| {});
        assert_window(&t);
        for op in ops {
            match op {
                Op::Scroll(offset) => t.on_scroll(offset, |_| {}),
                Op::Resize(h) => t.on_viewport_resize(h, |_| {}),
            }
            assert_window(&t);
            if clamp {
                prop_assert!(t.slots().iter().all(|s| s.index < total.max(t.visible_rows())));
            }
        }
    }

    #[test]
    fn prop_scroll_twice_equals_once(
        row_height in 1u32..40,
        total in 0usize..300,
        height in 0u32..600,
        offset in 0u64..20_000,
    ) {
        let mut t = table(row_height, total);
        t.mount(height, |_| {});
        t.on_scroll(offset, |_| {});
        let once: Vec<Slot> = t.slots().to_vec();
        let mut events = 0;
        t.on_scroll(offset, |_| events += 1);
        prop_assert_eq!(events, 0);
        prop_assert_eq!(t.slots(), &once[..]);
    }

    #[test]
    fn prop_resize_round_trip(
        row_height in 1u32..40,
        total in 0usize..300,
        height in 0u32..600,
        smaller in 0u32..600,
        offset in 0u64..20_000,
    ) {
        let mut t = table(row_height, total);
        t.mount(height, |_| {});
        t.on_scroll(offset, |_| {});
        let original = t.visible_rows();
        t.on_viewport_resize(smaller.min(height), |_| {});
        t.on_viewport_resize(height, |_| {});
        prop_assert_eq!(t.visible_rows(), original);
        assert_window(&t);
    }
}
