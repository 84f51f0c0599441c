// Example: mount, scroll and resize a 10k-row table, printing the pool mutations.
use virtable::{Column, Row, SlotEvent, TableOptions, VirtualTable};

fn print_event(e: SlotEvent) {
    match e {
        SlotEvent::Created(s) => println!("  + {:?} row={:?} y={}", s.id, s.row, s.offset),
        SlotEvent::Reassigned(s) => println!("  ~ {:?} row={:?} y={}", s.id, s.row, s.offset),
        SlotEvent::Removed(id) => println!("  - {id:?}"),
    }
}

fn main() {
    let columns = vec![
        Column::text("a", "Attr1"),
        Column::text("b", "Attr2"),
        Column::text("c", "Attr3"),
    ];
    let rows = (0..10_000)
        .map(|i| {
            Row::new()
                .with("a", format!("a{i}"))
                .with("b", format!("b{i}"))
                .with("c", format!("c{i}"))
        })
        .collect();

    let mut t = VirtualTable::new(TableOptions::new(16).with_debug(true), columns, rows)
        .expect("valid configuration");

    println!("mount (viewport=160)");
    t.mount(160, print_event);
    println!("spacer_height={}", t.spacer_height());

    println!("scroll to 40");
    t.on_scroll(40, print_event);
    println!("visible_range={:?}", t.visible_range());

    println!("resize to 96");
    t.on_viewport_resize(96, print_event);
    println!(
        "visible_rows={} hidden_rows_top={} rows_offset={}",
        t.visible_rows(),
        t.hidden_rows_top(),
        t.rows_offset()
    );

    if let Some(tint) = t.debug_tint(t.hidden_rows_top()) {
        println!("first row tint={tint}");
    }
}
