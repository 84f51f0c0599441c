// Example: drive a TableController against a printing host, including a column drag whose
// width is persisted once the drag goes quiet.
use virtable::{Column, Row, SlotId, TableOptions};
use virtable_adapter::{HostSurface, RenderedRow, TableController, TextRowRenderer};

struct PrintHost {
    height: u32,
}

fn summary(content: &RenderedRow) -> String {
    if content.is_empty() {
        return "<empty>".into();
    }
    content
        .cells
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

impl HostSurface for PrintHost {
    type Content = RenderedRow;

    fn measure_viewport_height(&self) -> u32 {
        self.height
    }

    fn set_spacer_height(&mut self, height: u64) {
        println!("  spacer {height}");
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        println!("  scroll {offset}");
    }

    fn create_slot(&mut self, slot: SlotId, offset: u64, content: RenderedRow) {
        println!("  + {slot:?} y={offset} {}", summary(&content));
    }

    fn update_slot(&mut self, slot: SlotId, offset: u64, content: RenderedRow) {
        println!("  ~ {slot:?} y={offset} {}", summary(&content));
    }

    fn remove_slot(&mut self, slot: SlotId) {
        println!("  - {slot:?}");
    }

    fn set_column_width(&mut self, column_id: &str, width: u32) {
        println!("  width {column_id}={width}");
    }

    fn release(&mut self) {
        println!("  released");
    }
}

fn main() {
    let columns = vec![
        Column::text("name", "Name").with_resizable(true),
        Column::text("city", "City"),
    ];
    let rows: Vec<Row> = (0..200)
        .map(|i| {
            Row::new()
                .with("name", format!("name{i}"))
                .with("city", format!("city{i}"))
        })
        .collect();

    let store = |column_id: &str, width: u32| println!("  persisted {column_id}={width}");
    let mut c = TableController::new(
        TableOptions::new(20),
        columns,
        rows,
        TextRowRenderer,
        store,
    )
    .expect("valid configuration");

    println!("mount");
    c.mount(PrintHost { height: 100 }).expect("not mounted yet");

    println!("scroll to 45");
    c.on_scroll(45).expect("mounted");

    println!("grow viewport to 140");
    if let Some(host) = c.host_mut() {
        host.height = 140;
    }
    c.on_resize().expect("mounted");

    println!("drag name resizer");
    c.pointer_down("name", 300).expect("mounted");
    for (now_ms, x) in [(0u64, 310), (16, 325), (32, 340)] {
        c.pointer_move(x, now_ms).expect("mounted");
        c.tick(now_ms);
    }
    c.pointer_up();
    for now_ms in [100u64, 200, 300] {
        let n = c.tick(now_ms);
        println!("tick {now_ms}: persisted {n}");
    }

    println!("dispose");
    c.dispose();
}
