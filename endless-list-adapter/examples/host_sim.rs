use std::cell::Cell;
use std::rc::Rc;

use endless_list::{ItemSource, LayoutCapability, ListLayout, SourceObserver, load_more_fn};
use endless_list_adapter::{Color, EndlessList, IdleQueue};

struct Messages(Vec<String>);

impl ItemSource for Messages {
    type Kind = ();
    type Holder = String;

    fn count(&self) -> usize {
        self.0.len()
    }

    fn view_kind(&self, _index: usize) {}

    fn create_view(&mut self, _kind: ()) -> String {
        String::new()
    }

    fn bind_view(&mut self, holder: &mut String, index: usize) {
        holder.clone_from(&self.0[index]);
    }
}

struct Column {
    last_visible: Option<usize>,
}

impl ListLayout for Column {
    fn capability(&self) -> LayoutCapability {
        LayoutCapability::SingleLane
    }

    fn last_visible_index(&self) -> Option<usize> {
        self.last_visible
    }
}

fn page(start: usize) -> impl Iterator<Item = String> {
    (start..start + 10).map(|i| format!("message #{i}"))
}

fn main() {
    // Example: a host loop driving EndlessList without a UI toolkit.
    //
    // A real adapter would:
    // - render from `list.proxy()` instead of its own source
    // - call `on_scroll()` after each scroll, inside or outside its layout pass
    // - drain its idle queue after each frame
    let queue = IdleQueue::new();
    let mut list: EndlessList<Messages, Column, IdleQueue> = EndlessList::new(queue.clone());
    list.set_item_source(Messages(page(0).collect()));
    list.set_layout(Some(Column { last_visible: Some(0) }))
        .expect("single lane");
    list.set_progress_color(Color::from_rgb(0x33, 0x66, 0x99))
        .expect("default indicator");

    let requested = Rc::new(Cell::new(false));
    {
        let requested = Rc::clone(&requested);
        list.set_load_more_listener(Some(Box::new(load_more_fn(
            || true,
            move || requested.set(true),
        ))));
    }

    let renders: Rc<dyn SourceObserver> = Rc::new(|| println!("  -> re-render"));
    if let Some(proxy) = list.proxy_mut() {
        proxy.register_observer(renders);
    }

    for frame in 0..40 {
        let last = list.layout().and_then(|c| c.last_visible).unwrap_or(0);
        if let Some(column) = list.layout_mut() {
            column.last_visible = Some(last + 1);
        }

        // The scroll callback arrives while the host is laying out.
        let fired = queue.computing_layout(|| list.on_scroll().expect("attached"));
        if fired {
            println!("frame {frame}: loading, rows={}", list.proxy().map_or(0, |p| p.count()));
        }
        queue.run_pending();

        if requested.replace(false) {
            let start = list.item_source().map_or(0, |s| s.0.len());
            if let Some(source) = list.item_source_mut() {
                source.0.extend(page(start));
            }
            list.stop_loading(false);
            println!("frame {frame}: page loaded, state={:?}", list.load_state());
        }
    }
}
