// Example: the trigger policy on its own, fed by a single-lane layout.
use endless_list::{
    LayoutCapability, LayoutProbe, ListLayout, ScrollTrigger, Threshold, load_more_fn,
};

struct Viewport {
    last_visible: Option<usize>,
}

impl ListLayout for Viewport {
    fn capability(&self) -> LayoutCapability {
        LayoutCapability::SingleLane
    }

    fn last_visible_index(&self) -> Option<usize> {
        self.last_visible
    }
}

fn main() {
    let mut item_count = 20usize;
    let mut probe = LayoutProbe::wrap(Viewport { last_visible: None }).expect("single lane");
    let mut trigger = ScrollTrigger::with_threshold(
        load_more_fn(|| true, || println!("load_next_page")),
        Threshold::new(5).expect("non-zero"),
    );

    for last in [3, 9, 14, 15, 16, 19] {
        probe.layout_mut().last_visible = Some(last);
        let fired = trigger.on_scroll(probe.furthest_visible_index(), item_count, || {
            println!("  loading row shown")
        });
        println!(
            "last_visible={last} count={item_count} fired={fired} hwm={}",
            trigger.high_water_mark()
        );
    }

    // A page of 5 arrives: 25 is a multiple of the threshold and above the mark.
    item_count += 5;
    probe.layout_mut().last_visible = Some(22);
    let fired = trigger.on_scroll(probe.furthest_visible_index(), item_count, || {});
    println!("after page: count={item_count} fired={fired}");
}
