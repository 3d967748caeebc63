use crate::*;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use endless_list::{
    Holder, ItemSource, LayoutCapability, ListLayout, LoadMoreListener, SourceObserver, ViewKind,
    load_more_fn,
};

#[derive(Debug)]
struct Feed {
    items: Vec<u64>,
    bound: Vec<usize>,
}

impl Feed {
    fn with_len(len: usize) -> Self {
        Self {
            items: (0..len as u64).collect(),
            bound: Vec::new(),
        }
    }
}

impl ItemSource for Feed {
    type Kind = u8;
    type Holder = Option<u64>;

    fn count(&self) -> usize {
        self.items.len()
    }

    fn has_stable_ids(&self) -> bool {
        true
    }

    fn item_id(&self, index: usize) -> Option<u64> {
        self.items.get(index).copied()
    }

    fn view_kind(&self, _index: usize) -> u8 {
        0
    }

    fn create_view(&mut self, _kind: u8) -> Option<u64> {
        None
    }

    fn bind_view(&mut self, holder: &mut Option<u64>, index: usize) {
        *holder = self.items.get(index).copied();
        self.bound.push(index);
    }
}

#[derive(Debug)]
enum Layout {
    Linear(Option<usize>),
    Staggered(Vec<Option<usize>>),
    Table,
}

impl ListLayout for Layout {
    fn capability(&self) -> LayoutCapability {
        match self {
            Self::Linear(_) => LayoutCapability::SingleLane,
            Self::Staggered(_) => LayoutCapability::MultiLane,
            Self::Table => LayoutCapability::Unsupported,
        }
    }

    fn last_visible_index(&self) -> Option<usize> {
        match self {
            Self::Linear(last) => *last,
            _ => None,
        }
    }

    fn last_visible_indices(&self, emit: &mut dyn FnMut(Option<usize>)) {
        if let Self::Staggered(lanes) = self {
            for &lane in lanes {
                emit(lane);
            }
        }
    }
}

type List = EndlessList<Feed, Layout, IdleQueue, String>;

/// Counts `load_next_page` calls; `should_load` follows `allow`.
#[derive(Clone, Default)]
struct Pager {
    allow: Rc<Cell<bool>>,
    requests: Rc<Cell<usize>>,
}

impl Pager {
    fn new() -> Self {
        let pager = Self::default();
        pager.allow.set(true);
        pager
    }

    fn listener(&self) -> Option<Box<dyn LoadMoreListener>> {
        let allow = Rc::clone(&self.allow);
        let requests = Rc::clone(&self.requests);
        Some(Box::new(load_more_fn(
            move || allow.get(),
            move || requests.set(requests.get() + 1),
        )))
    }
}

fn observe(list: &mut List) -> Rc<Cell<usize>> {
    let hits = Rc::new(Cell::new(0));
    let observer: Rc<dyn SourceObserver> = {
        let hits = Rc::clone(&hits);
        Rc::new(move || hits.set(hits.get() + 1))
    };
    list.proxy_mut().unwrap().register_observer(observer);
    hits
}

fn list_with(len: usize, last_visible: usize, pager: &Pager) -> (List, IdleQueue) {
    let queue = IdleQueue::new();
    let mut list = List::new(queue.clone());
    list.set_item_source(Feed::with_len(len));
    list.set_layout(Some(Layout::Linear(Some(last_visible))))
        .unwrap();
    list.set_load_more_listener(pager.listener());
    (list, queue)
}

fn outer_count(list: &List) -> usize {
    list.proxy().unwrap().count()
}

#[test]
fn scroll_to_end_starts_loading_and_appends_row() {
    let pager = Pager::new();
    let (mut list, _queue) = list_with(10, 9, &pager);
    let hits = observe(&mut list);

    assert_eq!(outer_count(&list), 10);
    assert!(list.on_scroll().unwrap());
    assert!(list.is_refreshing());
    assert_eq!(pager.requests.get(), 1);
    assert_eq!(list.load_state().high_water_mark, 10);
    assert_eq!(outer_count(&list), 11);
    assert_eq!(hits.get(), 1);

    let proxy = list.proxy().unwrap();
    assert_eq!(proxy.view_kind(10), ViewKind::Loading);
    assert_eq!(proxy.item_id(10), None);
    assert_eq!(proxy.item_id(9), Some(9));
}

#[test]
fn count_not_multiple_of_threshold_does_not_load() {
    let pager = Pager::new();
    let (mut list, _queue) = list_with(10, 9, &pager);
    list.set_threshold(3).unwrap();

    assert!(!list.on_scroll().unwrap());
    assert!(!list.is_refreshing());
    assert_eq!(pager.requests.get(), 0);
    assert_eq!(outer_count(&list), 10);
}

#[test]
fn stop_loading_removes_row_once() {
    let pager = Pager::new();
    let (mut list, _queue) = list_with(10, 9, &pager);
    let hits = observe(&mut list);
    assert!(list.on_scroll().unwrap());
    assert_eq!(outer_count(&list), 11);

    list.stop_loading(false);
    assert_eq!(outer_count(&list), 10);
    assert_eq!(hits.get(), 2);

    list.stop_loading(false);
    assert_eq!(hits.get(), 2);
    assert!(!list.is_refreshing());
}

#[test]
fn stop_loading_is_idempotent() {
    let (mut list, _queue) = list_with(4, 0, &Pager::new());
    let hits = observe(&mut list);

    list.stop_loading(true);
    list.stop_loading(true);
    assert_eq!(hits.get(), 1);
    assert_eq!(outer_count(&list), 5);

    list.stop_loading(false);
    list.stop_loading(false);
    assert_eq!(hits.get(), 2);
}

#[test]
fn loading_row_does_not_retrigger_while_loading() {
    let pager = Pager::new();
    let (mut list, _queue) = list_with(10, 9, &pager);
    assert!(list.on_scroll().unwrap());

    // The loading row (index 10) scrolls into view.
    *list.layout_mut().unwrap() = Layout::Linear(Some(10));
    for _ in 0..3 {
        assert!(!list.on_scroll().unwrap());
    }
    assert_eq!(pager.requests.get(), 1);

    // The page arrives, loading ends, and the user reaches the new end.
    list.item_source_mut().unwrap().items.extend(10..20);
    list.stop_loading(false);
    *list.layout_mut().unwrap() = Layout::Linear(Some(19));
    assert!(list.on_scroll().unwrap());
    assert_eq!(pager.requests.get(), 2);
    assert_eq!(list.load_state().high_water_mark, 20);
}

#[test]
fn should_load_gates_the_trigger() {
    let pager = Pager::new();
    pager.allow.set(false);
    let (mut list, _queue) = list_with(10, 9, &pager);
    assert!(!list.on_scroll().unwrap());

    pager.allow.set(true);
    assert!(list.on_scroll().unwrap());
}

#[test]
fn notification_is_deferred_while_computing_layout() {
    let pager = Pager::new();
    let (mut list, queue) = list_with(10, 9, &pager);
    let hits = observe(&mut list);

    queue.computing_layout(|| {
        assert!(list.on_scroll().unwrap());
        list.stop_loading(false);
        list.stop_loading(true);
    });

    assert_eq!(hits.get(), 0);
    assert_eq!(queue.pending(), 1);
    assert_eq!(queue.run_pending(), 1);
    assert_eq!(hits.get(), 1);
    assert_eq!(queue.pending(), 0);

    // Outside a layout pass notifications are immediate again.
    list.stop_loading(false);
    assert_eq!(hits.get(), 2);
    assert_eq!(queue.pending(), 0);
}

#[test]
fn deferred_notification_can_be_queued_again_after_it_ran() {
    let (mut list, queue) = list_with(3, 0, &Pager::new());
    let hits = observe(&mut list);

    queue.set_computing_layout(true);
    list.stop_loading(true);
    queue.run_pending();
    list.stop_loading(false);
    assert_eq!(queue.pending(), 1);
    queue.set_computing_layout(false);
    queue.run_pending();
    assert_eq!(hits.get(), 2);
}

#[test]
fn deferred_notification_reaches_the_proxy_it_was_queued_for() {
    let (mut list, queue) = list_with(3, 0, &Pager::new());
    let old_hits = observe(&mut list);

    queue.computing_layout(|| list.stop_loading(true));
    list.set_item_source(Feed::with_len(5));
    let new_hits = observe(&mut list);

    assert_eq!(queue.run_pending(), 1);
    assert_eq!(old_hits.get(), 1);
    assert_eq!(new_hits.get(), 0);
}

#[test]
fn invalid_threshold_keeps_previous_value() {
    let pager = Pager::new();
    let (mut list, _queue) = list_with(12, 10, &pager);
    list.set_threshold(4).unwrap();

    assert_eq!(list.set_threshold(0), Err(Error::InvalidThreshold { value: 0 }));
    assert_eq!(list.threshold().get(), 4);

    // 12 - 10 <= 4 and 12 % 4 == 0.
    assert!(list.on_scroll().unwrap());
}

#[test]
fn new_listener_picks_up_threshold_and_mark() {
    let pager = Pager::new();
    let queue = IdleQueue::new();
    let mut list = List::new(queue)
        .with_threshold(2)
        .unwrap();
    list.set_item_source(Feed::with_len(10));
    list.set_layout(Some(Layout::Linear(Some(8)))).unwrap();

    // Nothing installed yet: scrolling is a no-op.
    assert!(!list.on_scroll().unwrap());

    list.set_load_more_listener(pager.listener());
    assert!(list.on_scroll().unwrap());
    list.stop_loading(false);

    // Replacing the listener keeps the mark, so count 10 does not fire again.
    let other = Pager::new();
    assert!(list.set_load_more_listener(other.listener()).is_some());
    assert!(!list.on_scroll().unwrap());
    assert_eq!(other.requests.get(), 0);

    list.reset_high_water_mark();
    assert!(list.on_scroll().unwrap());
    assert_eq!(other.requests.get(), 1);
}

#[test]
fn removing_listener_stops_triggering() {
    let pager = Pager::new();
    let (mut list, _queue) = list_with(10, 9, &pager);
    assert!(list.set_load_more_listener(None).is_some());
    assert!(!list.has_load_more_listener());
    assert!(!list.on_scroll().unwrap());
    assert_eq!(pager.requests.get(), 0);
}

#[test]
fn missing_collaborators_fail_fast() {
    let pager = Pager::new();
    let mut list = List::new(IdleQueue::new());
    list.set_load_more_listener(pager.listener());
    assert_eq!(list.on_scroll(), Err(Error::MissingItemSource));

    list.set_item_source(Feed::with_len(1));
    assert_eq!(list.on_scroll(), Err(Error::MissingLayout));
    assert_eq!(pager.requests.get(), 0);
}

#[test]
fn multi_lane_layout_uses_furthest_lane() {
    let pager = Pager::new();
    let (mut list, _queue) = list_with(8, 0, &pager);
    list.set_layout(Some(Layout::Staggered(vec![Some(4), Some(7), Some(2)])))
        .unwrap();
    assert!(list.on_scroll().unwrap());
}

#[test]
fn unsupported_layout_is_rejected_and_previous_kept() {
    let (mut list, _queue) = list_with(8, 3, &Pager::new());
    let err = list.set_layout(Some(Layout::Table)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedLayout { .. }));
    assert!(matches!(list.layout(), Some(Layout::Linear(Some(3)))));

    let prev = list.set_layout(None).unwrap();
    assert!(matches!(prev, Some(Layout::Linear(Some(3)))));
    assert!(list.layout().is_none());
}

#[test]
fn item_source_accessors_expose_the_callers_source() {
    let (mut list, _queue) = list_with(2, 0, &Pager::new());
    assert_eq!(list.item_source().unwrap().items, [0, 1]);

    let prev = list.set_item_source(Feed::with_len(5)).unwrap();
    assert_eq!(prev.items.len(), 2);
    assert_eq!(outer_count(&list), 5);

    let taken = list.take_item_source().unwrap();
    assert_eq!(taken.items.len(), 5);
    assert!(list.proxy().is_none());
}

#[test]
fn default_progress_view_is_a_centered_indicator() {
    let list = List::new(IdleQueue::new());
    let Some(ProgressView::Indicator(indicator)) = list.progress_view() else {
        panic!("expected the default indicator");
    };
    assert_eq!(indicator, IndeterminateIndicator::default());
    assert_eq!(indicator.height_dp, 30);
    assert_eq!(indicator.bottom_margin_dp, 10);
    assert!(indicator.centered);
}

#[test]
fn progress_color_tints_default_indicator() {
    let (mut list, _queue) = list_with(1, 0, &Pager::new());
    let teal = Color::from_rgb(0x00, 0x96, 0x88);
    list.set_progress_color(teal).unwrap();
    assert_eq!(teal, Color(0xFF00_9688));

    list.stop_loading(true);
    let proxy = list.proxy_mut().unwrap();
    let holder = proxy.create_view(ViewKind::Loading);
    let Holder::Loading(loading) = holder else {
        panic!("expected a loading holder");
    };
    let view = loading.view.unwrap();
    assert_eq!(view.as_indicator().unwrap().tint, Some(teal));
}

#[test]
fn progress_color_rejects_custom_view() {
    let (mut list, _queue) = list_with(1, 0, &Pager::new());
    list.set_custom_progress_view(String::from("dots"));
    assert_eq!(
        list.set_progress_color(Color(0xFFFF_0000)),
        Err(Error::ProgressViewMismatch)
    );
    assert_eq!(
        list.progress_view(),
        Some(ProgressView::Custom(String::from("dots")))
    );
}

#[test]
fn progress_layout_is_inflated_into_a_custom_view() {
    let (mut list, _queue) = list_with(3, 2, &Pager::new());
    let inflated = RefCell::new(Vec::new());
    let inflater = |descriptor: &str| {
        inflated.borrow_mut().push(String::from(descriptor));
        alloc::format!("<{descriptor}>")
    };
    list.set_progress_layout("row_loading", &inflater);
    assert_eq!(*inflated.borrow(), ["row_loading"]);

    list.stop_loading(true);
    let proxy = list.proxy_mut().unwrap();
    let mut holder = proxy.create_view(ViewKind::Loading);
    proxy.bind_view(&mut holder, 3);
    assert!(proxy.is_current_loading_holder(&holder));
    assert_eq!(
        holder,
        Holder::Loading(endless_list::LoadingHolder {
            id: 0,
            view: Some(ProgressView::Custom(String::from("<row_loading>"))),
        })
    );
    assert!(proxy.inner().bound.is_empty());
}

#[test]
fn load_state_snapshot() {
    let pager = Pager::new();
    let (mut list, _queue) = list_with(10, 9, &pager);
    assert_eq!(
        list.load_state(),
        endless_list::LoadState {
            loading: false,
            high_water_mark: 0,
            threshold: endless_list::Threshold::ONE,
        }
    );
    list.on_scroll().unwrap();
    let state = list.load_state();
    assert!(state.loading);
    assert_eq!(state.high_water_mark, 10);
}
