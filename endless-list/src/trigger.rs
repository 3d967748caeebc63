use core::fmt;

use crate::Threshold;

/// The caller's side of pagination.
///
/// `should_load` gates eligibility (e.g. "the server has more pages"); `load_next_page` starts
/// the caller's own (usually asynchronous) fetch. The caller ends the load later through the
/// controller's `stop_loading(false)`.
pub trait LoadMoreListener {
    fn should_load(&mut self) -> bool;
    fn load_next_page(&mut self);
}

impl<T: LoadMoreListener + ?Sized> LoadMoreListener for alloc::boxed::Box<T> {
    fn should_load(&mut self) -> bool {
        (**self).should_load()
    }

    fn load_next_page(&mut self) {
        (**self).load_next_page();
    }
}

/// A [`LoadMoreListener`] built from two closures. See [`load_more_fn`].
pub struct LoadMoreFn<S, L> {
    should_load: S,
    load_next_page: L,
}

impl<S, L> LoadMoreListener for LoadMoreFn<S, L>
where
    S: FnMut() -> bool,
    L: FnMut(),
{
    fn should_load(&mut self) -> bool {
        (self.should_load)()
    }

    fn load_next_page(&mut self) {
        (self.load_next_page)();
    }
}

impl<S, L> fmt::Debug for LoadMoreFn<S, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoadMoreFn(..)")
    }
}

/// Builds a listener from a `should_load` predicate and a `load_next_page` action.
pub fn load_more_fn<S, L>(should_load: S, load_next_page: L) -> LoadMoreFn<S, L>
where
    S: FnMut() -> bool,
    L: FnMut(),
{
    LoadMoreFn {
        should_load,
        load_next_page,
    }
}

/// Decides, on every scroll update, whether the next page should be requested.
///
/// A load fires when all of the following hold:
/// - the listener's `should_load()` returns `true`
/// - `item_count - furthest_visible <= threshold`
/// - `item_count` differs from the count at the previous trigger (the high-water mark)
/// - `item_count` is a multiple of the threshold
///
/// The last rule means that for `threshold > 1` most counts never fire. It is kept as is; hosts
/// relying on larger thresholds should page in multiples of the threshold.
pub struct ScrollTrigger<L> {
    listener: L,
    threshold: Threshold,
    high_water_mark: usize,
}

impl<L: LoadMoreListener> ScrollTrigger<L> {
    pub fn new(listener: L) -> Self {
        Self::with_threshold(listener, Threshold::default())
    }

    pub fn with_threshold(listener: L, threshold: Threshold) -> Self {
        Self {
            listener,
            threshold,
            high_water_mark: 0,
        }
    }

    /// Starts from a known high-water mark instead of 0, e.g. when replacing a listener.
    pub fn with_high_water_mark(mut self, high_water_mark: usize) -> Self {
        self.high_water_mark = high_water_mark;
        self
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Applies a new threshold; it takes effect on the next scroll update.
    pub fn set_threshold(&mut self, threshold: Threshold) {
        etrace!(threshold = threshold.get(), "ScrollTrigger::set_threshold");
        self.threshold = threshold;
    }

    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    /// Forgets the count of the last trigger so the same count may fire again.
    pub fn reset(&mut self) {
        self.high_water_mark = 0;
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Evaluates one scroll update.
    ///
    /// `furthest_visible` is `None` when nothing is laid out, which counts as one position
    /// before the first item. On firing, `begin_loading` runs first, then the listener's
    /// `load_next_page`, and finally the high-water mark moves to `item_count`.
    ///
    /// Returns `true` when a load was started.
    pub fn on_scroll(
        &mut self,
        furthest_visible: Option<usize>,
        item_count: usize,
        begin_loading: impl FnOnce(),
    ) -> bool {
        if !self.should_fire(furthest_visible, item_count) {
            return false;
        }

        edebug!(
            item_count,
            furthest_visible = ?furthest_visible,
            threshold = self.threshold.get(),
            "ScrollTrigger: load next page"
        );
        begin_loading();
        self.listener.load_next_page();
        self.high_water_mark = item_count;
        true
    }

    fn should_fire(&mut self, furthest_visible: Option<usize>, item_count: usize) -> bool {
        let threshold = self.threshold.get();
        let remaining = match furthest_visible {
            Some(index) => item_count.saturating_sub(index),
            None => item_count.saturating_add(1),
        };

        self.listener.should_load()
            && remaining <= threshold
            && item_count != self.high_water_mark
            && item_count % threshold == 0
    }
}

impl<L> fmt::Debug for ScrollTrigger<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTrigger")
            .field("threshold", &self.threshold)
            .field("high_water_mark", &self.high_water_mark)
            .finish_non_exhaustive()
    }
}
