use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use endless_list::{
    Error, ItemSource, ItemSourceProxy, LayoutProbe, ListLayout, LoadMoreListener, LoadState,
    LoadingRow, Observers, ScrollTrigger, Threshold,
};

use crate::{Color, ListHost, ProgressView, ViewInflater};

/// The proxy type an [`EndlessList`] hands to the rendering layer.
pub type EndlessProxy<S, V> = ItemSourceProxy<S, ProgressView<V>>;

/// A framework-neutral controller that adds infinite scroll to a host list widget.
///
/// This type does not hold any UI objects beyond what the host hands it. Adapters drive it by:
/// - intercepting their item-source and layout setters (`set_item_source` / `set_layout`) and
///   rendering from [`EndlessList::proxy`] instead of the caller's source
/// - calling `on_scroll` whenever the list scrolls
///
/// The caller installs a [`LoadMoreListener`] and ends each load with `stop_loading(false)`.
/// While a load is outstanding the proxy reports one extra trailing item: the loading row.
pub struct EndlessList<S, L, H, V = ()> {
    host: H,
    source: Option<EndlessProxy<S, V>>,
    layout: Option<LayoutProbe<L>>,
    trigger: Option<ScrollTrigger<Box<dyn LoadMoreListener>>>,
    threshold: Threshold,
    high_water_mark: usize,
    row: LoadingRow<ProgressView<V>>,
    notify_pending: Rc<Cell<bool>>,
}

impl<S, L, H, V> EndlessList<S, L, H, V>
where
    S: ItemSource,
    L: ListLayout,
    H: ListHost,
{
    /// Creates a controller with the default threshold (1) and the default indicator.
    pub fn new(host: H) -> Self {
        Self {
            host,
            source: None,
            layout: None,
            trigger: None,
            threshold: Threshold::default(),
            high_water_mark: 0,
            row: LoadingRow::new(Some(ProgressView::default())),
            notify_pending: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Result<Self, Error> {
        self.set_threshold(threshold)?;
        Ok(self)
    }

    pub fn with_progress_view(self, view: ProgressView<V>) -> Self {
        self.row.set_view(Some(view));
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Wraps `source` in a fresh proxy and returns the previously attached source, if any.
    ///
    /// The host is responsible for moving its observers over to the new [`EndlessList::proxy`].
    /// A notification deferred before this call is still delivered to the previous proxy's
    /// observers when the host's idle point runs.
    pub fn set_item_source(&mut self, source: S) -> Option<S> {
        let proxy = ItemSourceProxy::new(source, self.row.clone());
        self.source.replace(proxy).map(ItemSourceProxy::into_inner)
    }

    pub fn take_item_source(&mut self) -> Option<S> {
        self.source.take().map(ItemSourceProxy::into_inner)
    }

    /// The caller's own source, never the proxy.
    pub fn item_source(&self) -> Option<&S> {
        self.source.as_ref().map(ItemSourceProxy::inner)
    }

    pub fn item_source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut().map(ItemSourceProxy::inner_mut)
    }

    /// The source the rendering layer should read from.
    pub fn proxy(&self) -> Option<&EndlessProxy<S, V>> {
        self.source.as_ref()
    }

    pub fn proxy_mut(&mut self) -> Option<&mut EndlessProxy<S, V>> {
        self.source.as_mut()
    }

    /// Attaches (or with `None`, detaches) the host's layout.
    ///
    /// Unsupported layouts are rejected here and the previous layout stays attached. Returns the
    /// previously attached layout.
    pub fn set_layout(&mut self, layout: Option<L>) -> Result<Option<L>, Error> {
        let next = layout.map(LayoutProbe::wrap).transpose()?;
        Ok(core::mem::replace(&mut self.layout, next).map(LayoutProbe::into_layout))
    }

    pub fn layout(&self) -> Option<&L> {
        self.layout.as_ref().map(LayoutProbe::layout)
    }

    pub fn layout_mut(&mut self) -> Option<&mut L> {
        self.layout.as_mut().map(LayoutProbe::layout_mut)
    }

    /// Installs the pagination listener, or removes it with `None`.
    ///
    /// A newly installed listener starts with the current threshold. The high-water mark
    /// survives listener changes. Returns the previous listener.
    pub fn set_load_more_listener(
        &mut self,
        listener: Option<Box<dyn LoadMoreListener>>,
    ) -> Option<Box<dyn LoadMoreListener>> {
        let prev = self.trigger.take().map(|trigger| {
            self.high_water_mark = trigger.high_water_mark();
            trigger.into_listener()
        });
        self.trigger = listener.map(|listener| {
            ScrollTrigger::with_threshold(listener, self.threshold)
                .with_high_water_mark(self.high_water_mark)
        });
        edebug!(
            installed = self.trigger.is_some(),
            threshold = self.threshold.get(),
            "EndlessList::set_load_more_listener"
        );
        prev
    }

    pub fn has_load_more_listener(&self) -> bool {
        self.trigger.is_some()
    }

    /// Sets the remaining-items threshold. Zero is rejected and the current value is kept.
    pub fn set_threshold(&mut self, threshold: usize) -> Result<(), Error> {
        let threshold = Threshold::new(threshold)?;
        self.threshold = threshold;
        if let Some(trigger) = self.trigger.as_mut() {
            trigger.set_threshold(threshold);
        }
        Ok(())
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Forgets the item count of the last load so the same count can trigger again.
    pub fn reset_high_water_mark(&mut self) {
        self.high_water_mark = 0;
        if let Some(trigger) = self.trigger.as_mut() {
            trigger.reset();
        }
    }

    pub fn set_progress_view(&mut self, view: ProgressView<V>) {
        self.row.set_view(Some(view));
    }

    pub fn set_custom_progress_view(&mut self, view: V) {
        self.set_progress_view(ProgressView::Custom(view));
    }

    /// Inflates `descriptor` and uses the result as a custom progress view.
    pub fn set_progress_layout<D, I>(&mut self, descriptor: &D, inflater: &I)
    where
        D: ?Sized,
        I: ViewInflater<D, View = V>,
    {
        self.set_custom_progress_view(inflater.inflate(descriptor));
    }

    /// Tints the default indicator.
    ///
    /// Fails with [`Error::ProgressViewMismatch`] when the progress view is a custom view.
    /// Loading holders created from now on carry the new tint.
    pub fn set_progress_color(&mut self, color: Color) -> Result<(), Error> {
        self.row.with_view_mut(|view| match view {
            Some(ProgressView::Indicator(indicator)) => {
                indicator.tint = Some(color);
                Ok(())
            }
            _ => {
                ewarn!("EndlessList::set_progress_color: progress view is not an indicator");
                Err(Error::ProgressViewMismatch)
            }
        })
    }

    /// Enters (`true`) or leaves (`false`) the loading state.
    ///
    /// Setting the current value again does nothing and emits no notification.
    pub fn stop_loading(&mut self, loading: bool) {
        if !self.row.set_loading(loading) {
            return;
        }
        edebug!(loading, "EndlessList: loading state changed");
        if let Some(source) = self.source.as_ref() {
            notify_changed(&self.host, &self.notify_pending, source.observers());
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.row.is_loading()
    }

    pub fn load_state(&self) -> LoadState {
        LoadState {
            loading: self.row.is_loading(),
            high_water_mark: self
                .trigger
                .as_ref()
                .map_or(self.high_water_mark, ScrollTrigger::high_water_mark),
            threshold: self.threshold,
        }
    }

    /// Call this after every scroll update of the host list.
    ///
    /// Returns `Ok(true)` when a load was started. Without a listener this is a no-op. With a
    /// listener installed, an item source and a layout must both be attached.
    ///
    /// The count checked against the threshold is the caller's own item count. It excludes the
    /// loading row, so the row appearing never counts as new data.
    pub fn on_scroll(&mut self) -> Result<bool, Error> {
        let Some(trigger) = self.trigger.as_mut() else {
            return Ok(false);
        };
        let source = self.source.as_ref().ok_or(Error::MissingItemSource)?;
        let layout = self.layout.as_ref().ok_or(Error::MissingLayout)?;

        let furthest_visible = layout.furthest_visible_index();
        let item_count = source.inner().count();
        etrace!(
            item_count,
            furthest_visible = ?furthest_visible,
            "EndlessList::on_scroll"
        );

        let row = &self.row;
        let host = &self.host;
        let pending = &self.notify_pending;
        Ok(trigger.on_scroll(furthest_visible, item_count, || {
            if row.set_loading(true) {
                edebug!(item_count, "EndlessList: loading started");
                notify_changed(host, pending, source.observers());
            }
        }))
    }
}

impl<S, L, H, V: Clone> EndlessList<S, L, H, V> {
    pub fn progress_view(&self) -> Option<ProgressView<V>> {
        self.row.view()
    }
}

/// Delivers a structural change now, or at the host's next idle point if it is mid-layout.
///
/// Deferred notifications coalesce: at most one is queued at a time.
fn notify_changed<H: ListHost>(host: &H, pending: &Rc<Cell<bool>>, observers: &Observers) {
    if !host.is_computing_layout() {
        observers.notify_changed();
        return;
    }
    if pending.replace(true) {
        etrace!("EndlessList: notification already queued");
        return;
    }
    etrace!("EndlessList: layout in progress, deferring notification");
    let pending = Rc::clone(pending);
    let observers = observers.clone();
    host.post(Box::new(move || {
        pending.set(false);
        observers.notify_changed();
    }));
}

impl<S: fmt::Debug, L: fmt::Debug, H: fmt::Debug, V> fmt::Debug for EndlessList<S, L, H, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndlessList")
            .field("host", &self.host)
            .field("source", &self.source)
            .field("layout", &self.layout)
            .field("trigger", &self.trigger)
            .field("threshold", &self.threshold)
            .field("row", &self.row)
            .finish_non_exhaustive()
    }
}
