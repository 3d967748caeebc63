use alloc::rc::Rc;
use core::fmt;

use crate::{ItemId, ItemSource, LoadingRow, Observers, SourceObserver, ViewKind};

/// The view holder for the synthetic loading row.
///
/// It wraps the loading-row view that was configured when it was created. `id` increases with
/// every creation, so a host can tell the current holder from a stale one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadingHolder<P> {
    pub id: u64,
    pub view: Option<P>,
}

/// A view holder in the outer index space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Holder<H, P> {
    /// Created by (and only ever handed back to) the wrapped source.
    Item(H),
    Loading(LoadingHolder<P>),
}

impl<H, P> Holder<H, P> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn as_item(&self) -> Option<&H> {
        match self {
            Self::Item(h) => Some(h),
            Self::Loading(_) => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut H> {
        match self {
            Self::Item(h) => Some(h),
            Self::Loading(_) => None,
        }
    }

    pub fn into_item(self) -> Option<H> {
        match self {
            Self::Item(h) => Some(h),
            Self::Loading(_) => None,
        }
    }
}

/// Wraps an [`ItemSource`] and appends one loading row while a load is outstanding.
///
/// Outer indices `0..inner.count()` map one-to-one onto the wrapped source. When the shared
/// [`LoadingRow`] is loading and has a view, one more index (`inner.count()`) exists and is
/// answered by the proxy alone: it has no id, kind [`ViewKind::Loading`], and binds to
/// nothing. Loading holders never reach the wrapped source's hooks.
pub struct ItemSourceProxy<S, P> {
    inner: S,
    row: LoadingRow<P>,
    has_stable_ids: bool,
    observers: Observers,
    loading_holder: Option<u64>,
    next_holder_id: u64,
}

impl<S: ItemSource, P> ItemSourceProxy<S, P> {
    /// Wraps `inner`. Its `has_stable_ids()` is captured here and not re-read.
    pub fn new(inner: S, row: LoadingRow<P>) -> Self {
        let has_stable_ids = inner.has_stable_ids();
        edebug!(
            count = inner.count(),
            has_stable_ids,
            "ItemSourceProxy::new"
        );
        Self {
            inner,
            row,
            has_stable_ids,
            observers: Observers::new(),
            loading_holder: None,
            next_holder_id: 0,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Mutable access to the wrapped source.
    ///
    /// Call [`Self::notify_changed`] afterwards if the count or contents changed.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn loading_row(&self) -> &LoadingRow<P> {
        &self.row
    }

    /// Observers registered on the proxy itself.
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    pub fn notify_changed(&self) {
        self.observers.notify_changed();
    }

    /// Id of the most recently created loading holder.
    pub fn loading_holder_id(&self) -> Option<u64> {
        self.loading_holder
    }

    /// Whether `holder` is the most recently created loading holder.
    pub fn is_current_loading_holder<H>(&self, holder: &Holder<H, P>) -> bool {
        match holder {
            Holder::Loading(h) => self.loading_holder == Some(h.id),
            Holder::Item(_) => false,
        }
    }

    fn is_synthetic(&self, index: usize) -> bool {
        index == self.inner.count()
    }
}

impl<S, P> ItemSource for ItemSourceProxy<S, P>
where
    S: ItemSource,
    P: Clone,
{
    type Kind = ViewKind<S::Kind>;
    type Holder = Holder<S::Holder, P>;

    fn count(&self) -> usize {
        self.inner.count() + usize::from(self.row.is_shown())
    }

    fn has_stable_ids(&self) -> bool {
        self.has_stable_ids
    }

    fn item_id(&self, index: usize) -> Option<ItemId> {
        if self.is_synthetic(index) {
            return None;
        }
        self.inner.item_id(index)
    }

    fn view_kind(&self, index: usize) -> Self::Kind {
        if self.row.is_loading() && self.is_synthetic(index) {
            return ViewKind::Loading;
        }
        ViewKind::Item(self.inner.view_kind(index))
    }

    fn create_view(&mut self, kind: Self::Kind) -> Self::Holder {
        match kind {
            ViewKind::Item(kind) => Holder::Item(self.inner.create_view(kind)),
            ViewKind::Loading => {
                let id = self.next_holder_id;
                self.next_holder_id = self.next_holder_id.wrapping_add(1);
                self.loading_holder = Some(id);
                etrace!(id, "ItemSourceProxy: created loading holder");
                Holder::Loading(LoadingHolder {
                    id,
                    view: self.row.view(),
                })
            }
        }
    }

    fn bind_view(&mut self, holder: &mut Self::Holder, index: usize) {
        if index >= self.inner.count() {
            return;
        }
        match holder {
            Holder::Item(h) => self.inner.bind_view(h, index),
            Holder::Loading(_) => {
                ewarn!(index, "ItemSourceProxy: loading holder bound to an item index");
            }
        }
    }

    fn on_attached(&mut self) {
        self.inner.on_attached();
    }

    fn on_detached(&mut self) {
        self.inner.on_detached();
    }

    fn on_failed_to_recycle(&mut self, holder: &mut Self::Holder) -> bool {
        match holder {
            Holder::Item(h) => self.inner.on_failed_to_recycle(h),
            Holder::Loading(_) => true,
        }
    }

    fn on_view_attached(&mut self, holder: &mut Self::Holder) {
        if let Holder::Item(h) = holder {
            self.inner.on_view_attached(h);
        }
    }

    fn on_view_detached(&mut self, holder: &mut Self::Holder) {
        if let Holder::Item(h) = holder {
            self.inner.on_view_detached(h);
        }
    }

    fn on_view_recycled(&mut self, holder: &mut Self::Holder) {
        if let Holder::Item(h) = holder {
            self.inner.on_view_recycled(h);
        }
    }

    fn register_observer(&mut self, observer: Rc<dyn SourceObserver>) {
        self.observers.register(Rc::clone(&observer));
        self.inner.register_observer(observer);
    }

    fn unregister_observer(&mut self, observer: &Rc<dyn SourceObserver>) {
        self.observers.unregister(observer);
        self.inner.unregister_observer(observer);
    }
}

impl<S: fmt::Debug, P> fmt::Debug for ItemSourceProxy<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemSourceProxy")
            .field("inner", &self.inner)
            .field("row", &self.row)
            .field("has_stable_ids", &self.has_stable_ids)
            .field("observers", &self.observers)
            .field("loading_holder", &self.loading_holder)
            .finish()
    }
}
