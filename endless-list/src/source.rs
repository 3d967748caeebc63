use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::ItemId;

/// Receives structural-change notifications from an item source.
///
/// After `on_changed` the receiver should treat every count, id and kind it cached as stale.
pub trait SourceObserver {
    fn on_changed(&self);
}

impl<F: Fn()> SourceObserver for F {
    fn on_changed(&self) {
        self();
    }
}

/// The item-source capability a list widget renders from.
///
/// Indices are 0-based and always `< count()`, except where a wrapper documents otherwise.
/// Every hook has a no-op default so small sources only implement the data queries.
pub trait ItemSource {
    /// The source's own view-kind space.
    type Kind: Copy + Eq + fmt::Debug;
    /// The view holder produced by `create_view` and passed back to the hooks.
    type Holder;

    fn count(&self) -> usize;

    fn has_stable_ids(&self) -> bool {
        false
    }

    /// Stable identity of the item at `index`, or `None` when it has none.
    fn item_id(&self, index: usize) -> Option<ItemId> {
        let _ = index;
        None
    }

    fn view_kind(&self, index: usize) -> Self::Kind;

    fn create_view(&mut self, kind: Self::Kind) -> Self::Holder;

    fn bind_view(&mut self, holder: &mut Self::Holder, index: usize);

    /// Called when the source is attached to a list.
    fn on_attached(&mut self) {}

    /// Called when the source is detached from a list.
    fn on_detached(&mut self) {}

    /// Returns `true` if the holder may be recycled despite transient state.
    fn on_failed_to_recycle(&mut self, holder: &mut Self::Holder) -> bool {
        let _ = holder;
        false
    }

    fn on_view_attached(&mut self, holder: &mut Self::Holder) {
        let _ = holder;
    }

    fn on_view_detached(&mut self, holder: &mut Self::Holder) {
        let _ = holder;
    }

    fn on_view_recycled(&mut self, holder: &mut Self::Holder) {
        let _ = holder;
    }

    fn register_observer(&mut self, observer: Rc<dyn SourceObserver>) {
        let _ = observer;
    }

    fn unregister_observer(&mut self, observer: &Rc<dyn SourceObserver>) {
        let _ = observer;
    }
}

/// A shared list of observers.
///
/// Cloning yields another handle to the same list, so a notification can be queued for later
/// without borrowing the source that owns it.
#[derive(Clone, Default)]
pub struct Observers(Rc<RefCell<Vec<Rc<dyn SourceObserver>>>>);

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, observer: Rc<dyn SourceObserver>) {
        self.0.borrow_mut().push(observer);
    }

    /// Removes `observer` (by identity). Returns `false` if it was not registered.
    pub fn unregister(&self, observer: &Rc<dyn SourceObserver>) -> bool {
        let mut list = self.0.borrow_mut();
        let Some(pos) = list.iter().position(|o| Rc::ptr_eq(o, observer)) else {
            return false;
        };
        list.remove(pos);
        true
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Calls `on_changed` on every registered observer.
    ///
    /// Observers may register or unregister while being notified; changes apply from the next
    /// notification on.
    pub fn notify_changed(&self) {
        let snapshot: Vec<Rc<dyn SourceObserver>> = self.0.borrow().clone();
        etrace!(observers = snapshot.len(), "Observers::notify_changed");
        for observer in snapshot {
            observer.on_changed();
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.len())
            .finish()
    }
}

struct LoadingRowState<P> {
    loading: Cell<bool>,
    view: RefCell<Option<P>>,
}

/// Shared loading state: the loading flag plus the view shown in the loading row.
///
/// The controller owns the writes; an [`crate::ItemSourceProxy`] receives a clone at
/// construction and reads it on every query. Clones share the same state.
pub struct LoadingRow<P> {
    state: Rc<LoadingRowState<P>>,
}

impl<P> LoadingRow<P> {
    pub fn new(view: Option<P>) -> Self {
        Self {
            state: Rc::new(LoadingRowState {
                loading: Cell::new(false),
                view: RefCell::new(view),
            }),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading.get()
    }

    /// Sets the flag. Returns `true` if it changed.
    pub fn set_loading(&self, loading: bool) -> bool {
        self.state.loading.replace(loading) != loading
    }

    pub fn has_view(&self) -> bool {
        self.state.view.borrow().is_some()
    }

    /// Whether the synthetic row is currently part of the outer index space.
    pub fn is_shown(&self) -> bool {
        self.is_loading() && self.has_view()
    }

    pub fn set_view(&self, view: Option<P>) -> Option<P> {
        self.state.view.replace(view)
    }

    /// Runs `f` against the current view, if any.
    pub fn with_view<R>(&self, f: impl FnOnce(Option<&P>) -> R) -> R {
        f(self.state.view.borrow().as_ref())
    }

    /// Runs `f` against the current view mutably, if any.
    pub fn with_view_mut<R>(&self, f: impl FnOnce(Option<&mut P>) -> R) -> R {
        f(self.state.view.borrow_mut().as_mut())
    }
}

impl<P: Clone> LoadingRow<P> {
    pub fn view(&self) -> Option<P> {
        self.state.view.borrow().clone()
    }
}

impl<P> Clone for LoadingRow<P> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<P> Default for LoadingRow<P> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<P> fmt::Debug for LoadingRow<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingRow")
            .field("loading", &self.is_loading())
            .field("has_view", &self.has_view())
            .finish()
    }
}
