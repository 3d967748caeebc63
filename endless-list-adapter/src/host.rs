use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

/// A callback queued for the host's next idle point.
pub type IdleTask = Box<dyn FnOnce()>;

/// The list widget hosting an [`crate::EndlessList`].
///
/// Structural-change notifications must not reach the rendering layer while it is computing a
/// layout. When `is_computing_layout` returns `true`, the notification is handed to `post`
/// instead, and the host runs it at its next idle point.
pub trait ListHost {
    fn is_computing_layout(&self) -> bool;

    /// Schedules `task` to run once the current layout pass (and event) has finished.
    fn post(&self, task: IdleTask);
}

impl<H: ListHost + ?Sized> ListHost for &H {
    fn is_computing_layout(&self) -> bool {
        (**self).is_computing_layout()
    }

    fn post(&self, task: IdleTask) {
        (**self).post(task);
    }
}

impl<H: ListHost + ?Sized> ListHost for Rc<H> {
    fn is_computing_layout(&self) -> bool {
        (**self).is_computing_layout()
    }

    fn post(&self, task: IdleTask) {
        (**self).post(task);
    }
}

/// A minimal [`ListHost`]: a FIFO of posted tasks plus a "computing layout" flag.
///
/// Useful for hosts without an event loop of their own (drive it with [`IdleQueue::run_pending`]
/// after each frame) and in tests. Clones share the same queue and flag.
#[derive(Clone, Default)]
pub struct IdleQueue {
    tasks: Rc<RefCell<VecDeque<IdleTask>>>,
    computing_layout: Rc<Cell<bool>>,
}

impl IdleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_computing_layout(&self, computing: bool) {
        self.computing_layout.set(computing);
    }

    /// Runs `f` with the "computing layout" flag raised, restoring the previous value afterwards.
    pub fn computing_layout<R>(&self, f: impl FnOnce() -> R) -> R {
        let prev = self.computing_layout.replace(true);
        let out = f();
        self.computing_layout.set(prev);
        out
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs every task queued so far. Tasks posted while running wait for the next call.
    ///
    /// Returns the number of tasks run.
    pub fn run_pending(&self) -> usize {
        let batch = core::mem::take(&mut *self.tasks.borrow_mut());
        let ran = batch.len();
        for task in batch {
            task();
        }
        ran
    }
}

impl ListHost for IdleQueue {
    fn is_computing_layout(&self) -> bool {
        self.computing_layout.get()
    }

    fn post(&self, task: IdleTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for IdleQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdleQueue")
            .field("pending", &self.pending())
            .field("computing_layout", &self.computing_layout.get())
            .finish()
    }
}
