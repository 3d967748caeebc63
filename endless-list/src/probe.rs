use core::fmt;

use crate::Error;

/// How a layout reports its visible range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutCapability {
    /// One lane (a plain vertical or horizontal list).
    SingleLane,
    /// Several independent lanes (staggered grids, masonry columns).
    MultiLane,
    /// Anything the probe does not know how to read.
    Unsupported,
}

/// The host's layout strategy, as far as pagination needs to see it.
///
/// Implementations answer the query that matches their [`LayoutCapability`]; the other one
/// keeps its default and is never called by [`LayoutProbe`].
pub trait ListLayout {
    fn capability(&self) -> LayoutCapability;

    /// Last visible item index, or `None` when nothing is laid out.
    fn last_visible_index(&self) -> Option<usize> {
        None
    }

    /// Emits the last visible item index of every lane, in lane order.
    ///
    /// Lanes with nothing laid out emit `None`.
    fn last_visible_indices(&self, emit: &mut dyn FnMut(Option<usize>)) {
        let _ = emit;
    }
}

impl<T: ListLayout + ?Sized> ListLayout for alloc::boxed::Box<T> {
    fn capability(&self) -> LayoutCapability {
        (**self).capability()
    }

    fn last_visible_index(&self) -> Option<usize> {
        (**self).last_visible_index()
    }

    fn last_visible_indices(&self, emit: &mut dyn FnMut(Option<usize>)) {
        (**self).last_visible_indices(emit);
    }
}

/// Wraps a layout and answers "what is the furthest visible item?".
///
/// The layout's capability is resolved once, in [`LayoutProbe::wrap`], into a stored query
/// function. Unsupported layouts are rejected there instead of on the first scroll.
pub struct LayoutProbe<L> {
    layout: L,
    resolve: fn(&L) -> Option<usize>,
}

impl<L: ListLayout> LayoutProbe<L> {
    pub fn wrap(layout: L) -> Result<Self, Error> {
        let resolve: fn(&L) -> Option<usize> = match layout.capability() {
            LayoutCapability::SingleLane => single_lane::<L>,
            LayoutCapability::MultiLane => multi_lane::<L>,
            LayoutCapability::Unsupported => {
                let layout = core::any::type_name::<L>();
                ewarn!(layout, "LayoutProbe::wrap: unsupported layout");
                return Err(Error::UnsupportedLayout { layout });
            }
        };
        Ok(Self { layout, resolve })
    }

    pub fn furthest_visible_index(&self) -> Option<usize> {
        (self.resolve)(&self.layout)
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    pub fn into_layout(self) -> L {
        self.layout
    }
}

fn single_lane<L: ListLayout>(layout: &L) -> Option<usize> {
    layout.last_visible_index()
}

fn multi_lane<L: ListLayout>(layout: &L) -> Option<usize> {
    let mut furthest: Option<usize> = None;
    layout.last_visible_indices(&mut |index| {
        furthest = furthest.max(index);
    });
    furthest
}

impl<L: fmt::Debug> fmt::Debug for LayoutProbe<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutProbe")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
