//! A headless infinite-scroll engine for list views.
//!
//! For host-widget glue (loading state, deferred notifications, progress views), see the
//! `endless-list-adapter` crate.
//!
//! This crate holds the parts of "load the next page when the user nears the end" that do not
//! depend on any UI framework:
//!
//! - [`ScrollTrigger`]: decides on each scroll update whether to request the next page
//! - [`LayoutProbe`]: reads the furthest visible item index from single- or multi-lane layouts
//! - [`ItemSourceProxy`]: wraps an [`ItemSource`] and appends a synthetic loading row while a
//!   load is outstanding, without the wrapped source ever seeing it
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - an item source (counts, ids, view kinds, view creation and binding)
//! - a layout that reports its last visible item index (per lane, for multi-lane layouts)
//! - scroll notifications
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod probe;
mod proxy;
mod source;
mod trigger;
mod types;


pub use error::Error;
pub use probe::{LayoutCapability, LayoutProbe, ListLayout};
pub use proxy::{Holder, ItemSourceProxy, LoadingHolder};
pub use source::{ItemSource, LoadingRow, Observers, SourceObserver};
pub use trigger::{LoadMoreFn, LoadMoreListener, ScrollTrigger, load_more_fn};
pub use types::{ItemId, LoadState, Threshold, ViewKind};
