//! Host-widget glue for the `endless-list` crate.
//!
//! The `endless-list` crate is UI-agnostic and holds the trigger policy and the loading-row
//! proxy. This crate wires them to a host list widget:
//!
//! - [`EndlessList`]: owns the loading state, installs the scroll trigger, and notifies the
//!   rendering layer when the loading row appears or disappears
//! - [`ListHost`]: the seam for deferring notifications while the host computes a layout
//!   ([`IdleQueue`] is a ready-made implementation)
//! - [`ProgressView`]: what the loading row shows (the default indicator or a custom view)
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod host;
mod progress;

#[cfg(test)]
mod tests;

pub use controller::{EndlessList, EndlessProxy};
pub use host::{IdleQueue, IdleTask, ListHost};
pub use progress::{Color, IndeterminateIndicator, ProgressView, ViewInflater};

pub use endless_list::Error;
