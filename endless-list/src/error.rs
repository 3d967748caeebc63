use thiserror::Error;

/// Configuration and wiring failures reported by this crate and its adapters.
///
/// Every variant is returned synchronously at the call site that caused it; nothing is
/// clamped or silently ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A threshold of zero or below was supplied.
    #[error("illegal threshold: {value}")]
    InvalidThreshold { value: i64 },
    /// The layout reported a capability the probe cannot read.
    #[error("unsupported layout: {layout}")]
    UnsupportedLayout { layout: &'static str },
    /// A tint was requested for a progress view that is not an indeterminate indicator.
    #[error("progress view is not an indeterminate indicator")]
    ProgressViewMismatch,
    /// A scroll was evaluated with a load listener installed but no item source attached.
    #[error("no item source attached")]
    MissingItemSource,
    /// A scroll was evaluated with a load listener installed but no layout attached.
    #[error("no layout attached")]
    MissingLayout,
}
