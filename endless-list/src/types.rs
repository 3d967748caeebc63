use core::num::NonZeroUsize;

use crate::Error;

/// Stable identity reported by an item source.
pub type ItemId = u64;

/// Remaining-items margin and trigger divisor. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Threshold(NonZeroUsize);

impl Threshold {
    pub const ONE: Self = Self(NonZeroUsize::MIN);

    pub fn new(value: usize) -> Result<Self, Error> {
        match NonZeroUsize::new(value) {
            Some(v) => Ok(Self(v)),
            None => {
                ewarn!(value, "Threshold::new: rejected");
                Err(Error::InvalidThreshold { value: 0 })
            }
        }
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<i64> for Threshold {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            ewarn!(value, "Threshold::try_from: rejected");
            return Err(Error::InvalidThreshold { value });
        }
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(Error::InvalidThreshold { value })
    }
}

impl From<NonZeroUsize> for Threshold {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}

/// View kind in the outer index space.
///
/// `Loading` is reserved for the synthetic loading row, so it can never collide with a kind
/// reported by the wrapped source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewKind<K> {
    Item(K),
    Loading,
}

impl<K> ViewKind<K> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn item(self) -> Option<K> {
        match self {
            Self::Item(k) => Some(k),
            Self::Loading => None,
        }
    }
}

/// A lightweight, serializable snapshot of the pagination state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadState {
    pub loading: bool,
    /// Item count at the last trigger (0 before the first one).
    pub high_water_mark: usize,
    pub threshold: Threshold,
}
