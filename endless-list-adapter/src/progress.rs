/// A packed `0xAARRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }
}

/// The built-in loading-row appearance: an indeterminate spinner centered in a full-width row.
///
/// Sizes are density-independent; converting them to pixels is the host's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndeterminateIndicator {
    pub height_dp: u32,
    pub bottom_margin_dp: u32,
    pub centered: bool,
    /// `None` renders with the host's default indicator color.
    pub tint: Option<Color>,
}

impl Default for IndeterminateIndicator {
    fn default() -> Self {
        Self {
            height_dp: 30,
            bottom_margin_dp: 10,
            centered: true,
            tint: None,
        }
    }
}

/// What the loading row shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressView<V> {
    Indicator(IndeterminateIndicator),
    /// A view supplied by the caller, rendered as is.
    Custom(V),
}

impl<V> ProgressView<V> {
    pub fn as_indicator(&self) -> Option<&IndeterminateIndicator> {
        match self {
            Self::Indicator(indicator) => Some(indicator),
            Self::Custom(_) => None,
        }
    }

    pub fn as_custom(&self) -> Option<&V> {
        match self {
            Self::Indicator(_) => None,
            Self::Custom(view) => Some(view),
        }
    }
}

impl<V> Default for ProgressView<V> {
    fn default() -> Self {
        Self::Indicator(IndeterminateIndicator::default())
    }
}

/// Materializes a view from a layout descriptor (a resource id, a template, a builder...).
pub trait ViewInflater<D: ?Sized> {
    type View;

    fn inflate(&self, descriptor: &D) -> Self::View;
}

impl<D: ?Sized, V, F: Fn(&D) -> V> ViewInflater<D> for F {
    type View = V;

    fn inflate(&self, descriptor: &D) -> V {
        self(descriptor)
    }
}
