use serde::{Deserialize, Serialize};

/// Ordered amount of work a configuration change requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum InvalidationLevel {
    #[default]
    None,
    /// Only label anchors move.
    Adornments,
    /// This series' segments must be regenerated.
    Segments,
    /// Sibling slots or stacks change; every series regenerates.
    Layout,
    /// Bound values must be resolved again.
    Data,
}

impl InvalidationLevel {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }

    #[must_use]
    pub const fn affects_siblings(self) -> bool {
        matches!(self, Self::Layout)
    }
}

/// Field of [`super::SeriesConfig`] reported by the host after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesConfigField {
    Kind,
    XPath,
    YPath,
    StackGroup,
    GapRatio,
    SegmentSpacing,
    ExplodeIndex,
    ExplodeAll,
    ExplodeOffset,
    MinWidth,
    FunnelMode,
    PyramidMode,
    ArrangeByIndex,
    ScatterExtent,
    StrokeThickness,
    AdornmentPosition,
    Visible,
    ToggledIndices,
    Transposed,
}

impl SeriesConfigField {
    #[must_use]
    pub const fn invalidation_level(self) -> InvalidationLevel {
        match self {
            Self::XPath | Self::YPath => InvalidationLevel::Data,
            // Kind swaps capabilities, so sibling slots and stacks move too.
            Self::Kind | Self::StackGroup | Self::SegmentSpacing | Self::Visible => {
                InvalidationLevel::Layout
            }
            Self::GapRatio
            | Self::ExplodeIndex
            | Self::ExplodeAll
            | Self::MinWidth
            | Self::FunnelMode
            | Self::PyramidMode
            | Self::ArrangeByIndex
            | Self::ScatterExtent
            | Self::ToggledIndices => InvalidationLevel::Segments,
            Self::AdornmentPosition => InvalidationLevel::Adornments,
            // Projection-only fields: picked up on the next frame.
            Self::ExplodeOffset | Self::StrokeThickness | Self::Transposed => {
                InvalidationLevel::None
            }
        }
    }
}
