//! Per-kind segment generation.
//!
//! Each [`SeriesKind`] is served by one strategy object. Optional behavior
//! (clustering, stacking, accumulation) is exposed through capability views
//! on the strategy; callers skip the step when a capability is absent.

mod column;
mod line;
mod scatter;
mod triangular;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::layout::SideBySideInfo;
use crate::core::segments::SegmentCollection;
use crate::core::stacking::{CumulativeStack, StackingMode};
use crate::core::values::{CategoryBucket, group_by_category};

pub use column::ColumnStrategy;
pub use line::{FastLineStrategy, LineStrategy, line_vertices};
pub use scatter::ScatterStrategy;
pub use triangular::{FunnelStrategy, PyramidStrategy, surface_height};

/// Supported series kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeriesKind {
    #[default]
    Column,
    /// Column drawn with transposed axes.
    Bar,
    StackingColumn,
    StackingColumn100,
    Line,
    FastLine,
    FastStepLine,
    StackingLine,
    StackingLine100,
    Scatter,
    Funnel,
    Pyramid,
}

impl SeriesKind {
    #[must_use]
    pub fn strategy(self) -> &'static dyn SegmentStrategy {
        match self {
            Self::Column => &ColumnStrategy::COLUMN,
            Self::Bar => &ColumnStrategy::BAR,
            Self::StackingColumn => &ColumnStrategy::STACKING,
            Self::StackingColumn100 => &ColumnStrategy::STACKING_100,
            Self::Line => &LineStrategy,
            Self::FastLine => &FastLineStrategy::LINE,
            Self::FastStepLine => &FastLineStrategy::STEP,
            Self::StackingLine => &FastLineStrategy::STACKING,
            Self::StackingLine100 => &FastLineStrategy::STACKING_100,
            Self::Scatter => &ScatterStrategy,
            Self::Funnel => &FunnelStrategy,
            Self::Pyramid => &PyramidStrategy,
        }
    }

    #[must_use]
    pub fn is_transposed(self) -> bool {
        matches!(self, Self::Bar)
    }

    #[must_use]
    pub fn is_line_family(self) -> bool {
        matches!(
            self,
            Self::Line
                | Self::FastLine
                | Self::FastStepLine
                | Self::StackingLine
                | Self::StackingLine100
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FunnelMode {
    /// Slice height proportional to the value.
    #[default]
    ValueIsHeight,
    /// Equal slice heights; widths follow cumulative value ratios.
    ValueIsWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PyramidMode {
    /// Slice height proportional to the value.
    #[default]
    Linear,
    /// Slice area proportional to the value.
    Surface,
}

/// Layout parameters consumed by the builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentParams {
    pub gap_ratio: f64,
    pub explode_index: Option<usize>,
    pub explode_all: bool,
    /// Neck width of the funnel as a fraction of the full width.
    pub min_width: f64,
    pub funnel_mode: FunnelMode,
    pub pyramid_mode: PyramidMode,
    pub scatter_width: f64,
    pub scatter_height: f64,
    /// Legend-toggled indices of accumulation series.
    pub toggled_indices: IndexSet<usize>,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            gap_ratio: 0.0,
            explode_index: None,
            explode_all: false,
            min_width: 0.1,
            funnel_mode: FunnelMode::default(),
            pyramid_mode: PyramidMode::default(),
            scatter_width: 20.0,
            scatter_height: 20.0,
            toggled_indices: IndexSet::new(),
        }
    }
}

impl SegmentParams {
    #[must_use]
    pub fn is_exploded(&self, index: usize) -> bool {
        self.explode_all || self.explode_index == Some(index)
    }
}

/// Inputs of one generation pass.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub params: &'a SegmentParams,
    /// Slot inside the category width; `None` means the full width.
    pub side_by_side: Option<SideBySideInfo>,
    /// Cumulative values when the series is stacked.
    pub stack: Option<&'a CumulativeStack>,
    /// Group members by distinct x category (`arrange_by_index == false`).
    pub grouped: bool,
}

impl<'a> BuildContext<'a> {
    #[must_use]
    pub fn new(x: &'a [f64], y: &'a [f64], params: &'a SegmentParams) -> Self {
        Self {
            x,
            y,
            params,
            side_by_side: None,
            stack: None,
            grouped: false,
        }
    }

    #[must_use]
    pub fn with_side_by_side(mut self, info: SideBySideInfo) -> Self {
        self.side_by_side = Some(info);
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: &'a CumulativeStack) -> Self {
        self.stack = Some(stack);
        self
    }

    #[must_use]
    pub fn with_grouping(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    /// Number of aligned samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn buckets(&self) -> Vec<CategoryBucket> {
        let len = self.len();
        group_by_category(&self.x[..len], &self.y[..len])
    }

    /// Plotted value at `index`: the stack end when stacked, else the raw y.
    #[must_use]
    pub fn plotted_value(&self, index: usize) -> f64 {
        let raw = self.y.get(index).copied().unwrap_or(f64::NAN);
        if raw.is_nan() {
            return f64::NAN;
        }
        match self.stack {
            Some(stack) => stack.end.get(index).copied().unwrap_or(f64::NAN),
            None => raw,
        }
    }
}

/// Mutable state threaded through one generation call.
#[derive(Debug, Default)]
pub struct SegmentAccumulator {
    pub segments: SegmentCollection,
    /// Running vertical offset of accumulation sweeps.
    pub curr_y: f64,
}

impl SegmentAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Series kinds laid out side by side within a category.
pub trait Clusterable {
    /// Slot for this series, shrunk by `spacing`.
    fn slot_info(&self, info: SideBySideInfo, spacing: f64) -> SideBySideInfo {
        info.with_spacing(spacing)
    }
}

/// Series kinds taking part in a stack group.
pub trait Stackable {
    fn stacking_mode(&self) -> StackingMode;
}

/// Series kinds splitting the plot by value share (funnel, pyramid).
pub trait AccumulationBased {
    /// Whether the sweep starts from the last index.
    fn is_reversed(&self) -> bool;

    /// `active` indices in sweep order.
    fn sweep_order(&self, active: &[usize]) -> Vec<usize> {
        if self.is_reversed() {
            active.iter().rev().copied().collect()
        } else {
            active.to_vec()
        }
    }

    /// Sum of absolute values over non-missing, non-toggled indices.
    fn accumulation_sum(&self, y: &[f64], toggled: &IndexSet<usize>) -> f64 {
        y.iter()
            .enumerate()
            .filter(|(index, value)| !value.is_nan() && !toggled.contains(index))
            .map(|(_, value)| value.abs())
            .sum()
    }
}

/// Segment generation strategy for one [`SeriesKind`].
pub trait SegmentStrategy: Sync {
    fn kind(&self) -> SeriesKind;

    /// Appends this series' segments to `acc.segments`.
    fn build(&self, ctx: &BuildContext<'_>, acc: &mut SegmentAccumulator);

    fn as_clusterable(&self) -> Option<&dyn Clusterable> {
        None
    }

    fn as_stackable(&self) -> Option<&dyn Stackable> {
        None
    }

    fn as_accumulation(&self) -> Option<&dyn AccumulationBased> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RegenerationMode {
    /// Clear the collection and rebuild every segment.
    #[default]
    Rebuild,
    /// Update existing segments in place when the segment count is unchanged.
    Patch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegenerationOutcome {
    Rebuilt,
    Patched,
}

/// Runs `strategy` and applies the result to `segments`.
///
/// `Patch` falls back to a rebuild when the fresh segment list does not line
/// up with the existing one.
pub fn regenerate(
    strategy: &dyn SegmentStrategy,
    ctx: &BuildContext<'_>,
    segments: &mut SegmentCollection,
    mode: RegenerationMode,
) -> RegenerationOutcome {
    let mut acc = SegmentAccumulator::new();
    if !ctx.is_empty() {
        strategy.build(ctx, &mut acc);
    }

    let outcome = match mode {
        RegenerationMode::Patch if segments.patch(&acc.segments) => RegenerationOutcome::Patched,
        _ => {
            segments.rebuild(acc.segments);
            RegenerationOutcome::Rebuilt
        }
    };
    debug!(
        kind = ?strategy.kind(),
        samples = ctx.len(),
        segments = segments.len(),
        ?outcome,
        "regenerated segments"
    );
    outcome
}
