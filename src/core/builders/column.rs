use crate::core::layout::SideBySideInfo;
use crate::core::segments::{RectSegment, Segment};
use crate::core::stacking::StackingMode;

use super::{BuildContext, Clusterable, SegmentAccumulator, SegmentStrategy, SeriesKind, Stackable};

/// Baseline of non-stacked columns.
pub(crate) const COLUMN_ORIGIN: f64 = 0.0;

/// Rectangles per sample for column, bar and stacking column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnStrategy {
    kind: SeriesKind,
    stacking: Option<StackingMode>,
}

impl ColumnStrategy {
    pub const COLUMN: Self = Self {
        kind: SeriesKind::Column,
        stacking: None,
    };
    pub const BAR: Self = Self {
        kind: SeriesKind::Bar,
        stacking: None,
    };
    pub const STACKING: Self = Self {
        kind: SeriesKind::StackingColumn,
        stacking: Some(StackingMode::Normal),
    };
    pub const STACKING_100: Self = Self {
        kind: SeriesKind::StackingColumn100,
        stacking: Some(StackingMode::Percent),
    };

    fn rect(
        ctx: &BuildContext<'_>,
        info: SideBySideInfo,
        index: usize,
        x_data: f64,
    ) -> Option<RectSegment> {
        let y = *ctx.y.get(index)?;
        if y.is_nan() {
            return None;
        }
        let (top, bottom) = match ctx.stack {
            Some(stack) => {
                let (start, end) = stack.span(index)?;
                (end, start)
            }
            None => (y, COLUMN_ORIGIN),
        };
        Some(RectSegment {
            index,
            x_data,
            left: x_data + info.start,
            right: x_data + info.end,
            top,
            bottom,
        })
    }
}

impl SegmentStrategy for ColumnStrategy {
    fn kind(&self) -> SeriesKind {
        self.kind
    }

    fn build(&self, ctx: &BuildContext<'_>, acc: &mut SegmentAccumulator) {
        let info = ctx.side_by_side.unwrap_or_default();

        if ctx.grouped {
            for (position, bucket) in ctx.buckets().iter().enumerate() {
                // Members are already descending by y, so larger columns come first.
                for &index in &bucket.members {
                    if let Some(rect) = Self::rect(ctx, info, index, position as f64) {
                        acc.segments.add(Segment::Rect(rect));
                    }
                }
            }
            return;
        }

        for index in 0..ctx.len() {
            if let Some(rect) = Self::rect(ctx, info, index, ctx.x[index]) {
                acc.segments.add(Segment::Rect(rect));
            }
        }
    }

    fn as_clusterable(&self) -> Option<&dyn Clusterable> {
        Some(self)
    }

    fn as_stackable(&self) -> Option<&dyn Stackable> {
        self.stacking.is_some().then_some(self as &dyn Stackable)
    }
}

impl Clusterable for ColumnStrategy {}

impl Stackable for ColumnStrategy {
    fn stacking_mode(&self) -> StackingMode {
        self.stacking.unwrap_or_default()
    }
}
