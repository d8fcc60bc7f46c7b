use crate::core::segments::{LineSegment, PolylineSegment, Segment};
use crate::core::stacking::StackingMode;
use crate::core::types::Point;

use super::{BuildContext, SegmentAccumulator, SegmentStrategy, SeriesKind, Stackable};

/// Vertex candidates in drawing order; `None` marks a missing value.
fn vertices(ctx: &BuildContext<'_>) -> Vec<(usize, Option<Point>)> {
    if ctx.grouped {
        return ctx
            .buckets()
            .iter()
            .enumerate()
            .filter_map(|(position, bucket)| {
                let index = bucket.representative(ctx.y)?;
                let value = ctx.plotted_value(index);
                Some((
                    index,
                    (!value.is_nan()).then(|| Point::new(position as f64, value)),
                ))
            })
            .collect();
    }

    (0..ctx.len())
        .map(|index| {
            let value = ctx.plotted_value(index);
            (
                index,
                (!value.is_nan()).then(|| Point::new(ctx.x[index], value)),
            )
        })
        .collect()
}

/// Defined vertices in drawing order: `(x, plotted value)` per sample, or
/// per category bucket in grouped mode.
#[must_use]
pub fn line_vertices(ctx: &BuildContext<'_>) -> Vec<(usize, Point)> {
    vertices(ctx)
        .into_iter()
        .filter_map(|(index, point)| Some((index, point?)))
        .collect()
}

/// One two-point segment per consecutive pair of defined samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStrategy;

impl SegmentStrategy for LineStrategy {
    fn kind(&self) -> SeriesKind {
        SeriesKind::Line
    }

    fn build(&self, ctx: &BuildContext<'_>, acc: &mut SegmentAccumulator) {
        let vertices = vertices(ctx);
        for pair in vertices.windows(2) {
            let ((start_index, Some(start)), (end_index, Some(end))) = (pair[0], pair[1]) else {
                continue;
            };
            acc.segments.add(Segment::Line(LineSegment {
                start_index,
                end_index,
                x1: start.x,
                y1: start.y,
                x2: end.x,
                y2: end.y,
            }));
        }
    }
}

/// Single polyline for the fast line family; missing vertices are omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastLineStrategy {
    kind: SeriesKind,
    step: bool,
    stacking: Option<StackingMode>,
}

impl FastLineStrategy {
    pub const LINE: Self = Self {
        kind: SeriesKind::FastLine,
        step: false,
        stacking: None,
    };
    pub const STEP: Self = Self {
        kind: SeriesKind::FastStepLine,
        step: true,
        stacking: None,
    };
    pub const STACKING: Self = Self {
        kind: SeriesKind::StackingLine,
        step: false,
        stacking: Some(StackingMode::Normal),
    };
    pub const STACKING_100: Self = Self {
        kind: SeriesKind::StackingLine100,
        step: false,
        stacking: Some(StackingMode::Percent),
    };
}

impl SegmentStrategy for FastLineStrategy {
    fn kind(&self) -> SeriesKind {
        self.kind
    }

    fn build(&self, ctx: &BuildContext<'_>, acc: &mut SegmentAccumulator) {
        let mut polyline = PolylineSegment::default();
        let mut previous: Option<Point> = None;
        for (index, point) in vertices(ctx) {
            let Some(point) = point else {
                continue;
            };
            if self.step {
                if let Some(previous) = previous {
                    // Horizontal run at the previous value, then the riser.
                    polyline.push(index, Point::new(point.x, previous.y));
                }
            }
            polyline.push(index, point);
            previous = Some(point);
        }

        if !polyline.is_empty() {
            acc.segments.add(Segment::Polyline(polyline));
        }
    }

    fn as_stackable(&self) -> Option<&dyn Stackable> {
        self.stacking.is_some().then_some(self as &dyn Stackable)
    }
}

impl Stackable for FastLineStrategy {
    fn stacking_mode(&self) -> StackingMode {
        self.stacking.unwrap_or_default()
    }
}
