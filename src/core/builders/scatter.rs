use crate::core::segments::{ScatterSegment, Segment};

use super::{BuildContext, SegmentAccumulator, SegmentStrategy, SeriesKind};

/// One fixed-size anchor per defined sample, no connecting geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScatterStrategy;

impl SegmentStrategy for ScatterStrategy {
    fn kind(&self) -> SeriesKind {
        SeriesKind::Scatter
    }

    fn build(&self, ctx: &BuildContext<'_>, acc: &mut SegmentAccumulator) {
        let width = ctx.params.scatter_width;
        let height = ctx.params.scatter_height;
        for index in 0..ctx.len() {
            let y = ctx.y[index];
            if y.is_nan() {
                continue;
            }
            acc.segments.add(Segment::Scatter(ScatterSegment {
                index,
                x: ctx.x[index],
                y,
                width,
                height,
            }));
        }
    }
}
