use smallvec::SmallVec;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{
    CartesianTransformer, PixelRect, Point, RectSegment, ScatterSegment, Segment,
    SegmentCollection, SeriesKind, TriangularSegment, Viewport,
};
use crate::extensions::Adornment;
use crate::render::{
    EllipsePrimitive, LabelPrimitive, LinePrimitive, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive, SeriesFrame,
};

/// Per-series inputs of the pixel projection.
#[derive(Clone, Copy)]
pub struct ProjectionContext<'a> {
    pub transformer: CartesianTransformer<'a>,
    pub stroke_width: f64,
    /// Horizontal shift applied to exploded accumulation slices.
    pub explode_offset_px: f64,
}

impl ProjectionContext<'_> {
    fn viewport(&self) -> Viewport {
        self.transformer.viewport()
    }

    fn normalized_to_pixel(&self, x: f64, y: f64) -> Point {
        let viewport = self.viewport();
        Point::new(x * viewport.width_px(), y * viewport.height_px())
    }

    /// Normalized horizontal shift of an exploded slice.
    fn explode_shift(&self, exploded: bool) -> f64 {
        if exploded {
            self.explode_offset_px / self.viewport().width_px()
        } else {
            0.0
        }
    }
}

fn project_rect(rect: &RectSegment, ctx: &ProjectionContext<'_>) -> Option<RectPrimitive> {
    let a = ctx.transformer.transform_to_visible(rect.left, rect.top);
    let b = ctx.transformer.transform_to_visible(rect.right, rect.bottom);
    (a.is_finite() && b.is_finite()).then(|| RectPrimitive {
        index: rect.index,
        rect: PixelRect::from_corners(a, b),
    })
}

fn project_scatter(scatter: &ScatterSegment, ctx: &ProjectionContext<'_>) -> Option<EllipsePrimitive> {
    let center = ctx.transformer.transform_to_visible(scatter.x, scatter.y);
    center.is_finite().then(|| EllipsePrimitive {
        index: scatter.index,
        center,
        radius_x: scatter.width / 2.0,
        radius_y: scatter.height / 2.0,
    })
}

fn project_slice(slice: &TriangularSegment, ctx: &ProjectionContext<'_>) -> PolygonPrimitive {
    let center = 0.5 + ctx.explode_shift(slice.exploded);
    let mut points = SmallVec::new();
    points.push(ctx.normalized_to_pixel(center - slice.top_width / 2.0, slice.top));
    points.push(ctx.normalized_to_pixel(center + slice.top_width / 2.0, slice.top));
    points.push(ctx.normalized_to_pixel(center + slice.bottom_width / 2.0, slice.bottom()));
    points.push(ctx.normalized_to_pixel(center - slice.bottom_width / 2.0, slice.bottom()));
    PolygonPrimitive {
        index: slice.index,
        points,
    }
}

fn project_rects(segments: &[Segment], ctx: &ProjectionContext<'_>) -> Vec<RectPrimitive> {
    let project = |segment: &Segment| match segment {
        Segment::Rect(rect) => project_rect(rect, ctx),
        _ => None,
    };

    #[cfg(feature = "parallel-projection")]
    {
        segments.par_iter().filter_map(project).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        segments.iter().filter_map(project).collect()
    }
}

fn project_ellipses(segments: &[Segment], ctx: &ProjectionContext<'_>) -> Vec<EllipsePrimitive> {
    let project = |segment: &Segment| match segment {
        Segment::Scatter(scatter) => project_scatter(scatter, ctx),
        _ => None,
    };

    #[cfg(feature = "parallel-projection")]
    {
        segments.par_iter().filter_map(project).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        segments.iter().filter_map(project).collect()
    }
}

/// Projects data-space segments and adornments into pixel primitives.
///
/// Segments whose projection is not finite are dropped instead of failing
/// the whole pass.
#[must_use]
pub fn project_series(
    series_id: u32,
    kind: SeriesKind,
    segments: &SegmentCollection,
    adornments: &[Option<Adornment>],
    ctx: &ProjectionContext<'_>,
) -> SeriesFrame {
    let mut frame = SeriesFrame::new(series_id, kind);
    frame.rects = project_rects(segments.as_slice(), ctx);
    frame.ellipses = project_ellipses(segments.as_slice(), ctx);

    for segment in segments {
        match segment {
            Segment::Line(line) => {
                let start = ctx.transformer.transform_to_visible(line.x1, line.y1);
                let end = ctx.transformer.transform_to_visible(line.x2, line.y2);
                if start.is_finite() && end.is_finite() {
                    frame.lines.push(LinePrimitive {
                        start_index: line.start_index,
                        end_index: line.end_index,
                        start,
                        end,
                        stroke_width: ctx.stroke_width,
                    });
                }
            }
            Segment::Polyline(polyline) => {
                let mut projected = PolylinePrimitive {
                    indices: Vec::with_capacity(polyline.len()),
                    points: Vec::with_capacity(polyline.len()),
                    stroke_width: ctx.stroke_width,
                };
                for (index, point) in polyline.indices.iter().zip(&polyline.points) {
                    let pixel = ctx.transformer.transform_to_visible(point.x, point.y);
                    if pixel.is_finite() {
                        projected.indices.push(*index);
                        projected.points.push(pixel);
                    }
                }
                if !projected.points.is_empty() {
                    frame.polylines.push(projected);
                }
            }
            Segment::Triangular(slice) => frame.polygons.push(project_slice(slice, ctx)),
            Segment::Rect(_) | Segment::Scatter(_) => {}
        }
    }

    frame.labels = adornments
        .iter()
        .flatten()
        .filter_map(|adornment| {
            let anchor = if adornment.accumulation {
                let x = adornment.x + ctx.explode_shift(adornment.exploded);
                ctx.normalized_to_pixel(x, adornment.y)
            } else {
                ctx.transformer.transform_to_visible(adornment.x, adornment.y)
            };
            anchor.is_finite().then(|| LabelPrimitive {
                index: adornment.index,
                anchor,
                value: adornment.value,
            })
        })
        .collect();

    frame
}
