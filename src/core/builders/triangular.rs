use crate::core::segments::{Segment, TriangularSegment};

use super::{
    AccumulationBased, BuildContext, FunnelMode, PyramidMode, SegmentAccumulator,
    SegmentStrategy, SeriesKind,
};

/// Roots of `a*x² + b*x + c = 0`, or `None` without a real solution.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant.is_nan() || discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    Some(((-b + root) / (2.0 * a), (-b - root) / (2.0 * a)))
}

/// Height `h` of a pyramid slice starting `y` below the apex whose area is
/// `surface`: the positive root of `h² + 2*y*h - surface = 0`.
///
/// Returns `NaN` when the equation has no real root.
#[must_use]
pub fn surface_height(y: f64, surface: f64) -> f64 {
    match solve_quadratic(1.0, 2.0 * y, -surface) {
        Some((r1, r2)) => r1.max(r2),
        None => f64::NAN,
    }
}

/// Indices contributing a slice, in index order.
fn active_indices(ctx: &BuildContext<'_>) -> Vec<usize> {
    (0..ctx.y.len())
        .filter(|index| !ctx.y[*index].is_nan() && !ctx.params.toggled_indices.contains(index))
        .collect()
}

/// Gap fraction and inter-slice spacing; both collapse to zero for a
/// single slice.
fn gap_and_spacing(gap_ratio: f64, count: usize) -> (f64, f64) {
    if count <= 1 || !(0.0..1.0).contains(&gap_ratio) {
        return (0.0, 0.0);
    }
    (gap_ratio, gap_ratio / (count - 1) as f64)
}

/// `1 / (sum * (1 + gap / (1 - gap)))`, zero for an empty sum.
fn height_coefficient(sum: f64, gap: f64) -> f64 {
    if sum > 0.0 {
        1.0 / (sum * (1.0 + gap / (1.0 - gap)))
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunnelStrategy;

impl FunnelStrategy {
    /// Funnel outline width at `level` (0 at the neck, 1 at the mouth).
    fn silhouette_width(min_width: f64, level: f64) -> f64 {
        let neck = min_width.clamp(0.0, 1.0);
        neck + (1.0 - neck) * level.clamp(0.0, 1.0)
    }
}

impl SegmentStrategy for FunnelStrategy {
    fn kind(&self) -> SeriesKind {
        SeriesKind::Funnel
    }

    fn build(&self, ctx: &BuildContext<'_>, acc: &mut SegmentAccumulator) {
        let params = ctx.params;
        let order = self.sweep_order(&active_indices(ctx));
        let count = order.len();
        let (gap, spacing) = gap_and_spacing(params.gap_ratio, count);
        let sum = self.accumulation_sum(ctx.y, &params.toggled_indices);

        // Bottom-up from the neck to the mouth.
        acc.curr_y = 0.0;
        match params.funnel_mode {
            FunnelMode::ValueIsHeight => {
                let coefficient = height_coefficient(sum, gap);
                for &index in &order {
                    let value = ctx.y[index];
                    let height = value.abs() * coefficient;
                    let lower = acc.curr_y;
                    let upper = lower + height;
                    acc.segments.add(Segment::Triangular(TriangularSegment {
                        index,
                        value,
                        top: 1.0 - upper,
                        height,
                        top_width: Self::silhouette_width(params.min_width, upper),
                        bottom_width: Self::silhouette_width(params.min_width, lower),
                        exploded: params.is_exploded(index),
                    }));
                    acc.curr_y += height + spacing;
                }
            }
            FunnelMode::ValueIsWidth => {
                let height = if count > 0 {
                    1.0 / (count as f64 * (1.0 + gap / (1.0 - gap)))
                } else {
                    0.0
                };
                let mut below = 0.0;
                for &index in &order {
                    let value = ctx.y[index];
                    let (bottom_width, top_width) = if sum > 0.0 {
                        (below / sum, (below + value.abs()) / sum)
                    } else {
                        (0.0, 0.0)
                    };
                    below += value.abs();
                    acc.segments.add(Segment::Triangular(TriangularSegment {
                        index,
                        value,
                        top: 1.0 - acc.curr_y - height,
                        height,
                        top_width,
                        bottom_width,
                        exploded: params.is_exploded(index),
                    }));
                    acc.curr_y += height + spacing;
                }
            }
        }
    }

    fn as_accumulation(&self) -> Option<&dyn AccumulationBased> {
        Some(self)
    }
}

impl AccumulationBased for FunnelStrategy {
    fn is_reversed(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PyramidStrategy;

impl SegmentStrategy for PyramidStrategy {
    fn kind(&self) -> SeriesKind {
        SeriesKind::Pyramid
    }

    fn build(&self, ctx: &BuildContext<'_>, acc: &mut SegmentAccumulator) {
        let params = ctx.params;
        let order = self.sweep_order(&active_indices(ctx));
        let (gap, spacing) = gap_and_spacing(params.gap_ratio, order.len());
        let sum = self.accumulation_sum(ctx.y, &params.toggled_indices);

        // Apex at the top; the outline width equals the distance from it.
        acc.curr_y = 0.0;
        let push = |acc: &mut SegmentAccumulator, index: usize, height: f64| {
            let top = acc.curr_y;
            acc.segments.add(Segment::Triangular(TriangularSegment {
                index,
                value: ctx.y[index],
                top,
                height,
                top_width: top.clamp(0.0, 1.0),
                bottom_width: (top + height).clamp(0.0, 1.0),
                exploded: params.is_exploded(index),
            }));
            acc.curr_y += height + spacing;
        };

        match params.pyramid_mode {
            PyramidMode::Linear => {
                let coefficient = height_coefficient(sum, gap);
                for &index in &order {
                    push(acc, index, ctx.y[index].abs() * coefficient);
                }
            }
            PyramidMode::Surface => {
                let total_height = surface_height(0.0, sum);
                let mut surface_offset = 0.0;
                for &index in &order {
                    let height = surface_height(surface_offset, ctx.y[index].abs());
                    if height.is_nan() {
                        continue;
                    }
                    surface_offset += height;
                    let normalized = if total_height > 0.0 {
                        height / total_height * (1.0 - gap)
                    } else {
                        0.0
                    };
                    push(acc, index, normalized);
                }
            }
        }
    }

    fn as_accumulation(&self) -> Option<&dyn AccumulationBased> {
        Some(self)
    }
}

impl AccumulationBased for PyramidStrategy {
    fn is_reversed(&self) -> bool {
        false
    }
}
