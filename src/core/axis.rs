use serde::{Deserialize, Serialize};

use crate::core::types::{Point, Viewport};
use crate::error::{ChartError, ChartResult};

/// Visible value window of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}

impl AxisRange {
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        if !start.is_finite() || !end.is_finite() || start == end {
            return Err(ChartError::InvalidData(
                "axis range must be finite and non-zero".to_owned(),
            ));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (min, max) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        value >= min && value <= max
    }
}

/// Axis contract consumed by projection and hit-testing.
///
/// Implementations map values to a unit coefficient in `[0, 1]` over the
/// visible range; pixel transforms are derived from that coefficient.
pub trait Axis: Send + Sync {
    fn is_inversed(&self) -> bool;

    fn visible_range(&self) -> AxisRange;

    /// Maps `value` to `[0, 1]` over the visible range, honoring inversion.
    /// Values outside the range map outside the unit interval.
    fn value_to_coefficient(&self, value: f64) -> f64 {
        let range = self.visible_range();
        let coefficient = (value - range.start) / range.delta();
        if self.is_inversed() {
            1.0 - coefficient
        } else {
            coefficient
        }
    }

    fn coefficient_to_value(&self, coefficient: f64) -> f64 {
        let range = self.visible_range();
        let coefficient = if self.is_inversed() {
            1.0 - coefficient
        } else {
            coefficient
        };
        range.start + coefficient * range.delta()
    }

    /// Maps `value` to a pixel offset along an axis of `length_px` pixels.
    fn value_to_pixel(&self, value: f64, length_px: f64) -> f64 {
        self.value_to_coefficient(value) * length_px
    }

    fn pixel_to_value(&self, pixel: f64, length_px: f64) -> f64 {
        self.coefficient_to_value(pixel / length_px)
    }
}

/// Continuous numeric axis over a fixed visible range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearAxis {
    range: AxisRange,
    #[serde(default)]
    inversed: bool,
}

impl LinearAxis {
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        Ok(Self {
            range: AxisRange::new(start, end)?,
            inversed: false,
        })
    }

    #[must_use]
    pub fn with_inversed(mut self, inversed: bool) -> Self {
        self.inversed = inversed;
        self
    }

    pub fn set_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.range = AxisRange::new(start, end)?;
        Ok(())
    }
}

impl Axis for LinearAxis {
    fn is_inversed(&self) -> bool {
        self.inversed
    }

    fn visible_range(&self) -> AxisRange {
        self.range
    }
}

/// Maps data-space (x, y) pairs into viewport pixels for a cartesian series.
///
/// When `transposed` is set (bar series), the x axis runs vertically and the
/// y axis horizontally. Pixel y grows downwards.
#[derive(Clone, Copy)]
pub struct CartesianTransformer<'a> {
    x_axis: &'a dyn Axis,
    y_axis: &'a dyn Axis,
    viewport: Viewport,
    transposed: bool,
}

impl<'a> CartesianTransformer<'a> {
    pub fn new(
        x_axis: &'a dyn Axis,
        y_axis: &'a dyn Axis,
        viewport: Viewport,
        transposed: bool,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            x_axis,
            y_axis,
            viewport,
            transposed,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Data-space to pixel transform.
    #[must_use]
    pub fn transform_to_visible(&self, x: f64, y: f64) -> Point {
        let x_coef = self.x_axis.value_to_coefficient(x);
        let y_coef = self.y_axis.value_to_coefficient(y);
        if self.transposed {
            Point::new(
                y_coef * self.viewport.width_px(),
                (1.0 - x_coef) * self.viewport.height_px(),
            )
        } else {
            Point::new(
                x_coef * self.viewport.width_px(),
                (1.0 - y_coef) * self.viewport.height_px(),
            )
        }
    }

    /// Pixel to data-space transform, inverse of [`Self::transform_to_visible`].
    #[must_use]
    pub fn transform_to_data(&self, point: Point) -> (f64, f64) {
        let horizontal = point.x / self.viewport.width_px();
        let vertical = 1.0 - point.y / self.viewport.height_px();
        if self.transposed {
            (
                self.x_axis.coefficient_to_value(vertical),
                self.y_axis.coefficient_to_value(horizontal),
            )
        } else {
            (
                self.x_axis.coefficient_to_value(horizontal),
                self.y_axis.coefficient_to_value(vertical),
            )
        }
    }
}
