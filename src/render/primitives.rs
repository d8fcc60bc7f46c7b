use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PixelRect, Point};
use crate::error::{ChartError, ChartResult};

fn ensure_finite(point: Point, what: &str) -> ChartResult<()> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

fn ensure_stroke(stroke_width: f64) -> ChartResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(ChartError::InvalidData(
            "stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Column/bar rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub index: usize,
    pub rect: PixelRect,
}

impl RectPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(Point::new(self.rect.left, self.rect.top), "rect")?;
        ensure_finite(Point::new(self.rect.right, self.rect.bottom), "rect")
    }
}

/// Two-point line in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub start_index: usize,
    pub end_index: usize,
    pub start: Point,
    pub end: Point,
    pub stroke_width: f64,
}

impl LinePrimitive {
    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(self.start, "line")?;
        ensure_finite(self.end, "line")?;
        ensure_stroke(self.stroke_width)
    }
}

/// Polyline in pixel space; `indices` run parallel to `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub indices: Vec<usize>,
    pub points: Vec<Point>,
    pub stroke_width: f64,
}

impl PolylinePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self.indices.len() != self.points.len() {
            return Err(ChartError::InvalidData(
                "polyline indices must align with points".to_owned(),
            ));
        }
        for point in &self.points {
            ensure_finite(*point, "polyline")?;
        }
        ensure_stroke(self.stroke_width)
    }
}

/// Scatter marker ellipse in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipsePrimitive {
    pub index: usize,
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl EllipsePrimitive {
    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(self.center, "ellipse")?;
        if !(self.radius_x > 0.0 && self.radius_y > 0.0)
            || !self.radius_x.is_finite()
            || !self.radius_y.is_finite()
        {
            return Err(ChartError::InvalidData(
                "ellipse radii must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Funnel/pyramid trapezoid in pixel space, clockwise from top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPrimitive {
    pub index: usize,
    pub points: SmallVec<[Point; 4]>,
}

impl PolygonPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        for point in &self.points {
            ensure_finite(*point, "polygon")?;
        }
        Ok(())
    }
}

/// Data-label anchor in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPrimitive {
    pub index: usize,
    pub anchor: Point,
    pub value: f64,
}

impl LabelPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(self.anchor, "label")
    }
}
