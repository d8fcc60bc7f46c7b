use serde::{Deserialize, Serialize};

use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};

/// Column/bar rectangle in data space.
///
/// `top` is the value end and `bottom` the origin (or the stack start); for
/// negative values `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSegment {
    pub index: usize,
    /// Slot position on the x axis: the raw x value, or the bucket position
    /// in grouped mode.
    pub x_data: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Straight line between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start_index: usize,
    pub end_index: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Vertex list shared by the fast line family.
///
/// `indices[k]` is the source index of `points[k]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolylineSegment {
    pub indices: Vec<usize>,
    pub points: Vec<Point>,
}

impl PolylineSegment {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, index: usize, point: Point) {
        self.indices.push(index);
        self.points.push(point);
    }

    /// Overwrites vertices in place, reusing the existing allocations.
    pub fn patch_from(&mut self, other: &Self) {
        self.indices.clear();
        self.indices.extend_from_slice(&other.indices);
        self.points.clear();
        self.points.extend_from_slice(&other.points);
    }
}

/// Scatter anchor; `width`/`height` are pixel extents of the marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterSegment {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Funnel/pyramid slice in normalized plot coordinates.
///
/// `top` and `height` are fractions of the plot height measured from the
/// top edge; widths are fractions of the plot width, centered horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangularSegment {
    pub index: usize,
    pub value: f64,
    pub top: f64,
    pub height: f64,
    pub top_width: f64,
    pub bottom_width: f64,
    pub exploded: bool,
}

impl TriangularSegment {
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn vertical_center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Rect(RectSegment),
    Line(LineSegment),
    Polyline(PolylineSegment),
    Scatter(ScatterSegment),
    Triangular(TriangularSegment),
}

impl Segment {
    fn same_shape(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Updates `self` from `fresh` without reallocating polyline buffers.
    fn patch_from(&mut self, fresh: &Self) {
        match (self, fresh) {
            (Self::Polyline(current), Self::Polyline(next)) => current.patch_from(next),
            (current, next) => *current = next.clone(),
        }
    }
}

/// Ordered segment list owned by one series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentCollection {
    items: Vec<Segment>,
}

impl SegmentCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, segment: Segment) {
        self.items.push(segment);
    }

    pub fn replace(&mut self, position: usize, segment: Segment) -> ChartResult<Segment> {
        let slot = self.items.get_mut(position).ok_or_else(|| {
            ChartError::InvalidData(format!("segment position {position} is out of range"))
        })?;
        Ok(std::mem::replace(slot, segment))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Segment> {
        self.items.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.items.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Segment] {
        &self.items
    }

    /// Patches in place when `fresh` has the same length and shapes.
    ///
    /// Returns `false` (and leaves `self` untouched) when a rebuild is needed.
    pub fn patch(&mut self, fresh: &Self) -> bool {
        let compatible = self.items.len() == fresh.items.len()
            && self
                .items
                .iter()
                .zip(&fresh.items)
                .all(|(current, next)| current.same_shape(next));
        if !compatible {
            return false;
        }
        for (current, next) in self.items.iter_mut().zip(&fresh.items) {
            current.patch_from(next);
        }
        true
    }

    /// Clears and refills from `fresh`.
    pub fn rebuild(&mut self, fresh: Self) {
        self.items = fresh.items;
    }
}

impl<'a> IntoIterator for &'a SegmentCollection {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
