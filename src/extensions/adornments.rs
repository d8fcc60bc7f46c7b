use serde::{Deserialize, Serialize};

use crate::core::{Point, Segment, SegmentCollection};

/// Vertical alignment of a data label relative to its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AdornmentPosition {
    /// Higher of the value end and the origin.
    #[default]
    Top,
    /// Lower of the two anchors, usually the origin.
    Bottom,
    /// Midpoint between the anchors.
    Center,
}

/// Data-label anchor for one source index.
///
/// Cartesian anchors are in data space. Accumulation anchors are normalized
/// plot fractions (`x` centered at 0.5, `y` measured from the top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adornment {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub accumulation: bool,
    /// Follows an exploded slice; projection shifts it with the slice.
    #[serde(default)]
    pub exploded: bool,
}

/// Picks the label y from a segment's value end and origin.
#[must_use]
pub fn label_anchor(value_end: f64, origin: f64, position: AdornmentPosition) -> f64 {
    match position {
        AdornmentPosition::Top => value_end.max(origin),
        AdornmentPosition::Bottom => value_end.min(origin),
        AdornmentPosition::Center => (value_end + origin) / 2.0,
    }
}

/// Builds one adornment slot per source index.
///
/// Indices without a segment (missing values, toggled slices) keep a `None`
/// slot so the list stays aligned with `y`. Point-like segments (lines,
/// scatter) anchor on the point regardless of `position`.
#[must_use]
pub fn build_adornments(
    segments: &SegmentCollection,
    y: &[f64],
    position: AdornmentPosition,
) -> Vec<Option<Adornment>> {
    let mut slots: Vec<Option<Adornment>> = vec![None; y.len()];
    let value_at = |index: usize| y.get(index).copied().unwrap_or(f64::NAN);
    let mut place = |index: usize, x: f64, anchor: f64, accumulation: bool, exploded: bool| {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(Adornment {
                index,
                x,
                y: anchor,
                value: value_at(index),
                accumulation,
                exploded,
            });
        }
    };

    for segment in segments {
        match segment {
            Segment::Rect(rect) => place(
                rect.index,
                (rect.left + rect.right) / 2.0,
                label_anchor(rect.top, rect.bottom, position),
                false,
                false,
            ),
            Segment::Line(line) => {
                place(line.start_index, line.x1, line.y1, false, false);
                place(line.end_index, line.x2, line.y2, false, false);
            }
            // Step lines repeat an index; the last vertex of an index is the
            // sample itself.
            Segment::Polyline(polyline) => {
                for (index, point) in polyline.indices.iter().zip(&polyline.points) {
                    place(*index, point.x, point.y, false, false);
                }
            }
            Segment::Scatter(scatter) => {
                place(scatter.index, scatter.x, scatter.y, false, false);
            }
            Segment::Triangular(slice) => {
                place(slice.index, 0.5, slice.vertical_center(), true, slice.exploded);
            }
        }
    }
    slots
}

/// Fills empty slots with point anchors at line vertices.
///
/// Line segments only carry samples that have a defined neighbour; an
/// isolated sample is labelled from its vertex here. Occupied slots are kept.
pub fn place_vertex_adornments(
    slots: &mut [Option<Adornment>],
    vertices: &[(usize, Point)],
    y: &[f64],
) {
    for &(index, vertex) in vertices {
        let Some(slot) = slots.get_mut(index) else {
            continue;
        };
        if slot.is_none() {
            *slot = Some(Adornment {
                index,
                x: vertex.x,
                y: vertex.y,
                value: y.get(index).copied().unwrap_or(f64::NAN),
                accumulation: false,
                exploded: false,
            });
        }
    }
}
