use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{PixelRect, Point};
use crate::render::{PolylinePrimitive, SeriesFrame};

/// Pixel distance under which a line segment is treated as vertical.
pub const VERTICAL_SEGMENT_TOLERANCE_PX: f64 = 2.0;

#[must_use]
pub fn rect_contains(rect: PixelRect, point: Point) -> bool {
    rect.contains(point)
}

/// Normalized ellipse equation `(dx/rx)² + (dy/ry)² <= 1`.
#[must_use]
pub fn ellipse_contains(center: Point, radius_x: f64, radius_y: f64, point: Point) -> bool {
    if !(radius_x > 0.0 && radius_y > 0.0) {
        return false;
    }
    let dx = (point.x - center.x) / radius_x;
    let dy = (point.y - center.y) / radius_y;
    dx * dx + dy * dy <= 1.0
}

/// Ray-casting test: an odd number of edge crossings means inside.
#[must_use]
pub fn point_in_polygon(polygon: &[Point], point: Point) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut previous = polygon[polygon.len() - 1];
    for &current in polygon {
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing_x = (previous.x - current.x) * (point.y - current.y)
                / (previous.y - current.y)
                + current.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

/// Final state of a binary search over ascending values.
///
/// On a miss the loop ends with `low == high + 1`, so `(high, low)` brackets
/// the probe; either side may fall outside the slice at the edges. On an
/// exact hit `low == high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub low: isize,
    pub high: isize,
}

impl Bracket {
    #[must_use]
    pub fn is_exact(self) -> bool {
        self.low == self.high
    }

    /// Neighbouring pairs `(left, right)` that may contain the probe.
    #[must_use]
    pub fn candidate_pairs(self, len: usize) -> SmallVec<[(usize, usize); 2]> {
        let len = len as isize;
        let mut pairs = SmallVec::new();
        let mut push = |left: isize, right: isize| {
            if left >= 0 && right < len && left < right {
                pairs.push((left as usize, right as usize));
            }
        };
        if self.is_exact() {
            push(self.low - 1, self.low);
            push(self.low, self.low + 1);
        } else {
            push(self.high, self.low);
        }
        pairs
    }
}

#[must_use]
pub fn bracket_by_binary_search(xs: &[f64], x: f64) -> Bracket {
    let mut low: isize = 0;
    let mut high: isize = xs.len() as isize - 1;
    while low <= high {
        let mid = (low + high) / 2;
        let value = xs[mid as usize];
        if value < x {
            low = mid + 1;
        } else if value > x {
            high = mid - 1;
        } else {
            return Bracket {
                low: mid,
                high: mid,
            };
        }
    }
    Bracket { low, high }
}

/// Stroke outline of the segment `a`-`b` with the given half thickness.
///
/// The segment is rotated into its own frame, widened on both sides and
/// rotated back, so the quad follows the stroke at any angle.
#[must_use]
pub fn stroke_quad(a: Point, b: Point, half_thickness: f64) -> SmallVec<[Point; 4]> {
    let angle = (b.y - a.y).atan2(b.x - a.x);
    let length = (b.x - a.x).hypot(b.y - a.y);
    let (sin, cos) = angle.sin_cos();
    let rotate_back = |x: f64, y: f64| Point::new(a.x + x * cos - y * sin, a.y + x * sin + y * cos);

    let mut quad = SmallVec::new();
    quad.push(rotate_back(0.0, -half_thickness));
    quad.push(rotate_back(length, -half_thickness));
    quad.push(rotate_back(length, half_thickness));
    quad.push(rotate_back(0.0, half_thickness));
    quad
}

fn segment_hit(a: Point, b: Point, cursor: Point, half_thickness: f64) -> bool {
    if (a.x - b.x).abs() <= VERTICAL_SEGMENT_TOLERANCE_PX {
        let (min, max) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        return cursor.y >= min - half_thickness && cursor.y <= max + half_thickness;
    }
    point_in_polygon(&stroke_quad(a, b, half_thickness), cursor)
}

/// Segment of a polyline hit by the cursor, as positions into the vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHit {
    pub start: usize,
    pub end: usize,
}

impl LineHit {
    /// Endpoint closer to `cursor` along x.
    #[must_use]
    pub fn closer_endpoint(self, points: &[Point], cursor: Point) -> usize {
        let start = (points[self.start].x - cursor.x).abs();
        let end = (points[self.end].x - cursor.x).abs();
        if end < start { self.end } else { self.start }
    }
}

/// Hit-tests a stroked polyline whose vertices are ascending in x.
#[must_use]
pub fn hit_test_line(points: &[Point], cursor: Point, stroke_thickness: f64) -> Option<LineHit> {
    if points.len() < 2 || !cursor.is_finite() {
        return None;
    }
    let xs: Vec<f64> = points.iter().map(|point| point.x).collect();
    let half_thickness = (stroke_thickness / 2.0).max(0.5);
    stroke_candidate_pairs(&xs, cursor.x, half_thickness)
        .into_iter()
        .find(|&(left, right)| segment_hit(points[left], points[right], cursor, half_thickness))
        .map(|(start, end)| LineHit { start, end })
}

/// Bracketing pairs first, then every pair reaching within `half_thickness`
/// of `x`, so risers sharing one x are found off their exact position.
fn stroke_candidate_pairs(
    xs: &[f64],
    x: f64,
    half_thickness: f64,
) -> SmallVec<[(usize, usize); 4]> {
    let mut pairs: SmallVec<[(usize, usize); 4]> = bracket_by_binary_search(xs, x)
        .candidate_pairs(xs.len())
        .into_iter()
        .collect();
    let first = xs.partition_point(|value| *value < x - half_thickness);
    let last = xs
        .partition_point(|value| *value <= x + half_thickness)
        .min(xs.len() - 1);
    for left in first.saturating_sub(1)..last {
        let pair = (left, left + 1);
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }
    pairs
}

/// Median position among the points inside the tolerance square around
/// `cursor`. The median, not the closest match, is returned on purpose.
#[must_use]
pub fn select_median_index(points: &[Point], cursor: Point, tolerance_px: f64) -> Option<usize> {
    let region = PixelRect::around(cursor, tolerance_px);
    let matches: SmallVec<[usize; 8]> = points
        .iter()
        .enumerate()
        .filter(|(_, point)| region.contains(**point))
        .map(|(position, _)| position)
        .collect();
    if matches.is_empty() {
        return None;
    }
    Some(matches[matches.len() / 2])
}

/// Position of the point with the smallest euclidean distance to `cursor`.
#[must_use]
pub fn nearest_point(points: &[Point], cursor: Point) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| point.is_finite())
        .min_by_key(|(_, point)| OrderedFloat((point.x - cursor.x).hypot(point.y - cursor.y)))
        .map(|(position, _)| position)
}

/// Hit-tests a polyline whose vertices may be in any x order.
fn hit_test_polyline(
    polyline: &PolylinePrimitive,
    cursor: Point,
    tolerance_px: f64,
) -> Option<usize> {
    let mut order: Vec<usize> = (0..polyline.points.len()).collect();
    order.sort_by_key(|&position| OrderedFloat(polyline.points[position].x));
    let sorted: Vec<Point> = order.iter().map(|&position| polyline.points[position]).collect();

    if let Some(position) = select_median_index(&sorted, cursor, tolerance_px) {
        return Some(polyline.indices[order[position]]);
    }
    hit_test_line(&sorted, cursor, polyline.stroke_width)
        .map(|hit| polyline.indices[order[hit.closer_endpoint(&sorted, cursor)]])
}

/// Source index under `cursor` in a projected series, topmost shape first.
#[must_use]
pub fn hit_test_frame(frame: &SeriesFrame, cursor: Point, tolerance_px: f64) -> Option<usize> {
    if !cursor.is_finite() {
        return None;
    }

    if let Some(polygon) = frame
        .polygons
        .iter()
        .rev()
        .find(|polygon| point_in_polygon(&polygon.points, cursor))
    {
        return Some(polygon.index);
    }
    if let Some(rect) = frame
        .rects
        .iter()
        .rev()
        .find(|rect| rect_contains(rect.rect, cursor))
    {
        return Some(rect.index);
    }
    if let Some(ellipse) = frame.ellipses.iter().rev().find(|ellipse| {
        ellipse_contains(ellipse.center, ellipse.radius_x, ellipse.radius_y, cursor)
    }) {
        return Some(ellipse.index);
    }
    if let Some(index) = frame
        .polylines
        .iter()
        .rev()
        .find_map(|polyline| hit_test_polyline(polyline, cursor, tolerance_px))
    {
        return Some(index);
    }
    if let Some(index) = frame.lines.iter().rev().find_map(|line| {
        let points = [line.start, line.end];
        let indices = [line.start_index, line.end_index];
        if let Some(position) = select_median_index(&points, cursor, tolerance_px) {
            return Some(indices[position]);
        }
        let (points, indices) = if line.start.x <= line.end.x {
            (points, indices)
        } else {
            ([line.end, line.start], [line.end_index, line.start_index])
        };
        hit_test_line(&points, cursor, line.stroke_width)
            .map(|hit| indices[hit.closer_endpoint(&points, cursor)])
    }) {
        return Some(index);
    }

    // Line-family labels sit on the vertices, isolated samples included.
    if !frame.kind.is_line_family() {
        return None;
    }
    let anchors: Vec<Point> = frame.labels.iter().map(|label| label.anchor).collect();
    select_median_index(&anchors, cursor, tolerance_px).map(|position| frame.labels[position].index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_reports_exact_hits() {
        let bracket = bracket_by_binary_search(&[0.0, 10.0, 20.0], 10.0);
        assert!(bracket.is_exact());
        assert_eq!(bracket.candidate_pairs(3).as_slice(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn bracket_outside_range_has_no_pairs() {
        let bracket = bracket_by_binary_search(&[0.0, 10.0], 25.0);
        assert_eq!(bracket, Bracket { low: 2, high: 1 });
        assert!(bracket.candidate_pairs(2).is_empty());
    }

    #[test]
    fn step_riser_is_hit_within_half_stroke() {
        let points = [
            Point::new(0.0, 200.0),
            Point::new(100.0, 200.0),
            Point::new(100.0, 0.0),
            Point::new(200.0, 0.0),
        ];
        assert_eq!(
            hit_test_line(&points, Point::new(100.5, 100.0), 2.0),
            Some(LineHit { start: 1, end: 2 })
        );
        assert_eq!(hit_test_line(&points, Point::new(104.0, 100.0), 2.0), None);
    }

    #[test]
    fn stroke_quad_of_horizontal_segment_is_axis_aligned() {
        let quad = stroke_quad(Point::new(0.0, 5.0), Point::new(10.0, 5.0), 2.0);
        assert!((quad[0].y - 3.0).abs() <= 1e-9);
        assert!((quad[2].x - 10.0).abs() <= 1e-9);
        assert!((quad[2].y - 7.0).abs() <= 1e-9);
    }
}
