//! Pixel-space hit-testing for projected series geometry.

pub mod hit_test;

pub use hit_test::{
    Bracket, LineHit, VERTICAL_SEGMENT_TOLERANCE_PX, bracket_by_binary_search, hit_test_frame,
    ellipse_contains, hit_test_line, nearest_point, point_in_polygon, rect_contains,
    select_median_index, stroke_quad,
};
