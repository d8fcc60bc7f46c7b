pub mod axis;
pub mod builders;
pub mod layout;
pub mod primitives;
pub mod segments;
pub mod stacking;
pub mod types;
pub mod values;

pub use axis::{Axis, AxisRange, CartesianTransformer, LinearAxis};
pub use builders::{
    AccumulationBased, BuildContext, Clusterable, FunnelMode, PyramidMode, RegenerationMode,
    RegenerationOutcome, SegmentAccumulator, SegmentParams, SegmentStrategy, SeriesKind,
    Stackable, line_vertices, regenerate, surface_height,
};
pub use layout::{
    ClusterEntry, ClusterSlot, SideBySideInfo, assign_cluster_slots, side_by_side_info,
};
pub use segments::{
    LineSegment, PolylineSegment, RectSegment, ScatterSegment, Segment, SegmentCollection,
    TriangularSegment,
};
pub use stacking::{CumulativeStack, StackMember, StackingMode, compute_stack_group};
pub use types::{DataPoint, PixelRect, Point, Viewport};
pub use values::{
    BindingPath, CategoryBucket, XValueType, XValues, distinct_category_count,
    group_by_category, resolve_multi_y_values, resolve_x_values, resolve_y_values,
};
