use chart_series::core::{
    BuildContext, FunnelMode, PyramidMode, Segment, SegmentAccumulator, SegmentParams,
    SeriesKind,
};
use proptest::prelude::*;

fn slice_heights(kind: SeriesKind, y: &[f64], params: &SegmentParams) -> Vec<f64> {
    let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
    let ctx = BuildContext::new(&x, y, params);
    let mut acc = SegmentAccumulator::new();
    kind.strategy().build(&ctx, &mut acc);
    acc.segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Triangular(slice) => Some(slice.height),
            _ => None,
        })
        .collect()
}

fn kinds() -> impl Strategy<Value = (SeriesKind, SegmentParams)> {
    prop_oneof![
        Just((SeriesKind::Funnel, FunnelMode::ValueIsHeight, PyramidMode::Linear)),
        Just((SeriesKind::Funnel, FunnelMode::ValueIsWidth, PyramidMode::Linear)),
        Just((SeriesKind::Pyramid, FunnelMode::ValueIsHeight, PyramidMode::Linear)),
        Just((SeriesKind::Pyramid, FunnelMode::ValueIsHeight, PyramidMode::Surface)),
    ]
    .prop_map(|(kind, funnel_mode, pyramid_mode)| {
        (
            kind,
            SegmentParams {
                funnel_mode,
                pyramid_mode,
                ..SegmentParams::default()
            },
        )
    })
}

proptest! {
    #[test]
    fn heights_and_gaps_fill_the_plot(
        values in proptest::collection::vec(0.1f64..1_000.0, 1..24),
        gap_ratio in 0.0f64..0.9,
        (kind, params) in kinds()
    ) {
        let params = SegmentParams { gap_ratio, ..params };
        let heights = slice_heights(kind, &values, &params);
        prop_assert_eq!(heights.len(), values.len());

        let gap = if values.len() > 1 { gap_ratio } else { 0.0 };
        let total: f64 = heights.iter().sum();
        prop_assert!((total + gap - 1.0).abs() <= 1e-6);
        prop_assert!(heights.iter().all(|h| *h >= 0.0));
    }

    #[test]
    fn slices_never_overlap(
        values in proptest::collection::vec(0.1f64..1_000.0, 1..24),
        gap_ratio in 0.0f64..0.9
    ) {
        let params = SegmentParams { gap_ratio, ..SegmentParams::default() };
        let x: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        let ctx = BuildContext::new(&x, &values, &params);
        let mut acc = SegmentAccumulator::new();
        SeriesKind::Pyramid.strategy().build(&ctx, &mut acc);

        let slices: Vec<_> = acc
            .segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Triangular(slice) => Some(*slice),
                _ => None,
            })
            .collect();
        prop_assert_eq!(slices.len(), acc.segments.len());

        let mut previous_bottom = 0.0;
        for slice in &slices {
            prop_assert!(slice.top >= previous_bottom - 1e-9);
            previous_bottom = slice.bottom();
        }
        prop_assert!(previous_bottom <= 1.0 + 1e-9);
    }
}
