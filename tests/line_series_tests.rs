use chart_series::api::{EngineConfig, SeriesConfig, SeriesEngine, SeriesId};
use chart_series::core::{
    BindingPath, PolylineSegment, RegenerationMode, Segment, SeriesKind, Viewport,
};
use chart_series::interaction::{Bracket, bracket_by_binary_search};
use chart_series::render::NullRenderer;
use serde_json::{Value, json};

fn engine() -> SeriesEngine<NullRenderer> {
    let config = EngineConfig::new(Viewport::new(400, 100), 0.0, 4.0).with_y_range(0.0, 100.0);
    SeriesEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn records(values: &[Option<f64>]) -> Vec<Value> {
    values.iter().map(|y| json!({ "y": y })).collect()
}

fn add(engine: &mut SeriesEngine<NullRenderer>, kind: SeriesKind, values: &[Option<f64>]) -> SeriesId {
    let id = engine
        .add_series(SeriesConfig::new(kind, BindingPath::parse("y").expect("path")))
        .expect("add");
    engine.set_data(id, records(values)).expect("data");
    id
}

fn polyline(engine: &SeriesEngine<NullRenderer>, id: SeriesId) -> PolylineSegment {
    match engine.series(id).expect("series").segments().get(0) {
        Some(Segment::Polyline(polyline)) => polyline.clone(),
        other => panic!("expected polyline, got {other:?}"),
    }
}

#[test]
fn line_segments_connect_consecutive_defined_samples() {
    let mut engine = engine();
    let id = add(
        &mut engine,
        SeriesKind::Line,
        &[Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)],
    );
    engine.regenerate(RegenerationMode::Rebuild);

    let pairs: Vec<(usize, usize)> = engine
        .series(id)
        .expect("series")
        .segments()
        .iter()
        .filter_map(|segment| match segment {
            Segment::Line(line) => Some((line.start_index, line.end_index)),
            _ => None,
        })
        .collect();
    assert_eq!(pairs, vec![(0, 1), (3, 4)]);
}

#[test]
fn fast_line_emits_one_polyline_without_missing_vertices() {
    let mut engine = engine();
    let id = add(
        &mut engine,
        SeriesKind::FastLine,
        &[Some(1.0), Some(2.0), None, Some(4.0)],
    );
    engine.regenerate(RegenerationMode::Rebuild);

    assert_eq!(engine.series(id).expect("series").segments().len(), 1);
    let polyline = polyline(&engine, id);
    assert_eq!(polyline.indices, vec![0, 1, 3]);
    assert!((polyline.points[2].x - 3.0).abs() <= 1e-12);
    assert!((polyline.points[2].y - 4.0).abs() <= 1e-12);
}

#[test]
fn step_line_doubles_interior_vertices() {
    let mut engine = engine();
    let id = add(
        &mut engine,
        SeriesKind::FastStepLine,
        &[Some(1.0), Some(3.0), Some(2.0), Some(5.0)],
    );
    engine.regenerate(RegenerationMode::Rebuild);

    let polyline = polyline(&engine, id);
    assert_eq!(polyline.len(), 7);
    // Each riser starts at the previous value.
    assert!((polyline.points[3].y - 3.0).abs() <= 1e-12);
    assert!((polyline.points[3].x - 2.0).abs() <= 1e-12);
}

#[test]
fn empty_series_produces_no_segments() {
    let mut engine = engine();
    let id = add(&mut engine, SeriesKind::FastLine, &[]);
    engine.regenerate(RegenerationMode::Rebuild);
    assert!(engine.series(id).expect("series").segments().is_empty());
}

#[test]
fn grouped_line_uses_one_vertex_per_category() {
    let mut engine = engine();
    let config = SeriesConfig::for_fields(SeriesKind::FastLine, "label", "y")
        .expect("paths")
        .with_arrange_by_index(false);
    let id = engine.add_series(config).expect("add");
    engine
        .set_data(
            id,
            vec![
                json!({"label": "a", "y": 3.0}),
                json!({"label": "b", "y": 2.0}),
                json!({"label": "a", "y": 7.0}),
            ],
        )
        .expect("data");
    engine.regenerate(RegenerationMode::Rebuild);

    let polyline = polyline(&engine, id);
    assert_eq!(polyline.indices, vec![2, 1]);
    assert!((polyline.points[0].x - 0.0).abs() <= 1e-12);
    assert!((polyline.points[0].y - 7.0).abs() <= 1e-12);
    assert!((polyline.points[1].x - 1.0).abs() <= 1e-12);
}

#[test]
fn binary_search_brackets_a_probe_between_samples() {
    let bracket = bracket_by_binary_search(&[0.0, 10.0, 20.0], 15.0);
    assert_eq!(bracket, Bracket { low: 2, high: 1 });
    assert_eq!(bracket.candidate_pairs(3).as_slice(), &[(1, 2)]);
}

#[test]
fn pointer_on_stroke_resolves_to_closer_endpoint() {
    let mut engine = engine();
    let id = add(
        &mut engine,
        SeriesKind::FastLine,
        &[Some(10.0), Some(50.0), Some(90.0)],
    );
    engine.regenerate(RegenerationMode::Rebuild);

    // Vertices project to (0, 90), (100, 50), (200, 10).
    let hit = engine.hit_test(170.0, 22.0).expect("hit test").expect("hit");
    assert_eq!(hit.series, id);
    assert_eq!(hit.index, 2);

    assert_eq!(engine.hit_test(170.0, 80.0).expect("hit test"), None);
}

#[test]
fn pointer_on_vertex_prefers_vertex_match() {
    let mut engine = engine();
    let id = add(
        &mut engine,
        SeriesKind::Line,
        &[Some(10.0), Some(50.0), Some(90.0)],
    );
    engine.regenerate(RegenerationMode::Rebuild);

    let index = engine
        .hit_test_series(id, 101.0, 49.0)
        .expect("hit test")
        .expect("hit");
    assert_eq!(index, 1);
}

#[test]
fn isolated_line_samples_keep_labels_and_hit_geometry() {
    let mut engine = engine();
    let id = add(&mut engine, SeriesKind::Line, &[None, Some(50.0), None]);
    engine.regenerate(RegenerationMode::Rebuild);

    let series = engine.series(id).expect("series");
    assert!(series.segments().is_empty());
    let adornments = series.adornments();
    assert_eq!(adornments.len(), 3);
    assert!(adornments[0].is_none() && adornments[2].is_none());
    let label = adornments[1].expect("isolated sample label");
    assert!((label.x - 1.0).abs() <= 1e-12);
    assert!((label.y - 50.0).abs() <= 1e-12);

    // x=1 sits at 100 px, y=50 at 50 px.
    let hit = engine.hit_test(100.0, 50.0).expect("hit test").expect("hit");
    assert_eq!(hit.index, 1);
    assert!(engine.hit_test(140.0, 50.0).expect("hit test").is_none());
}

#[test]
fn single_sample_line_is_hit_at_its_vertex() {
    let mut engine = engine();
    let id = add(&mut engine, SeriesKind::Line, &[Some(50.0)]);
    engine.regenerate(RegenerationMode::Rebuild);

    assert_eq!(engine.series(id).expect("series").adornments().len(), 1);
    assert_eq!(engine.hit_test_series(id, 0.0, 50.0).expect("hit test"), Some(0));
}

#[test]
fn step_riser_is_hit_beside_its_exact_x() {
    let mut engine = engine();
    add(&mut engine, SeriesKind::FastStepLine, &[Some(20.0), Some(80.0)]);
    engine.regenerate(RegenerationMode::Rebuild);

    // Riser at x=100 px runs from y=80 px up to y=20 px.
    for x in [100.0, 100.5, 99.5] {
        let hit = engine.hit_test(x, 50.0).expect("hit test").expect("riser hit");
        assert_eq!(hit.index, 1);
    }
    assert!(engine.hit_test(104.0, 50.0).expect("hit test").is_none());
}
