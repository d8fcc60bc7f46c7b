use chart_series::api::{EngineConfig, SeriesConfig, SeriesEngine, SeriesId};
use chart_series::core::{
    BindingPath, RectSegment, RegenerationMode, Segment, SeriesKind, Viewport,
};
use chart_series::render::NullRenderer;
use serde_json::{Value, json};

fn engine(viewport: Viewport, x_end: f64, y_end: f64) -> SeriesEngine<NullRenderer> {
    let config = EngineConfig::new(viewport, 0.0, x_end).with_y_range(0.0, y_end);
    SeriesEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn y_records(values: &[f64]) -> Vec<Value> {
    values.iter().map(|y| json!({ "y": y })).collect()
}

fn column(kind: SeriesKind) -> SeriesConfig {
    SeriesConfig::new(kind, BindingPath::parse("y").expect("path"))
}

fn rects(engine: &SeriesEngine<NullRenderer>, id: SeriesId) -> Vec<RectSegment> {
    engine
        .series(id)
        .expect("series")
        .segments()
        .iter()
        .filter_map(|segment| match segment {
            Segment::Rect(rect) => Some(*rect),
            _ => None,
        })
        .collect()
}

#[test]
fn single_column_series_spans_full_category_width() {
    let mut engine = engine(Viewport::new(400, 250), 4.0, 250.0);
    let id = engine.add_series(column(SeriesKind::Column)).expect("add");
    engine
        .set_data(id, y_records(&[100.0, 150.0, 110.0, 230.0]))
        .expect("data");
    engine.regenerate(RegenerationMode::Rebuild);

    let rects = rects(&engine, id);
    assert_eq!(rects.len(), 4);
    for (i, (rect, y)) in rects.iter().zip([100.0, 150.0, 110.0, 230.0]).enumerate() {
        assert_eq!(rect.index, i);
        assert!((rect.left - i as f64).abs() <= 1e-9);
        assert!((rect.right - (i + 1) as f64).abs() <= 1e-9);
        assert!((rect.top - y).abs() <= 1e-9);
        assert!(rect.bottom.abs() <= 1e-9);
    }
}

#[test]
fn sibling_columns_split_the_category_in_registration_order() {
    let mut engine = engine(Viewport::new(400, 250), 4.0, 250.0);
    let first = engine.add_series(column(SeriesKind::Column)).expect("add");
    let second = engine.add_series(column(SeriesKind::Column)).expect("add");
    engine.set_data(first, y_records(&[10.0, 20.0])).expect("data");
    engine.set_data(second, y_records(&[30.0, 40.0])).expect("data");
    engine.regenerate(RegenerationMode::Rebuild);

    let first_rects = rects(&engine, first);
    let second_rects = rects(&engine, second);
    assert!((first_rects[1].left - 1.0).abs() <= 1e-9);
    assert!((first_rects[1].right - 1.5).abs() <= 1e-9);
    assert!((second_rects[1].left - 1.5).abs() <= 1e-9);
    assert!((second_rects[1].right - 2.0).abs() <= 1e-9);

    let info = engine.series(second).expect("series").side_by_side().expect("slot");
    assert!((info.delta - 0.5).abs() <= 1e-12);
}

#[test]
fn segment_spacing_shrinks_rectangles_symmetrically() {
    let mut engine = engine(Viewport::new(400, 250), 4.0, 250.0);
    let id = engine
        .add_series(column(SeriesKind::Column).with_segment_spacing(0.2))
        .expect("add");
    engine.set_data(id, y_records(&[5.0])).expect("data");
    engine.regenerate(RegenerationMode::Rebuild);

    let rect = rects(&engine, id)[0];
    assert!((rect.left - 0.1).abs() <= 1e-9);
    assert!((rect.right - 0.9).abs() <= 1e-9);
    assert!((rect.x_data - 0.0).abs() <= 1e-12);
}

#[test]
fn missing_values_produce_no_rectangle() {
    let mut engine = engine(Viewport::new(400, 250), 4.0, 250.0);
    let id = engine.add_series(column(SeriesKind::Column)).expect("add");
    engine
        .set_data(
            id,
            vec![json!({"y": 1.0}), json!({"y": null}), json!({}), json!({"y": 4.0})],
        )
        .expect("data");
    engine.regenerate(RegenerationMode::Rebuild);

    let indices: Vec<usize> = rects(&engine, id).iter().map(|rect| rect.index).collect();
    assert_eq!(indices, vec![0, 3]);
    assert_eq!(engine.series(id).expect("series").data_points().len(), 4);
}

#[test]
fn hidden_column_releases_its_slot() {
    let mut engine = engine(Viewport::new(400, 250), 4.0, 250.0);
    let hidden = engine
        .add_series(column(SeriesKind::Column).with_visible(false))
        .expect("add");
    let shown = engine.add_series(column(SeriesKind::Column)).expect("add");
    engine.set_data(hidden, y_records(&[1.0])).expect("data");
    engine.set_data(shown, y_records(&[2.0])).expect("data");
    engine.regenerate(RegenerationMode::Rebuild);

    assert!(rects(&engine, hidden).is_empty());
    let rect = rects(&engine, shown)[0];
    assert!((rect.left - 0.0).abs() <= 1e-9);
    assert!((rect.right - 1.0).abs() <= 1e-9);
}

#[test]
fn bar_series_projects_with_transposed_axes() {
    let mut engine = engine(Viewport::new(400, 400), 4.0, 200.0);
    let id = engine.add_series(column(SeriesKind::Bar)).expect("add");
    engine.set_data(id, y_records(&[100.0])).expect("data");
    engine.regenerate(RegenerationMode::Rebuild);

    let frame = engine.build_frame().expect("frame");
    let rect = frame.series[0].rects[0].rect;
    assert!((rect.left - 0.0).abs() <= 1e-9);
    assert!((rect.right - 200.0).abs() <= 1e-9);
    assert!((rect.top - 300.0).abs() <= 1e-9);
    assert!((rect.bottom - 400.0).abs() <= 1e-9);
}

#[test]
fn category_grouping_stacks_members_on_distinct_positions() {
    let mut engine = engine(Viewport::new(400, 250), 2.0, 10.0);
    let config = SeriesConfig::for_fields(SeriesKind::Column, "label", "y")
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

    let placed: Vec<(usize, f64)> = rects(&engine, id)
        .iter()
        .map(|rect| (rect.index, rect.x_data))
        .collect();
    assert_eq!(placed, vec![(2, 0.0), (0, 0.0), (1, 1.0)]);

    let series = engine.series(id).expect("series");
    assert!(series.is_grouped());
    assert_eq!(series.x_values().categories.len(), 2);
}

#[test]
fn render_counts_projected_rectangles() {
    let mut engine = engine(Viewport::new(400, 250), 4.0, 250.0);
    let id = engine.add_series(column(SeriesKind::Column)).expect("add");
    engine
        .set_data(id, y_records(&[100.0, 150.0, 110.0, 230.0]))
        .expect("data");
    engine.regenerate(RegenerationMode::Rebuild);
    engine.render().expect("render");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_series_count, 1);
    assert_eq!(renderer.last_shape_count, 4);
    assert_eq!(renderer.last_label_count, 4);
}
