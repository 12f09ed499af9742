use std::path::PathBuf;

use formats::FeatureBatch;
use foundation::math::{Vec2, ViewState, WebMercatorViewport};
use layers::boundaries::BoundariesLayer;
use layers::labels::{PlacementConfig, assemble};
use pretty_assertions::assert_eq;

fn fixture() -> FeatureBatch {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/boundaries.geojson");
    FeatureBatch::read(path).expect("load fixture")
}

fn near(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn labels_visible_boundaries_in_feature_order() {
    let batch = fixture();
    assert_eq!(batch.features.len(), 4);
    assert_eq!(batch.skipped, 1);

    let view = ViewState::new(-3.7, 40.5, 8.0).with_size(1024.0, 768.0);
    let set = assemble(
        &batch.features,
        &WebMercatorViewport::new(view),
        &PlacementConfig::default(),
    );

    let texts: Vec<Option<&str>> = set.iter().map(|l| l.text.as_deref()).collect();
    assert_eq!(
        texts,
        vec![
            Some("Centro"),
            Some("Centro"),
            Some("Norte"),
            Some("Norte"),
            None
        ]
    );
    assert!(set.iter().all(|l| l.weight == 1.0));
}

#[test]
fn simplification_merges_collinear_vertices() {
    // Centro's bottom and top edges carry an extra vertex each; once
    // simplified they are single 0.4 degree edges labelled at their middle.
    let batch = fixture();
    let view = ViewState::new(-3.7, 40.5, 8.0).with_size(1024.0, 768.0);
    let set = assemble(
        &batch.features[..1],
        &WebMercatorViewport::new(view),
        &PlacementConfig::default(),
    );
    assert_eq!(set.len(), 2);
    assert!(set.iter().any(|l| near(l.position, Vec2::new(-3.7, 40.3))));
    assert!(set.iter().any(|l| near(l.position, Vec2::new(-3.7, 40.5))));
}

#[test]
fn zooming_in_adds_labels_on_long_edges() {
    let batch = fixture();
    let view = ViewState::new(-3.7, 40.4, 10.0).with_size(1024.0, 768.0);
    let set = assemble(
        &batch.features,
        &WebMercatorViewport::new(view),
        &PlacementConfig::default(),
    );
    let centro = set
        .iter()
        .filter(|l| l.text.as_deref() == Some("Centro"))
        .count();
    assert_eq!(centro, 6);
}

#[test]
fn nothing_is_labelled_off_screen() {
    let batch = fixture();
    let view = ViewState::new(100.0, -20.0, 8.0).with_size(1024.0, 768.0);
    let set = assemble(
        &batch.features,
        &WebMercatorViewport::new(view),
        &PlacementConfig::default(),
    );
    assert!(set.is_empty());
}

#[test]
fn layer_serves_the_same_labels_as_a_direct_pass() {
    let batch = fixture();
    let view = ViewState::new(-3.7, 40.5, 8.0).with_size(1024.0, 768.0);

    let mut layer = BoundariesLayer::new(7, PlacementConfig::default());
    layer.begin_fetch();
    layer.features_loaded(batch.features.clone());
    layer.set_view_state(view);

    let direct = assemble(
        &batch.features,
        &WebMercatorViewport::new(view),
        &PlacementConfig::default(),
    );
    assert_eq!(*layer.labels(), direct);
}

#[test]
fn label_set_serializes_as_flat_records() {
    let batch = fixture();
    let view = ViewState::new(-3.7, 40.5, 8.0).with_size(1024.0, 768.0);
    let set = assemble(
        &batch.features[3..],
        &WebMercatorViewport::new(view),
        &PlacementConfig::default(),
    );
    let json = serde_json::to_value(&set).expect("serialize");
    let records = json.as_array().expect("array");
    assert_eq!(records.len(), 1);
    assert!(records[0]["text"].is_null());
    assert_eq!(records[0]["position"].as_array().map(Vec::len), Some(2));
    assert_eq!(records[0]["weight"], serde_json::json!(1.0));
}
