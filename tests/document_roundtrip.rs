//! Integration tests for reading and writing `.kinesketch` documents

use pretty_assertions::assert_eq;

use kinesketch::document::{
    load_file, load_str, parse, save_file, to_json, Canvas, DEFAULT_DOCUMENT_NAME, FORMAT_VERSION,
};
use kinesketch::{DocumentError, LiaisonType, LiaisonView, Palette};

const FOUR_BAR: &str = include_str!("../demos/four_bar.kinesketch");

#[test]
fn test_load_four_bar_demo() {
    let document = load_str(FOUR_BAR, &Palette::default()).unwrap();
    let diagram = &document.diagram;

    assert_eq!(document.name, "Four-bar linkage");
    assert_eq!(
        document.canvas,
        Canvas {
            x: 120.0,
            y: 260.0,
            scale: 1.5
        }
    );
    assert_eq!(document.metadata.created_at, "2024-03-02T10:00:00.000Z");

    assert_eq!(diagram.nodes().len(), 4);
    assert_eq!(diagram.links().len(), 4);
    assert_eq!(diagram.solides().len(), 4);
    assert_eq!(diagram.angle_arcs().len(), 1);

    assert_eq!(diagram.link("l8").unwrap().to_anchor_idx, Some(2));
    assert_eq!(diagram.solide("s3").unwrap().show_frame, Some(true));
    assert_eq!(diagram.angle_arcs()[0].label, "θ");
}

#[test]
fn test_save_and_reload_preserves_everything() {
    let palette = Palette::default();
    let original = load_str(FOUR_BAR, &palette).unwrap();

    let json = to_json(&original).unwrap();
    let reloaded = load_str(&json, &palette).unwrap();

    assert_eq!(reloaded.to_file(), original.to_file());
}

#[test]
fn test_save_file_and_load_file() {
    let palette = Palette::default();
    let mut document = load_str(FOUR_BAR, &palette).unwrap();
    document.diagram.rotate_node("n2", 90.0).unwrap();
    document.name = "Edited".to_string();

    let path = std::env::temp_dir().join(format!("kinesketch-test-{}.kinesketch", std::process::id()));
    save_file(&document, &path).unwrap();
    let reloaded = load_file(&path, &palette);
    let _ = std::fs::remove_file(&path);

    let reloaded = reloaded.unwrap();
    assert_eq!(reloaded.name, "Edited");
    assert_eq!(reloaded.diagram.node("n2").unwrap().rotation, 90.0);
}

#[test]
fn test_written_document_shape() {
    let document = load_str(FOUR_BAR, &Palette::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&to_json(&document).unwrap()).unwrap();

    assert_eq!(value["version"], FORMAT_VERSION);
    assert_eq!(value["links"][0]["fromNodeId"], "n1");
    assert_eq!(value["solides"][0]["isBati"], true);
    assert_eq!(value["angleArcs"][0]["fromSolideId"], "s0");
    // auto endpoints are omitted rather than written as null
    assert!(value["links"][0].get("fromAnchorIdx").is_none());
}

#[test]
fn test_empty_angle_arcs_are_not_written() {
    let document = load_str(
        r#"{ "version": "1.1", "nodes": [{ "id": "n1", "type": "pivot", "x": 0, "y": 0 }] }"#,
        &Palette::default(),
    )
    .unwrap();
    let json = to_json(&document).unwrap();
    assert!(!json.contains("angleArcs"));
}

#[test]
fn test_legacy_document_gets_defaults() {
    let legacy = r#"{
        "version": "1.0",
        "nodes": [
            { "id": "n1", "type": "glissiere", "x": 0, "y": 0 },
            { "id": "n2", "type": "encastrement", "view": 2, "x": 50, "y": 50 }
        ],
        "links": [{ "id": "l3", "fromNodeId": "n1", "toNodeId": "n2", "solideId": "" }]
    }"#;
    let palette = Palette::default();
    let document = load_str(legacy, &palette).unwrap();
    let diagram = &document.diagram;

    assert_eq!(document.name, DEFAULT_DOCUMENT_NAME);
    assert_eq!(document.canvas, Canvas::default());

    let ground = &diagram.solides()[0];
    assert!(ground.is_bati);
    assert_eq!(ground.id, "s0");
    assert_eq!(ground.color, palette.ground_color());

    let n1 = diagram.node("n1").unwrap();
    assert_eq!(n1.view, LiaisonView::First);
    assert_eq!((n1.label_offset_x, n1.label_offset_y), (20.0, -20.0));
    // a weld has one view only
    assert_eq!(diagram.node("n2").unwrap().view, LiaisonView::First);

    let link = diagram.link("l3").unwrap();
    assert_eq!(link.solide_id, "s0");
    assert_eq!((link.label_offset_x, link.label_offset_y), (8.0, -18.0));
}

#[test]
fn test_rotations_are_folded_on_load() {
    let source = r#"{
        "version": "1.1",
        "nodes": [
            { "id": "n1", "type": "pivot", "x": 0, "y": 0, "rotation": 450 },
            { "id": "n2", "type": "glissiere", "x": 50, "y": 0, "rotation": -90 },
            { "id": "n3", "type": "rotule", "x": 100, "y": 0, "rotation": 360 }
        ]
    }"#;
    let document = load_str(source, &Palette::default()).unwrap();
    let rotations: Vec<f64> = document.diagram.nodes().iter().map(|n| n.rotation).collect();
    assert_eq!(rotations, vec![90.0, 270.0, 0.0]);

    // and they are written back folded
    let value: serde_json::Value = serde_json::from_str(&to_json(&document).unwrap()).unwrap();
    assert_eq!(value["nodes"][1]["rotation"], 270.0);
}

#[test]
fn test_loaded_ids_reseed_the_generator() {
    let palette = Palette::default();
    let mut document = load_str(FOUR_BAR, &palette).unwrap();

    // a9 is the highest item id in the demo
    assert_eq!(document.diagram.add_node(LiaisonType::Rotule, 0.0, 0.0), "n10");
    assert_eq!(document.diagram.add_solide(&palette), "s4");
}

#[test]
fn test_rejects_missing_fields() {
    let err = parse(r#"{ "nodes": [] }"#).unwrap_err();
    assert!(matches!(err, DocumentError::MissingField("version")));

    let err = parse(r#"{ "version": "1.1" }"#).unwrap_err();
    assert!(matches!(err, DocumentError::MissingField("nodes")));

    let err = parse(r#"{ "version": "1.1", "nodes": {} }"#).unwrap_err();
    assert!(matches!(err, DocumentError::MissingField("nodes")));
}

#[test]
fn test_rejects_unknown_liaison() {
    let err = parse(r#"{ "version": "1.1", "nodes": [{ "id": "n4", "type": "cardan", "x": 0, "y": 0 }] }"#)
        .unwrap_err();
    match err {
        DocumentError::UnknownLiaison { node, liaison } => {
            assert_eq!(node, "n4");
            assert_eq!(liaison, "cardan");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_rejects_dangling_link() {
    let source = r#"{
        "version": "1.1",
        "nodes": [{ "id": "n1", "type": "pivot", "x": 0, "y": 0 }],
        "links": [{ "id": "l2", "fromNodeId": "n1", "toNodeId": "n7", "solideId": "s0" }]
    }"#;
    let err = load_str(source, &Palette::default()).unwrap_err();
    assert!(matches!(err, DocumentError::DanglingLink { ref node, .. } if node == "n7"));
}

#[test]
fn test_rejects_malformed_json() {
    let err = load_str("{ not json", &Palette::default()).unwrap_err();
    assert!(matches!(err, DocumentError::Json(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("kinesketch-test-does-not-exist.kinesketch");
    let err = load_file(&path, &Palette::default()).unwrap_err();
    assert!(matches!(err, DocumentError::Io(_)));
}
