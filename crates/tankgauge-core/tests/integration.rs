//! Integration tests for tankgauge-core.
//!
//! These tests verify the public API works correctly end-to-end.

use tankgauge_core::{
    flatten_path, Color, DrawCommand, Easing, NodeId, PathSegment, Point, RecordingScene, Scene,
    TextStyle, Timing, Transform2D, TransitionSet,
};

// =============================================================================
// Color Integration Tests
// =============================================================================

#[test]
fn test_color_roundtrip_hex() {
    let original = Color::rgb(0.5, 0.25, 0.75);
    let hex = original.to_hex();
    let parsed = Color::from_hex(&hex).expect("valid hex");

    assert!((original.r - parsed.r).abs() < 0.01);
    assert!((original.g - parsed.g).abs() < 0.01);
    assert!((original.b - parsed.b).abs() < 0.01);
}

#[test]
fn test_color_lerp_gradient() {
    let steps: Vec<Color> = (0..=10)
        .map(|i| Color::RED.lerp(&Color::BLUE, i as f32 / 10.0))
        .collect();

    assert_eq!(steps[0], Color::RED);
    assert!((steps[10].b - 1.0).abs() < 0.01);
    assert!(steps[5].r > 0.4 && steps[5].r < 0.6);
}

// =============================================================================
// Transition Integration Tests
// =============================================================================

#[test]
fn test_height_transition_frames() {
    let mut set: TransitionSet<&str, f64> = TransitionSet::new();
    set.set("clip", 101.5);
    set.start("clip", -10.15, 0.0, Timing::default());

    let mut last = 101.5;
    for now in (0..=1000).step_by(16) {
        for frame in set.tick(f64::from(now)) {
            assert!(frame.value <= last + 1e-9, "height must not move back up");
            last = frame.value;
        }
    }
    let frames = set.tick(1000.0);
    assert_eq!(frames[0].value, -10.15);
    assert!(frames[0].finished);
}

#[test]
fn test_wave_scroll_loops() {
    let mut set: TransitionSet<&str, f64> = TransitionSet::new();
    set.start_looping(
        "wave",
        -300.0,
        -100.0,
        0.0,
        Timing::new(2000.0).with_easing(Easing::Linear),
    );
    let a = set.tick(1000.0)[0].value;
    let b = set.tick(41_000.0)[0].value;
    assert_eq!(a, b);
    assert!(set.is_animating(&"wave"));
}

// =============================================================================
// Scene Integration Tests
// =============================================================================

#[test]
fn test_recording_scene_snapshot() {
    let mut scene = RecordingScene::new();
    let wave = vec![
        PathSegment::MoveTo(Point::ORIGIN),
        PathSegment::QuadTo {
            ctrl: Point::new(50.0, 3.0),
            to: Point::new(100.0, 0.0),
        },
        PathSegment::LineTo(Point::new(100.0, 200.0)),
        PathSegment::LineTo(Point::new(0.0, 200.0)),
        PathSegment::Close,
    ];
    assert_eq!(flatten_path(&wave, 4).last(), Some(&Point::ORIGIN));

    scene.set_node(
        NodeId(0),
        DrawCommand::ClipPath {
            segments: wave,
            transform: Transform2D::translate(-200.0, 0.0),
        },
    );
    scene.set_node(
        NodeId(1),
        DrawCommand::text("55.0", Point::ORIGIN, TextStyle::default()).clipped_by(NodeId(0)),
    );

    let json = scene.to_json().expect("serializable");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert!(parsed.is_object());
    assert_eq!(parsed.as_object().map(serde_json::Map::len), Some(2));
}
