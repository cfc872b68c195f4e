//! Browser tests for the wasm facade. Run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use visigen_engine::SceneEngine;

wasm_bindgen_test_configure!(run_in_browser);

const SCENE: &str = r#"{ "environment": { "type": "incline", "angle": 30 }, "objects": [{ "type": "sphere" }, { "type": "box" }] }"#;

#[wasm_bindgen_test]
fn load_tick_and_read_transforms() {
    let mut engine = SceneEngine::new();
    assert_eq!(engine.state(), "idle");

    engine.load_scene(SCENE).unwrap();
    assert_eq!(engine.state(), "running");
    assert_eq!(engine.body_count(), 2);

    engine.tick(1.0 / 60.0);
    assert_eq!(engine.transforms_len(), 2 * SceneEngine::transform_stride());
    assert_eq!(engine.transforms().length() as usize, engine.transforms_len());
}

#[wasm_bindgen_test]
fn replay_requests_coalesce_within_a_frame() {
    let mut engine = SceneEngine::new();
    engine.load_scene(SCENE).unwrap();
    assert_eq!(engine.request_replay(), "applied");
    assert_eq!(engine.request_replay(), "coalesced");
    assert_eq!(engine.state(), "resetting");
    engine.tick(1.0 / 60.0);
    assert_eq!(engine.state(), "running");
}

#[wasm_bindgen_test]
fn bad_scene_is_rejected_and_previous_kept() {
    let mut engine = SceneEngine::new();
    engine.load_scene(SCENE).unwrap();
    assert!(engine.load_scene("{").is_err());
    assert_eq!(engine.body_count(), 2);
    assert!(engine.scene_json().is_some());

    engine.teardown();
    assert_eq!(engine.state(), "idle");
    assert_eq!(engine.transforms_len(), 0);
    assert_eq!(engine.placement_errors_json(), "[]");
}
