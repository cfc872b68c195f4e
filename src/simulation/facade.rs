use wasm_bindgen::prelude::*;

use crate::core::config::EngineConfig;
use crate::systems::runtime::DefaultRuntime;

use super::{SimulationSession, TRANSFORM_STRIDE};

/// JavaScript handle to one scene session.
///
/// The renderer calls `tick` once per animation frame, then reads
/// `transforms()` (or the zero-copy `transformsPtr`/`transformsLen` view into
/// wasm memory) and applies them to its meshes.
#[wasm_bindgen]
pub struct SceneEngine {
    session: SimulationSession<DefaultRuntime>,
    transform_buffer: Vec<f32>,
}

impl SceneEngine {
    fn from_config(config: EngineConfig) -> Self {
        Self {
            session: SimulationSession::with_config(DefaultRuntime::default(), config),
            transform_buffer: Vec::new(),
        }
    }

    fn refresh_transforms(&mut self) {
        self.session.write_transforms(&mut self.transform_buffer);
    }
}

impl Default for SceneEngine {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}

#[wasm_bindgen]
impl SceneEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with design constants overridden from JSON (missing keys keep
    /// their defaults).
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<SceneEngine, JsValue> {
        let config = EngineConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("[engine] config override: {:?}", config);
        Ok(Self::from_config(config))
    }

    /// Validate and load a scene payload. On error the previous scene keeps
    /// running.
    #[wasm_bindgen(js_name = loadScene)]
    pub fn load_scene(&mut self, json: &str) -> Result<(), JsValue> {
        self.session
            .load_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.refresh_transforms();
        Ok(())
    }

    /// Returns "applied", "coalesced" or "ignored".
    #[wasm_bindgen(js_name = requestReplay)]
    pub fn request_replay(&mut self) -> String {
        let outcome = self.session.request_replay();
        self.refresh_transforms();
        format!("{:?}", outcome).to_lowercase()
    }

    /// Level of the external replay toggle; replays on the rising edge.
    #[wasm_bindgen(js_name = setReplaySignal)]
    pub fn set_replay_signal(&mut self, level: bool) {
        if self.session.replay_signal(level).is_some() {
            self.refresh_transforms();
        }
    }

    pub fn teardown(&mut self) {
        self.session.teardown();
        self.transform_buffer.clear();
    }

    /// Advance by a frame delta in seconds; returns fixed steps taken.
    pub fn tick(&mut self, dt: f32) -> u32 {
        let steps = self.session.tick(dt);
        self.refresh_transforms();
        steps
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.session.state().as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = bodyCount)]
    pub fn body_count(&self) -> usize {
        self.session.body_count()
    }

    #[wasm_bindgen(getter)]
    pub fn elapsed(&self) -> f32 {
        self.session.elapsed()
    }

    #[wasm_bindgen(getter)]
    pub fn finished(&self) -> bool {
        self.session.is_finished()
    }

    /// Copy of the transform buffer
    pub fn transforms(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.transform_buffer.as_slice())
    }

    /// Pointer into wasm memory; valid until the next mutating call
    #[wasm_bindgen(js_name = transformsPtr)]
    pub fn transforms_ptr(&self) -> *const f32 {
        self.transform_buffer.as_ptr()
    }

    /// Length in floats
    #[wasm_bindgen(js_name = transformsLen)]
    pub fn transforms_len(&self) -> usize {
        self.transform_buffer.len()
    }

    #[wasm_bindgen(js_name = transformStride)]
    pub fn transform_stride() -> usize {
        TRANSFORM_STRIDE
    }

    /// Normalized scene description, or undefined when idle
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> Option<String> {
        self.session.description().map(|d| d.to_json())
    }

    #[wasm_bindgen(js_name = surfaceJson)]
    pub fn surface_json(&self) -> Option<String> {
        self.session.surface().and_then(|s| serde_json::to_string(s).ok())
    }

    #[wasm_bindgen(js_name = fixturesJson)]
    pub fn fixtures_json(&self) -> String {
        to_json_or_empty(&self.session.fixtures())
    }

    #[wasm_bindgen(js_name = placementErrorsJson)]
    pub fn placement_errors_json(&self) -> String {
        to_json_or_empty(self.session.placement_errors())
    }

    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.session.stats()).unwrap_or_else(|_| "{}".to_string())
    }
}

fn to_json_or_empty<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}
