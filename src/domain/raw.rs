//! Wire format of an incoming scene payload.
//!
//! Mirrors the JSON the scene generator emits. Everything is optional here;
//! the adapter decides defaults. The payload may arrive as the bare scene
//! document or wrapped in the API response envelope, which nests the same
//! keys under `scene`, so `RawScene` is recursive through that key.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct RawVec3 {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawMaterial {
    pub color: Option<String>,
    pub restitution: Option<f64>,
    pub friction: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawEnvironment {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub angle: Option<f64>,
    pub material: Option<RawMaterial>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawSize {
    pub radius: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawObject {
    /// Kept as a raw value so a non-string shape can be reported precisely
    #[serde(rename = "type")]
    pub shape: Option<Value>,
    pub mass: Option<f64>,
    pub size: Option<RawSize>,
    pub material: Option<RawMaterial>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawLight {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub intensity: Option<f64>,
    pub color: Option<String>,
    pub direction: Option<RawVec3>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawCamera {
    pub position: Option<RawVec3>,
    #[serde(rename = "lookAt")]
    pub look_at: Option<RawVec3>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawSimulation {
    pub timestep: Option<f64>,
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawScene {
    pub scene: Option<Box<RawScene>>,
    pub environment: Option<RawEnvironment>,
    pub objects: Option<Vec<RawObject>>,
    pub lighting: Option<Vec<RawLight>>,
    pub camera: Option<RawCamera>,
    pub gravity: Option<RawVec3>,
    pub simulation: Option<RawSimulation>,
}

impl RawScene {
    /// Resolve a field from the outermost level that carries it.
    pub fn lookup<T>(&self, field: impl Fn(&RawScene) -> Option<&T> + Copy) -> Option<&T> {
        field(self).or_else(|| self.scene.as_deref().and_then(|inner| inner.lookup(field)))
    }
}
