//! SceneDescription - the normalized, immutable scene handed to the engine
//!
//! Produced only by the adapter (`domain::adapter`). Every field is already
//! defaulted and clamped, so downstream code never re-checks input ranges.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// CSS color string, passed through untouched to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Ground,
    Incline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub kind: SurfaceKind,
    /// Always within [0, 89.9]; 0 whenever `kind` is Ground
    pub angle_degrees: f32,
    pub surface_color: Color,
    pub friction: f32,
    pub restitution: f32,
}

impl Environment {
    pub fn tilt_radians(&self) -> f32 {
        self.angle_degrees.to_radians()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Box,
    Sphere,
    /// Well-formed but unknown shape name; rejected per object at placement
    Unrecognized(String),
}

impl ShapeKind {
    /// Parse a shape name, accepting the aliases the scene generator emits.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sphere" | "ball" => ShapeKind::Sphere,
            "box" | "block" | "cube" | "crate" | "cart" => ShapeKind::Box,
            _ => ShapeKind::Unrecognized(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Unrecognized(name) => name,
        }
    }
}

/// Declared object size. Scaling into collider geometry happens in placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSize {
    pub radius: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub depth: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub restitution: f32,
    pub friction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub shape: ShapeKind,
    pub size: ObjectSize,
    pub material: Material,
    pub mass: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightSpec {
    Ambient { intensity: f32, color: Option<Color> },
    Directional { intensity: f32, direction: Vec3 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSpec {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub gravity: Vec3,
    /// Fixed physics step in seconds
    pub timestep: f32,
    /// Stop stepping after this many simulated seconds (replay restarts it)
    pub duration: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub environment: Environment,
    pub objects: Vec<ObjectSpec>,
    pub lighting: Vec<LightSpec>,
    pub camera: CameraSpec,
    pub simulation: SimulationSettings,
}

impl SceneDescription {
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
