//! Domain - scene description types and the adapter that produces them

pub mod adapter;
mod raw;
pub mod scene;

pub use adapter::{normalize_json, ValidationError};
pub use scene::{
    CameraSpec, Color, Environment, LightSpec, Material, ObjectSize, ObjectSpec,
    SceneDescription, ShapeKind, SimulationSettings, SurfaceKind,
};
