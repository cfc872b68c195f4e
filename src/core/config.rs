//! EngineConfig - declared engine parameters
//!
//! Every section is `#[serde(default)]`, so a JSON override only needs the
//! keys it changes:
//!
//! ```
//! use visigen_engine::core::config::EngineConfig;
//!
//! let cfg = EngineConfig::from_json(r#"{ "sizing": { "sphere_radius_scale": 1.0 } }"#).unwrap();
//! assert_eq!(cfg.sizing.sphere_radius_scale, 1.0);
//! assert_eq!(cfg.sizing.default_box_edge, 3.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config value `{field}` must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("config value `{field}` must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub incline_half_thickness: f32,
    pub incline_half_length: f32,
    pub incline_half_width: f32,
    pub surface_epsilon: f32,
    pub ground_half_extent: f32,
    pub ground_thickness: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            incline_half_thickness: INCLINE_HALF_THICKNESS,
            incline_half_length: INCLINE_HALF_LENGTH,
            incline_half_width: INCLINE_HALF_WIDTH,
            surface_epsilon: SURFACE_EPSILON,
            ground_half_extent: GROUND_HALF_EXTENT,
            ground_thickness: GROUND_THICKNESS,
        }
    }
}

/// Maps declared object sizes to collider geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeMapping {
    pub sphere_radius_scale: f32,
    pub box_scale: f32,
    pub default_box_edge: f32,
}

impl Default for SizeMapping {
    fn default() -> Self {
        Self {
            sphere_radius_scale: SPHERE_RADIUS_SCALE,
            box_scale: BOX_SCALE,
            default_box_edge: DEFAULT_BOX_EDGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub spawn_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { spawn_margin: SPAWN_MARGIN }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteppingConfig {
    pub max_substeps: u32,
}

impl Default for SteppingConfig {
    fn default() -> Self {
        Self { max_substeps: MAX_SUBSTEPS }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub geometry: GeometryConfig,
    pub sizing: SizeMapping,
    pub layout: LayoutConfig,
    pub stepping: SteppingConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        positive("geometry.incline_half_thickness", g.incline_half_thickness)?;
        positive("geometry.incline_half_length", g.incline_half_length)?;
        positive("geometry.incline_half_width", g.incline_half_width)?;
        positive("geometry.ground_half_extent", g.ground_half_extent)?;
        positive("geometry.ground_thickness", g.ground_thickness)?;
        non_negative("geometry.surface_epsilon", g.surface_epsilon)?;

        let s = &self.sizing;
        positive("sizing.sphere_radius_scale", s.sphere_radius_scale)?;
        positive("sizing.box_scale", s.box_scale)?;
        positive("sizing.default_box_edge", s.default_box_edge)?;

        non_negative("layout.spawn_margin", self.layout.spawn_margin)?;

        if self.stepping.max_substeps == 0 {
            return Err(ConfigError::NotPositive {
                field: "stepping.max_substeps",
                value: 0.0,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
