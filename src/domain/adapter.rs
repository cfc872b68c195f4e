//! Scene Description Adapter - validates and normalizes incoming scenes
//!
//! Pure transform from the wire payload to a `SceneDescription`. Same input,
//! bit-identical output. Nothing is partially returned: any violation yields
//! a `ValidationError` before geometry or placement work begins.

use glam::Vec3;
use serde_json::Value;
use thiserror::Error;

use crate::core::constants::*;

use super::raw::{RawEnvironment, RawLight, RawMaterial, RawObject, RawScene, RawVec3};
use super::scene::{
    CameraSpec, Color, Environment, LightSpec, Material, ObjectSize, ObjectSpec,
    SceneDescription, ShapeKind, SimulationSettings, SurfaceKind,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("scene JSON could not be parsed: {0}")]
    Json(String),

    #[error("object {index}: missing shape `type`")]
    MissingShape { index: usize },

    #[error("object {index}: shape `type` must be a string, got {found}")]
    MalformedShape { index: usize, found: String },

    #[error("object {index}: size `{field}` must be positive, got {value}")]
    NonPositiveSize {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("`{field}` must be a finite number")]
    NonFinite { field: String },

    #[error("too many objects: {count} (limit {limit})")]
    TooManyObjects { count: usize, limit: usize },
}

/// Parse and normalize a JSON scene payload.
pub fn normalize_json(json: &str) -> Result<SceneDescription, ValidationError> {
    let raw: RawScene =
        serde_json::from_str(json).map_err(|e| ValidationError::Json(e.to_string()))?;
    normalize(&raw)
}

pub(crate) fn normalize(raw: &RawScene) -> Result<SceneDescription, ValidationError> {
    let environment = normalize_environment(raw.lookup(|s| s.environment.as_ref()))?;

    let raw_objects = raw
        .lookup(|s| s.objects.as_ref())
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    if raw_objects.len() > MAX_OBJECTS {
        return Err(ValidationError::TooManyObjects {
            count: raw_objects.len(),
            limit: MAX_OBJECTS,
        });
    }
    let objects = raw_objects
        .iter()
        .enumerate()
        .map(|(index, obj)| normalize_object(index, obj))
        .collect::<Result<Vec<_>, _>>()?;

    let lighting = match raw.lookup(|s| s.lighting.as_ref()) {
        Some(lights) => normalize_lighting(lights)?,
        None => Vec::new(),
    };

    let camera = raw.lookup(|s| s.camera.as_ref());
    let camera = CameraSpec {
        position: vec3_or(
            camera.and_then(|c| c.position.as_ref()),
            Vec3::from_array(DEFAULT_CAMERA_POSITION),
            "camera.position",
        )?,
        look_at: vec3_or(
            camera.and_then(|c| c.look_at.as_ref()),
            Vec3::ZERO,
            "camera.lookAt",
        )?,
    };

    let gravity = vec3_or(
        raw.lookup(|s| s.gravity.as_ref()),
        Vec3::from_array(DEFAULT_GRAVITY),
        "scene.gravity",
    )?;

    let sim = raw.lookup(|s| s.simulation.as_ref());
    let timestep = finite_or(
        sim.and_then(|s| s.timestep),
        DEFAULT_TIMESTEP as f64,
        "simulation.timestep",
    )?
    .clamp(MIN_TIMESTEP, MAX_TIMESTEP);
    let duration = match sim.and_then(|s| s.duration) {
        Some(d) => {
            let d = finite(d, "simulation.duration")?;
            (d > 0.0).then_some(d)
        }
        None => None,
    };

    Ok(SceneDescription {
        environment,
        objects,
        lighting,
        camera,
        simulation: SimulationSettings {
            gravity,
            timestep,
            duration,
        },
    })
}

fn normalize_environment(env: Option<&RawEnvironment>) -> Result<Environment, ValidationError> {
    let material = env.and_then(|e| e.material.as_ref());
    let surface_color = color_or(material, DEFAULT_SURFACE_COLOR);
    let (restitution, friction) = material_coefficients(material, "environment.material")?;

    let angle = finite_or(env.and_then(|e| e.angle), 0.0, "environment.angle")?
        .clamp(0.0, MAX_ANGLE_DEGREES);
    let wants_incline = env
        .and_then(|e| e.kind.as_deref())
        .map(|k| k.trim().eq_ignore_ascii_case("incline"))
        .unwrap_or(false);

    let (kind, angle_degrees) = if wants_incline && angle > 0.0 {
        (SurfaceKind::Incline, angle)
    } else {
        (SurfaceKind::Ground, 0.0)
    };

    Ok(Environment {
        kind,
        angle_degrees,
        surface_color,
        friction,
        restitution,
    })
}

fn normalize_object(index: usize, obj: &RawObject) -> Result<ObjectSpec, ValidationError> {
    let shape = match &obj.shape {
        None | Some(Value::Null) => return Err(ValidationError::MissingShape { index }),
        Some(Value::String(name)) => ShapeKind::from_name(name),
        Some(other) => {
            return Err(ValidationError::MalformedShape {
                index,
                found: other.to_string(),
            })
        }
    };

    let size = obj.size.as_ref();
    let radius = match size.and_then(|s| s.radius) {
        Some(r) => positive_size(index, "radius", r)?,
        None => DEFAULT_RADIUS,
    };
    let dim = |field: &'static str, value: Option<f64>| -> Result<Option<f32>, ValidationError> {
        value.map(|v| positive_size(index, field, v)).transpose()
    };
    let size = ObjectSize {
        radius,
        width: dim("width", size.and_then(|s| s.width))?,
        height: dim("height", size.and_then(|s| s.height))?,
        depth: dim("depth", size.and_then(|s| s.depth))?,
    };

    let material = obj.material.as_ref();
    let (restitution, friction) = material_coefficients(material, "material")?;
    let mass = finite_or(obj.mass, DEFAULT_MASS as f64, "mass")?.clamp(MIN_MASS, MAX_MASS);

    Ok(ObjectSpec {
        shape,
        size,
        material: Material {
            color: color_or(material, DEFAULT_OBJECT_COLOR),
            restitution,
            friction,
        },
        mass,
    })
}

fn normalize_lighting(lights: &[RawLight]) -> Result<Vec<LightSpec>, ValidationError> {
    let mut out = Vec::with_capacity(lights.len());
    for light in lights {
        let kind = light.kind.as_deref().map(str::trim).unwrap_or("");
        if kind.eq_ignore_ascii_case("ambient") {
            let intensity = finite_or(
                light.intensity,
                DEFAULT_AMBIENT_INTENSITY as f64,
                "lighting.intensity",
            )?;
            out.push(LightSpec::Ambient {
                intensity: intensity.max(0.0),
                color: light.color.clone().map(Color),
            });
        } else if kind.eq_ignore_ascii_case("directional") {
            let intensity = finite_or(
                light.intensity,
                DEFAULT_DIRECTIONAL_INTENSITY as f64,
                "lighting.intensity",
            )?;
            let direction = vec3_or(
                light.direction.as_ref(),
                Vec3::new(1.0, -1.0, 1.0),
                "lighting.direction",
            )?;
            out.push(LightSpec::Directional {
                intensity: intensity.max(0.0),
                direction,
            });
        } else {
            log::debug!("dropping unsupported light type {:?}", light.kind);
        }
    }
    Ok(out)
}

fn material_coefficients(
    material: Option<&RawMaterial>,
    prefix: &str,
) -> Result<(f32, f32), ValidationError> {
    let restitution = finite_or(
        material.and_then(|m| m.restitution),
        DEFAULT_RESTITUTION as f64,
        &format!("{}.restitution", prefix),
    )?
    .clamp(0.0, 1.0);
    let friction = finite_or(
        material.and_then(|m| m.friction),
        DEFAULT_FRICTION as f64,
        &format!("{}.friction", prefix),
    )?
    .max(0.0);
    Ok((restitution, friction))
}

fn color_or(material: Option<&RawMaterial>, fallback: &str) -> Color {
    material
        .and_then(|m| m.color.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(Color::new)
        .unwrap_or_else(|| Color::new(fallback))
}

fn positive_size(index: usize, field: &'static str, value: f64) -> Result<f32, ValidationError> {
    let narrowed = value as f32;
    if !narrowed.is_finite() || narrowed <= 0.0 {
        return Err(ValidationError::NonPositiveSize {
            index,
            field,
            value,
        });
    }
    Ok(narrowed)
}

fn finite(value: f64, field: &str) -> Result<f32, ValidationError> {
    let narrowed = value as f32;
    if narrowed.is_finite() {
        Ok(narrowed)
    } else {
        Err(ValidationError::NonFinite {
            field: field.to_string(),
        })
    }
}

fn finite_or(value: Option<f64>, fallback: f64, field: &str) -> Result<f32, ValidationError> {
    finite(value.unwrap_or(fallback), field)
}

fn vec3_or(value: Option<&RawVec3>, fallback: Vec3, field: &str) -> Result<Vec3, ValidationError> {
    let Some(v) = value else {
        return Ok(fallback);
    };
    Ok(Vec3::new(
        finite_or(v.x, fallback.x as f64, field)?,
        finite_or(v.y, fallback.y as f64, field)?,
        finite_or(v.z, fallback.z as f64, field)?,
    ))
}
