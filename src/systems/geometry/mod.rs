//! Geometry Resolver - environment to surface frame
//!
//! Pure functions. The ground base slab always exists; an incline adds a
//! tilted slab whose low edge sits on the base (lifted by `surface_epsilon`).

mod frame;

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::core::config::GeometryConfig;
use crate::domain::{Environment, SurfaceKind};
use crate::systems::runtime::{BodyDesc, ColliderShape, Pose};

pub use frame::SurfaceFrame;

/// Resolve the placement frame for an (already normalized) environment.
pub fn resolve_surface(env: &Environment, geometry: &GeometryConfig) -> SurfaceFrame {
    match env.kind {
        SurfaceKind::Ground => ground_frame(geometry),
        SurfaceKind::Incline => {
            let theta = env.tilt_radians();
            if theta <= 0.0 {
                return ground_frame(geometry);
            }
            let t = geometry.incline_half_thickness;
            let l = geometry.incline_half_length;
            let (sin, cos) = theta.sin_cos();
            SurfaceFrame {
                kind: SurfaceKind::Incline,
                origin_y: t * cos + l * sin + geometry.surface_epsilon,
                tilt_radians: theta,
                outward_normal: Vec3::new(0.0, cos, -sin),
                down_slope: Vec3::new(0.0, -sin, -cos),
                half_length: l,
                half_width: geometry.incline_half_width,
                half_thickness: t,
            }
        }
    }
}

/// The world XZ plane at y = 0, bounded by the ground base slab
pub fn ground_frame(geometry: &GeometryConfig) -> SurfaceFrame {
    SurfaceFrame {
        kind: SurfaceKind::Ground,
        origin_y: 0.0,
        tilt_radians: 0.0,
        outward_normal: Vec3::Y,
        down_slope: Vec3::NEG_Z,
        half_length: geometry.ground_half_extent,
        half_width: geometry.ground_half_extent,
        half_thickness: geometry.ground_thickness * 0.5,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FixtureKind {
    GroundBase,
    InclineSlab,
}

/// A fixed environment body the renderer draws and the runtime collides with
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub kind: FixtureKind,
    pub position: Vec3,
    pub orientation: Quat,
    pub half_extents: Vec3,
}

impl Fixture {
    pub fn body_desc(&self, env: &Environment) -> BodyDesc {
        BodyDesc::fixed(
            Pose::new(self.position, self.orientation),
            ColliderShape::Cuboid { half_extents: self.half_extents },
            env.restitution,
            env.friction,
        )
    }
}

/// Fixed bodies for a surface: the ground base, plus the incline slab if tilted.
pub fn environment_fixtures(frame: &SurfaceFrame, geometry: &GeometryConfig) -> Vec<Fixture> {
    let half_ground = geometry.ground_thickness * 0.5;
    let mut fixtures = vec![Fixture {
        kind: FixtureKind::GroundBase,
        position: Vec3::new(0.0, -half_ground, 0.0),
        orientation: Quat::IDENTITY,
        half_extents: Vec3::new(geometry.ground_half_extent, half_ground, geometry.ground_half_extent),
    }];

    if frame.is_tilted() {
        fixtures.push(Fixture {
            kind: FixtureKind::InclineSlab,
            position: Vec3::new(0.0, frame.origin_y, 0.0),
            orientation: frame.slab_orientation(),
            half_extents: Vec3::new(frame.half_width, frame.half_thickness, frame.half_length),
        });
    }
    fixtures
}
