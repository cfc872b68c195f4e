use glam::{Quat, Vec3};
use serde::Serialize;

/// Collider geometry shared by placement and every runtime backend
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ColliderShape {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl ColliderShape {
    /// Distance from the centre to the supporting plane with unit normal `n`,
    /// for a body at the given orientation.
    pub fn support_extent(&self, orientation: Quat, n: Vec3) -> f32 {
        match *self {
            ColliderShape::Ball { radius } => radius,
            ColliderShape::Cuboid { half_extents } => {
                let local = orientation.inverse() * n;
                local.abs().dot(half_extents)
            }
        }
    }

    /// Radius of the smallest sphere around the centre containing the shape
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            ColliderShape::Ball { radius } => radius,
            ColliderShape::Cuboid { half_extents } => half_extents.length(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// Never moves; environment slabs
    Fixed,
    /// Integrated by the runtime every step
    Dynamic,
}

/// Position + orientation of a body
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }
}

/// Everything a runtime needs to create one body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub pose: Pose,
    pub collider: ColliderShape,
    pub mass: f32,
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    pub friction: f32,
}

impl BodyDesc {
    pub fn fixed(pose: Pose, collider: ColliderShape, restitution: f32, friction: f32) -> Self {
        Self {
            kind: BodyKind::Fixed,
            pose,
            collider,
            mass: 0.0,
            restitution,
            friction,
        }
    }

    pub fn dynamic(pose: Pose, collider: ColliderShape, mass: f32, restitution: f32, friction: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            pose,
            collider,
            mass,
            restitution,
            friction,
        }
    }
}
