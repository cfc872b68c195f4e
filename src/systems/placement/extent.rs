use glam::Vec3;

use crate::core::config::SizeMapping;
use crate::domain::{ObjectSize, ShapeKind};
use crate::systems::runtime::ColliderShape;

/// Collider geometry for a declared shape, or `None` when the shape is not
/// one the engine can build.
pub fn collider_for(shape: &ShapeKind, size: &ObjectSize, sizing: &SizeMapping) -> Option<ColliderShape> {
    match shape {
        ShapeKind::Sphere => Some(ColliderShape::Ball {
            radius: size.radius * sizing.sphere_radius_scale,
        }),
        ShapeKind::Box => {
            let edge = |v: Option<f32>| v.unwrap_or(sizing.default_box_edge) * sizing.box_scale * 0.5;
            Some(ColliderShape::Cuboid {
                half_extents: Vec3::new(edge(size.width), edge(size.height), edge(size.depth)),
            })
        }
        ShapeKind::Unrecognized(_) => None,
    }
}
