use glam::{Quat, Vec3};

use super::body::{ColliderShape, Pose};

/// Top face of a fixed cuboid, the only thing `BasicWorld` collides against.
#[derive(Clone, Copy, Debug)]
pub(super) struct SupportFace {
    center: Vec3,
    normal: Vec3,
    axis_u: Vec3,
    axis_v: Vec3,
    half_u: f32,
    half_v: f32,
    thickness: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl SupportFace {
    pub(super) fn from_fixed_cuboid(pose: Pose, half_extents: Vec3, restitution: f32, friction: f32) -> Self {
        let normal = pose.orientation * Vec3::Y;
        Self {
            center: pose.position + normal * half_extents.y,
            normal,
            axis_u: pose.orientation * Vec3::X,
            axis_v: pose.orientation * Vec3::Z,
            half_u: half_extents.x,
            half_v: half_extents.z,
            thickness: half_extents.y * 2.0,
            restitution,
            friction,
        }
    }

    /// Depth by which `collider` at `pose` sinks below the face, if it does.
    pub(super) fn penetration(&self, collider: &ColliderShape, pose: &Pose) -> Option<f32> {
        let support = collider.support_extent(pose.orientation, self.normal);
        let rel = pose.position - self.center;
        let gap = rel.dot(self.normal) - support;
        if gap >= 0.0 {
            return None;
        }
        // Below the slab entirely: not this face's business.
        if gap < -(support + self.thickness) {
            return None;
        }
        let reach = collider.bounding_radius();
        if rel.dot(self.axis_u).abs() > self.half_u + reach || rel.dot(self.axis_v).abs() > self.half_v + reach {
            return None;
        }
        Some(-gap)
    }

    pub(super) fn normal(&self) -> Vec3 {
        self.normal
    }
}

/// Push a body out of a face and respond with restitution and Coulomb-style
/// friction on the linear velocity.
pub(super) fn resolve(
    face: &SupportFace,
    depth: f32,
    position: &mut Vec3,
    linvel: &mut Vec3,
    restitution: f32,
    friction: f32,
) {
    let n = face.normal();
    *position += n * depth;

    let vn = linvel.dot(n);
    if vn >= 0.0 {
        return;
    }

    let e = 0.5 * (restitution + face.restitution);
    let mu = 0.5 * (friction + face.friction);

    let normal_impulse = -(1.0 + e) * vn;
    *linvel += n * normal_impulse;

    let vt = *linvel - n * linvel.dot(n);
    let speed_t = vt.length();
    if speed_t > 0.0 {
        let drop = (mu * normal_impulse).min(speed_t);
        *linvel -= vt * (drop / speed_t);
    }
}

/// Integrate an orientation by angular velocity over `dt`.
pub(super) fn integrate_orientation(orientation: Quat, angvel: Vec3, dt: f32) -> Quat {
    if angvel == Vec3::ZERO {
        return orientation;
    }
    (Quat::from_scaled_axis(angvel * dt) * orientation).normalize()
}
