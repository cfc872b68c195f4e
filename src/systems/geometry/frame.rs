use glam::{Quat, Vec3};
use serde::Serialize;

use crate::domain::SurfaceKind;

/// Placement plane derived from the environment.
///
/// Incline convention: the slab is rotated by -tilt about X, so its high end
/// is at +Z, the outward normal is (0, cos, -sin) and down-slope points
/// (0, -sin, -cos). Ground is the XZ plane at y = 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceFrame {
    pub kind: SurfaceKind,
    /// Slab centre height for an incline, plane height for ground
    pub origin_y: f32,
    /// In [0, pi/2)
    pub tilt_radians: f32,
    pub outward_normal: Vec3,
    pub down_slope: Vec3,
    pub half_length: f32,
    pub half_width: f32,
    pub half_thickness: f32,
}

impl SurfaceFrame {
    pub fn is_tilted(&self) -> bool {
        self.kind == SurfaceKind::Incline
    }

    pub fn up_slope(&self) -> Vec3 {
        -self.down_slope
    }

    /// Orientation of the slab whose top face is this surface
    pub fn slab_orientation(&self) -> Quat {
        Quat::from_rotation_x(-self.tilt_radians)
    }

    /// Centre of the top face
    pub fn top_center(&self) -> Vec3 {
        match self.kind {
            SurfaceKind::Ground => Vec3::new(0.0, self.origin_y, 0.0),
            SurfaceKind::Incline => {
                Vec3::new(0.0, self.origin_y, 0.0) + self.outward_normal * self.half_thickness
            }
        }
    }

    /// Height of the top face above world point (_, _, z)
    pub fn surface_top_y(&self, z: f32) -> f32 {
        let top = self.top_center();
        top.y + self.tilt_radians.tan() * (z - top.z)
    }

    /// Signed distance of `p` from the top face plane along the outward normal
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.top_center()).dot(self.outward_normal)
    }

    /// World point at lateral offset `x` and up-slope distance `s` from the
    /// top-face centre, lifted `extent` along the normal.
    pub fn face_point(&self, x: f32, s: f32, extent: f32) -> Vec3 {
        self.top_center() + Vec3::X * x + self.up_slope() * s + self.outward_normal * extent
    }

    /// Up-slope distance of the contact point for a centre at world `z`
    /// lifted `extent` along the normal. Inverse of `face_point` in z.
    pub fn slope_coordinate(&self, z: f32, extent: f32) -> f32 {
        (z - self.top_center().z - extent * self.outward_normal.z) / self.up_slope().z
    }

    /// Projection of `p` onto the face: (lateral, up-slope) from the top-face centre
    pub fn face_coordinates(&self, p: Vec3) -> (f32, f32) {
        let d = p - self.top_center();
        (d.x, d.dot(self.up_slope()))
    }

    /// Smallest world z covered by the slab under this surface
    pub fn footprint_min_z(&self) -> f32 {
        let (sin, cos) = self.tilt_radians.sin_cos();
        -(self.half_length * cos + self.half_thickness * sin)
    }
}
