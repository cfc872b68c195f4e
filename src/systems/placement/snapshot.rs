use glam::{Quat, Vec3};
use serde::Serialize;

use crate::systems::runtime::Pose;

/// Initial state of one object, re-applied verbatim on every reset
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSnapshot {
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl PlacementSnapshot {
    /// At rest, unrotated.
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.orientation)
    }
}
