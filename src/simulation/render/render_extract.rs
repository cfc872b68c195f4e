use glam::{Quat, Vec3};
use serde::Serialize;

use crate::systems::registry::RegistryError;
use crate::systems::runtime::PhysicsRuntime;

use super::SimulationSession;

/// Floats per body in the flat transform buffer: slot, px, py, pz, qx, qy, qz, qw
pub const TRANSFORM_STRIDE: usize = 8;

/// What the renderer reads for one body each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyTransform {
    pub slot: usize,
    pub position: Vec3,
    pub orientation: Quat,
}

pub(super) fn transforms<R: PhysicsRuntime>(session: &SimulationSession<R>) -> Vec<BodyTransform> {
    let Some(registry) = session.registry() else {
        return Vec::new();
    };
    registry
        .iter()
        .filter_map(|handle| {
            session.runtime.pose(handle.body).map(|pose| BodyTransform {
                slot: handle.slot,
                position: pose.position,
                orientation: pose.orientation,
            })
        })
        .collect()
}

pub(super) fn body_transform<R: PhysicsRuntime>(
    session: &SimulationSession<R>,
    slot: usize,
) -> Result<BodyTransform, RegistryError> {
    let registry = session.registry().ok_or(RegistryError::NotFound { slot })?;
    let handle = registry.get(slot)?;
    let pose = session
        .runtime
        .pose(handle.body)
        .ok_or(RegistryError::NotFound { slot })?;
    Ok(BodyTransform {
        slot,
        position: pose.position,
        orientation: pose.orientation,
    })
}

pub(super) fn write_transforms<R: PhysicsRuntime>(session: &SimulationSession<R>, out: &mut Vec<f32>) {
    out.clear();
    let Some(registry) = session.registry() else {
        return;
    };
    out.reserve(registry.live_count() * TRANSFORM_STRIDE);
    for t in transforms(session) {
        let q = t.orientation;
        out.extend_from_slice(&[
            t.slot as f32,
            t.position.x,
            t.position.y,
            t.position.z,
            q.x,
            q.y,
            q.z,
            q.w,
        ]);
    }
}
