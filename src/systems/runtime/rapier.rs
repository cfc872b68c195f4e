//! RapierWorld - rapier3d backend
//!
//! Wraps the rapier pipeline boilerplate behind `PhysicsRuntime`. The `rapier`
//! feature is on by default, so the facade runs on it as `DefaultRuntime`.

use glam::{Quat, Vec3};
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use rapier3d::prelude::*;

use super::body::{BodyDesc, BodyKind, ColliderShape, Pose};
use super::PhysicsRuntime;

// === glam <-> nalgebra ===

fn to_na(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

fn from_na(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn pose_to_iso(pose: &Pose) -> Isometry3<f32> {
    let q = pose.orientation;
    Isometry3::from_parts(
        Translation3::new(pose.position.x, pose.position.y, pose.position.z),
        UnitQuaternion::new_normalize(Quaternion::new(q.w, q.x, q.y, q.z)),
    )
}

fn iso_to_pose(iso: &Isometry3<f32>) -> Pose {
    let t = iso.translation.vector;
    let r = iso.rotation.quaternion();
    Pose::new(Vec3::new(t.x, t.y, t.z), Quat::from_xyzw(r.i, r.j, r.k, r.w))
}

pub struct RapierWorld {
    gravity: Vector3<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl RapierWorld {
    pub fn new() -> Self {
        Self {
            gravity: Vector3::new(0.0, -9.81, 0.0),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsRuntime for RapierWorld {
    type Handle = RigidBodyHandle;

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = to_na(gravity);
    }

    fn create_body(&mut self, desc: &BodyDesc) -> RigidBodyHandle {
        let builder = match desc.kind {
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let handle = self.bodies.insert(builder.position(pose_to_iso(&desc.pose)).build());

        let collider = match desc.collider {
            ColliderShape::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        }
        .restitution(desc.restitution)
        .friction(desc.friction);
        let collider = match desc.kind {
            BodyKind::Dynamic if desc.mass > 0.0 => collider.mass(desc.mass),
            _ => collider,
        };

        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);
        handle
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    fn set_pose(&mut self, handle: RigidBodyHandle, pose: Pose) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_position(pose_to_iso(&pose), true);
        }
    }

    fn set_velocities(&mut self, handle: RigidBodyHandle, linear: Vec3, angular: Vec3) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_linvel(to_na(linear), true);
            rb.set_angvel(to_na(angular), true);
        }
    }

    fn pose(&self, handle: RigidBodyHandle) -> Option<Pose> {
        self.bodies.get(handle).map(|rb| iso_to_pose(rb.position()))
    }

    fn velocities(&self, handle: RigidBodyHandle) -> Option<(Vec3, Vec3)> {
        self.bodies
            .get(handle)
            .map(|rb| (from_na(rb.linvel()), from_na(rb.angvel())))
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
