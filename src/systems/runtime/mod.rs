//! Physics runtime seam
//!
//! The engine never integrates or resolves collisions itself for the scene it
//! composes; it hands bodies to a `PhysicsRuntime` and only repositions them
//! (placement, reset). Two backends:
//! - `RapierWorld` - rapier3d adapter behind the default `rapier` feature
//! - `BasicWorld` - small in-crate integrator without body-body contacts,
//!   used by the tests and by builds with default features off

mod basic;
mod body;
mod contact;
#[cfg(feature = "rapier")]
mod rapier;

use std::fmt::Debug;

use glam::Vec3;

pub use basic::{BasicWorld, BodyId};
pub use body::{BodyDesc, BodyKind, ColliderShape, Pose};
#[cfg(feature = "rapier")]
pub use rapier::RapierWorld;

/// Backend used by the wasm facade
#[cfg(not(feature = "rapier"))]
pub type DefaultRuntime = BasicWorld;
#[cfg(feature = "rapier")]
pub type DefaultRuntime = RapierWorld;

pub trait PhysicsRuntime {
    /// Opaque handle to a live body. Only meaningful to the runtime that
    /// issued it.
    type Handle: Copy + Eq + Debug;

    fn set_gravity(&mut self, gravity: Vec3);

    fn create_body(&mut self, desc: &BodyDesc) -> Self::Handle;

    /// Returns false when the handle is already gone.
    fn remove_body(&mut self, handle: Self::Handle) -> bool;

    /// Teleport a body, waking it up.
    fn set_pose(&mut self, handle: Self::Handle, pose: Pose);

    fn set_velocities(&mut self, handle: Self::Handle, linear: Vec3, angular: Vec3);

    fn pose(&self, handle: Self::Handle) -> Option<Pose>;

    fn velocities(&self, handle: Self::Handle) -> Option<(Vec3, Vec3)>;

    /// Advance the world by one fixed step of `dt` seconds.
    fn step(&mut self, dt: f32);

    fn body_count(&self) -> usize;
}
