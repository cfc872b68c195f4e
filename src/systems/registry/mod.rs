//! Body Registry - slot index to live body
//!
//! Slots are the object indices of the scene description: the table spans
//! exactly `[0, objects.len())` and an object that could not be placed leaves
//! a vacant slot. Handles never outlive the registry that created them.

use thiserror::Error;

use crate::core::config::EngineConfig;
use crate::domain::{SceneDescription, SurfaceKind};
use crate::systems::geometry::{environment_fixtures, resolve_surface, Fixture, SurfaceFrame};
use crate::systems::placement::{LayoutPlanner, PlacementError, PlacementSnapshot};
use crate::systems::runtime::{BodyDesc, ColliderShape, PhysicsRuntime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no body in slot {slot}")]
    NotFound { slot: usize },
}

/// One placed object: its runtime body and the state it returns to on reset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyHandle<H> {
    pub slot: usize,
    pub body: H,
    pub collider: ColliderShape,
    pub snapshot: PlacementSnapshot,
    pub resting_on: SurfaceKind,
}

pub struct BodyRegistry<H> {
    frame: SurfaceFrame,
    slots: Vec<Option<BodyHandle<H>>>,
    fixtures: Vec<(Fixture, H)>,
    placement_errors: Vec<PlacementError>,
}

impl<H: Copy + Eq + std::fmt::Debug> BodyRegistry<H> {
    /// Plan every object in index order and create its body, plus the fixed
    /// environment bodies.
    pub fn build<R>(runtime: &mut R, scene: &SceneDescription, config: &EngineConfig) -> Self
    where
        R: PhysicsRuntime<Handle = H>,
    {
        let frame = resolve_surface(&scene.environment, &config.geometry);

        let fixtures = environment_fixtures(&frame, &config.geometry)
            .into_iter()
            .map(|fixture| {
                let handle = runtime.create_body(&fixture.body_desc(&scene.environment));
                (fixture, handle)
            })
            .collect();

        let mut planner = LayoutPlanner::new(frame, config);
        let mut slots = Vec::with_capacity(scene.objects.len());
        let mut placement_errors = Vec::new();

        for (slot, spec) in scene.objects.iter().enumerate() {
            match planner.place(slot, spec) {
                Ok(planned) => {
                    let desc = BodyDesc::dynamic(
                        planned.snapshot.pose(),
                        planned.collider,
                        spec.mass,
                        spec.material.restitution,
                        spec.material.friction,
                    );
                    let body = runtime.create_body(&desc);
                    slots.push(Some(BodyHandle {
                        slot,
                        body,
                        collider: planned.collider,
                        snapshot: planned.snapshot,
                        resting_on: planned.resting_on,
                    }));
                }
                Err(err) => {
                    log::warn!("[registry] skipping {}", err);
                    placement_errors.push(err);
                    slots.push(None);
                }
            }
        }

        Self { frame, slots, fixtures, placement_errors }
    }

    pub fn get(&self, slot: usize) -> Result<&BodyHandle<H>, RegistryError> {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .ok_or(RegistryError::NotFound { slot })
    }

    /// Put every body back on its snapshot with zero velocity.
    ///
    /// Takes the runtime mutably for the whole pass, so no step can observe a
    /// half-reset scene. Returns how many bodies were reset.
    pub fn reset_all<R>(&self, runtime: &mut R) -> usize
    where
        R: PhysicsRuntime<Handle = H>,
    {
        let mut count = 0;
        for handle in self.iter() {
            runtime.set_pose(handle.body, handle.snapshot.pose());
            runtime.set_velocities(
                handle.body,
                handle.snapshot.linear_velocity,
                handle.snapshot.angular_velocity,
            );
            count += 1;
        }
        count
    }

    /// Release every body, fixtures included. Safe to call repeatedly.
    pub fn dispose_all<R>(&mut self, runtime: &mut R)
    where
        R: PhysicsRuntime<Handle = H>,
    {
        for handle in self.slots.iter_mut().filter_map(Option::take) {
            runtime.remove_body(handle.body);
        }
        for (_, body) in self.fixtures.drain(..) {
            runtime.remove_body(body);
        }
    }

    /// Number of slots, vacant ones included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyHandle<H>> {
        self.slots.iter().flatten()
    }

    pub fn frame(&self) -> &SurfaceFrame {
        &self.frame
    }

    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter().map(|(fixture, _)| fixture)
    }

    pub fn placement_errors(&self) -> &[PlacementError] {
        &self.placement_errors
    }

    /// Largest distance of any live body from its snapshot; 0 right after a reset
    pub fn max_drift<R>(&self, runtime: &R) -> f32
    where
        R: PhysicsRuntime<Handle = H>,
    {
        self.iter()
            .filter_map(|h| runtime.pose(h.body).map(|p| p.position.distance(h.snapshot.position)))
            .fold(0.0, f32::max)
    }
}
