//! Simulation Session - one running instance of a scene
//!
//! State machine: Idle -> Running -> Resetting -> Running
//! - `load`: any state; disposes the current registry, builds a new one
//! - `request_replay`: Running only; bodies go back to their snapshots
//!   immediately and the session reads Resetting until the next `tick`
//! - `teardown`: any state; disposes every body, back to Idle
//!
//! The session owns the physics runtime, so a reset (a `&mut self` call)
//! always completes before the next step can run.

use serde::Serialize;

use crate::core::config::EngineConfig;
use crate::domain::{SceneDescription, ValidationError};
use crate::systems::geometry::{Fixture, SurfaceFrame};
use crate::systems::placement::PlacementError;
use crate::systems::registry::{BodyRegistry, RegistryError};
use crate::systems::runtime::PhysicsRuntime;

#[path = "init/init.rs"]
mod init;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/replay.rs"]
mod replay;
#[path = "step/clock.rs"]
mod clock;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
mod facade;

pub use clock::StepClock;
pub use facade::SceneEngine;
pub use perf_stats::SessionStats;
pub use render_extract::{BodyTransform, TRANSFORM_STRIDE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No scene loaded
    Idle,
    Running,
    /// Reset applied; returns to Running at the next tick
    Resetting,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Resetting => "resetting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayOutcome {
    /// Every body was put back on its snapshot
    Applied,
    /// A reset is already pending for this frame
    Coalesced,
    /// Nothing is running
    Ignored,
}

struct LoadedScene<H> {
    description: SceneDescription,
    registry: BodyRegistry<H>,
}

pub struct SimulationSession<R: PhysicsRuntime> {
    runtime: R,
    config: EngineConfig,
    state: SessionState,
    scene: Option<LoadedScene<R::Handle>>,
    clock: StepClock,
    replay_level: bool,

    // Counters
    loads: u64,
    steps: u64,
    replays: u64,
    coalesced_replays: u64,
}

impl<R: PhysicsRuntime> SimulationSession<R> {
    pub fn new(runtime: R) -> Self {
        init::create_session(runtime, EngineConfig::default())
    }

    pub fn with_config(runtime: R, config: EngineConfig) -> Self {
        init::create_session(runtime, config)
    }

    /// Replace whatever is loaded with `description` and start running it.
    pub fn load(&mut self, description: SceneDescription) {
        commands::load(self, description)
    }

    /// Validate a raw payload, then load it. On error the current scene keeps
    /// running untouched.
    pub fn load_json(&mut self, json: &str) -> Result<(), ValidationError> {
        commands::load_json(self, json)
    }

    pub fn teardown(&mut self) {
        commands::teardown(self)
    }

    pub fn request_replay(&mut self) -> ReplayOutcome {
        replay::request_replay(self)
    }

    /// Feed the level of the external replay trigger; a rising edge requests
    /// a replay.
    pub fn replay_signal(&mut self, level: bool) -> Option<ReplayOutcome> {
        replay::replay_signal(self, level)
    }

    /// Advance by `dt` seconds of wall time. Returns the number of fixed
    /// steps taken.
    pub fn tick(&mut self, dt: f32) -> u32 {
        step::tick(self, dt)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn description(&self) -> Option<&SceneDescription> {
        self.scene.as_ref().map(|s| &s.description)
    }

    pub fn registry(&self) -> Option<&BodyRegistry<R::Handle>> {
        self.scene.as_ref().map(|s| &s.registry)
    }

    pub fn surface(&self) -> Option<&SurfaceFrame> {
        self.registry().map(|r| r.frame())
    }

    pub fn fixtures(&self) -> Vec<Fixture> {
        self.registry()
            .map(|r| r.fixtures().copied().collect())
            .unwrap_or_default()
    }

    pub fn placement_errors(&self) -> &[PlacementError] {
        self.registry().map(|r| r.placement_errors()).unwrap_or(&[])
    }

    pub fn body_count(&self) -> usize {
        self.registry().map(|r| r.live_count()).unwrap_or(0)
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    /// Live transform of every placed body, in slot order
    pub fn transforms(&self) -> Vec<BodyTransform> {
        render_extract::transforms(self)
    }

    pub fn body_transform(&self, slot: usize) -> Result<BodyTransform, RegistryError> {
        render_extract::body_transform(self, slot)
    }

    /// Flatten transforms into `out` as `TRANSFORM_STRIDE` floats per body.
    pub fn write_transforms(&self, out: &mut Vec<f32>) {
        render_extract::write_transforms(self, out)
    }

    pub fn stats(&self) -> SessionStats {
        perf_stats::collect(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
