use serde::Serialize;

use crate::systems::runtime::PhysicsRuntime;

use super::{SessionState, SimulationSession};

/// Session counters, cheap to collect every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub state: SessionState,
    pub object_count: usize,
    pub body_count: usize,
    pub vacant_slots: usize,
    pub fixture_count: usize,
    pub runtime_bodies: usize,
    pub elapsed: f32,
    pub finished: bool,
    pub loads: u64,
    pub steps: u64,
    pub replays: u64,
    pub coalesced_replays: u64,
}

pub(super) fn collect<R: PhysicsRuntime>(session: &SimulationSession<R>) -> SessionStats {
    let (object_count, body_count, fixture_count) = match session.registry() {
        Some(r) => (r.len(), r.live_count(), r.fixtures().count()),
        None => (0, 0, 0),
    };
    SessionStats {
        state: session.state,
        object_count,
        body_count,
        vacant_slots: object_count - body_count,
        fixture_count,
        runtime_bodies: session.runtime.body_count(),
        elapsed: session.clock.elapsed(),
        finished: session.clock.is_finished(),
        loads: session.loads,
        steps: session.steps,
        replays: session.replays,
        coalesced_replays: session.coalesced_replays,
    }
}
