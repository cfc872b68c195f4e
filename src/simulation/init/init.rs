use crate::core::config::EngineConfig;
use crate::systems::runtime::PhysicsRuntime;

use super::{SessionState, SimulationSession, StepClock};

pub(super) fn create_session<R: PhysicsRuntime>(runtime: R, config: EngineConfig) -> SimulationSession<R> {
    let clock = StepClock::idle(config.stepping.max_substeps);
    SimulationSession {
        runtime,
        config,
        state: SessionState::Idle,
        scene: None,
        clock,
        replay_level: false,
        loads: 0,
        steps: 0,
        replays: 0,
        coalesced_replays: 0,
    }
}
