use crate::systems::runtime::PhysicsRuntime;

use super::{SessionState, SimulationSession};

pub(super) fn tick<R: PhysicsRuntime>(session: &mut SimulationSession<R>, dt: f32) -> u32 {
    match session.state {
        SessionState::Idle => return 0,
        // The frame boundary after a replay: exactly one transition back.
        SessionState::Resetting => {
            session.state = SessionState::Running;
            log::debug!("[session] resetting -> running");
        }
        SessionState::Running => {}
    }

    let steps = session.clock.advance(dt);
    let h = session.clock.timestep();
    for _ in 0..steps {
        session.runtime.step(h);
    }
    session.steps += u64::from(steps);
    steps
}
