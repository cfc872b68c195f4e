use crate::systems::runtime::PhysicsRuntime;

use super::{ReplayOutcome, SessionState, SimulationSession};

pub(super) fn request_replay<R: PhysicsRuntime>(session: &mut SimulationSession<R>) -> ReplayOutcome {
    match session.state {
        SessionState::Idle => ReplayOutcome::Ignored,
        SessionState::Resetting => {
            session.coalesced_replays += 1;
            log::debug!("[session] replay coalesced");
            ReplayOutcome::Coalesced
        }
        SessionState::Running => {
            let Some(scene) = session.scene.as_ref() else {
                return ReplayOutcome::Ignored;
            };
            // Every snapshot lands before this returns; no step can interleave.
            let count = scene.registry.reset_all(&mut session.runtime);
            session.clock.restart();
            session.state = SessionState::Resetting;
            session.replays += 1;
            log::info!("[session] replay: reset {} bodies", count);
            ReplayOutcome::Applied
        }
    }
}

pub(super) fn replay_signal<R: PhysicsRuntime>(
    session: &mut SimulationSession<R>,
    level: bool,
) -> Option<ReplayOutcome> {
    let rising = level && !session.replay_level;
    session.replay_level = level;
    if rising {
        Some(request_replay(session))
    } else {
        None
    }
}
