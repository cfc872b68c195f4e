use crate::domain::{normalize_json, SceneDescription, ValidationError};
use crate::systems::registry::BodyRegistry;
use crate::systems::runtime::PhysicsRuntime;

use super::{LoadedScene, SessionState, SimulationSession, StepClock};

pub(super) fn load<R: PhysicsRuntime>(session: &mut SimulationSession<R>, description: SceneDescription) {
    dispose_current(session);

    let sim = &description.simulation;
    session.runtime.set_gravity(sim.gravity);
    session.clock = StepClock::new(sim.timestep, session.config.stepping.max_substeps, sim.duration);

    let registry = BodyRegistry::build(&mut session.runtime, &description, &session.config);
    log::info!(
        "[session] loaded {:?} scene: {} objects, {} bodies, {} skipped",
        description.environment.kind,
        description.object_count(),
        registry.live_count(),
        registry.placement_errors().len()
    );

    session.scene = Some(LoadedScene { description, registry });
    session.state = SessionState::Running;
    session.loads += 1;
}

pub(super) fn load_json<R: PhysicsRuntime>(
    session: &mut SimulationSession<R>,
    json: &str,
) -> Result<(), ValidationError> {
    let description = normalize_json(json).map_err(|err| {
        log::warn!("[session] rejected scene: {}", err);
        err
    })?;
    load(session, description);
    Ok(())
}

pub(super) fn teardown<R: PhysicsRuntime>(session: &mut SimulationSession<R>) {
    let had_scene = session.scene.is_some();
    dispose_current(session);
    session.state = SessionState::Idle;
    session.clock = StepClock::idle(session.config.stepping.max_substeps);
    if had_scene {
        log::info!("[session] teardown");
    }
}

fn dispose_current<R: PhysicsRuntime>(session: &mut SimulationSession<R>) {
    if let Some(mut scene) = session.scene.take() {
        scene.registry.dispose_all(&mut session.runtime);
    }
}
