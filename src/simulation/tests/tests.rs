use glam::Vec3;

use super::*;
use crate::systems::runtime::BasicWorld;

const INCLINE_SCENE: &str = r#"{
    "environment": { "type": "incline", "angle": 40 },
    "objects": [{ "type": "sphere" }, { "type": "box", "mass": 2 }]
}"#;

const GROUND_SCENE: &str = r#"{ "objects": [{ "type": "box" }] }"#;

fn running(json: &str) -> SimulationSession<BasicWorld> {
    let mut session = SimulationSession::new(BasicWorld::new());
    session.load_json(json).unwrap();
    session
}

fn positions(session: &SimulationSession<BasicWorld>) -> Vec<Vec3> {
    session.transforms().iter().map(|t| t.position).collect()
}

#[test]
fn new_session_is_idle_and_empty() {
    let mut session = SimulationSession::new(BasicWorld::new());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.transforms().is_empty());
    assert_eq!(session.tick(1.0 / 60.0), 0);
    assert_eq!(session.request_replay(), ReplayOutcome::Ignored);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn load_enters_running_with_bodies_and_fixtures() {
    let session = running(INCLINE_SCENE);
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.body_count(), 2);
    assert_eq!(session.fixtures().len(), 2);
    assert_eq!(session.runtime().body_count(), 4);
    assert!(session.surface().unwrap().is_tilted());
}

#[test]
fn two_requests_in_one_tick_coalesce() {
    let mut session = running(INCLINE_SCENE);
    session.tick(0.5);

    assert_eq!(session.request_replay(), ReplayOutcome::Applied);
    assert_eq!(session.state(), SessionState::Resetting);
    assert_eq!(session.request_replay(), ReplayOutcome::Coalesced);
    assert_eq!(session.state(), SessionState::Resetting);

    session.tick(1.0 / 60.0);
    assert_eq!(session.state(), SessionState::Running);
    session.tick(1.0 / 60.0);
    assert_eq!(session.state(), SessionState::Running);

    let stats = session.stats();
    assert_eq!(stats.replays, 1);
    assert_eq!(stats.coalesced_replays, 1);
}

#[test]
fn replay_puts_every_body_back_before_returning() {
    let mut session = running(INCLINE_SCENE);
    let initial = positions(&session);
    for _ in 0..30 {
        session.tick(1.0 / 60.0);
    }
    assert_ne!(positions(&session), initial);

    session.request_replay();
    assert_eq!(positions(&session), initial);
    assert_eq!(session.elapsed(), 0.0);
    let registry = session.registry().unwrap();
    for handle in registry.iter() {
        assert_eq!(
            session.runtime().velocities(handle.body),
            Some((Vec3::ZERO, Vec3::ZERO))
        );
    }
}

#[test]
fn repeated_replays_give_identical_trajectories() {
    let mut session = running(INCLINE_SCENE);
    let run = |session: &mut SimulationSession<BasicWorld>| {
        for _ in 0..45 {
            session.tick(1.0 / 60.0);
        }
        positions(session)
    };

    let first = run(&mut session);
    session.request_replay();
    let second = run(&mut session);
    session.request_replay();
    let third = run(&mut session);

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[cfg(feature = "rapier")]
#[test]
fn rapier_session_replay_restores_snapshots() {
    use crate::systems::runtime::RapierWorld;

    let mut session = SimulationSession::new(RapierWorld::new());
    session.load_json(INCLINE_SCENE).unwrap();
    assert_eq!(session.runtime().body_count(), 4);

    for _ in 0..30 {
        session.tick(1.0 / 60.0);
    }
    let registry = session.registry().unwrap();
    assert!(registry.max_drift(session.runtime()) > 0.05);

    assert_eq!(session.request_replay(), ReplayOutcome::Applied);
    let registry = session.registry().unwrap();
    assert!(registry.max_drift(session.runtime()) < 1e-5);
    for handle in registry.iter() {
        assert_eq!(
            session.runtime().velocities(handle.body),
            Some((Vec3::ZERO, Vec3::ZERO))
        );
    }

    session.tick(1.0 / 60.0);
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn replay_signal_fires_on_rising_edge_only() {
    let mut session = running(GROUND_SCENE);
    assert_eq!(session.replay_signal(false), None);
    assert_eq!(session.replay_signal(true), Some(ReplayOutcome::Applied));
    session.tick(1.0 / 60.0);
    assert_eq!(session.replay_signal(true), None);
    assert_eq!(session.replay_signal(false), None);
    assert_eq!(session.replay_signal(true), Some(ReplayOutcome::Applied));
}

#[test]
fn teardown_while_resetting_disposes_everything() {
    let mut session = running(INCLINE_SCENE);
    session.request_replay();
    assert_eq!(session.state(), SessionState::Resetting);

    session.teardown();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.runtime().body_count(), 0);
    assert!(session.transforms().is_empty());
    assert!(session.body_transform(0).is_err());

    session.teardown();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.request_replay(), ReplayOutcome::Ignored);
}

#[test]
fn invalid_payload_keeps_previous_scene() {
    let mut session = running(INCLINE_SCENE);
    let before = session.description().cloned();

    let err = session.load_json(r#"{ "objects": [{ "type": 3 }] }"#);
    assert!(err.is_err());
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.description().cloned(), before);
    assert_eq!(session.body_count(), 2);

    assert!(session.load_json("not json").is_err());
    assert_eq!(session.runtime().body_count(), 4);
}

#[test]
fn reload_replaces_registry_without_leaking_bodies() {
    let mut session = running(INCLINE_SCENE);
    session.load_json(GROUND_SCENE).unwrap();
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.body_count(), 1);
    assert_eq!(session.runtime().body_count(), 2);
    assert!(session.body_transform(1).is_err());

    session.request_replay();
    session.load_json(INCLINE_SCENE).unwrap();
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.runtime().body_count(), 4);
}

#[test]
fn duration_stops_stepping_until_replay() {
    let mut session = running(
        r#"{ "objects": [{ "type": "sphere" }], "simulation": { "timestep": 0.05, "duration": 0.1 } }"#,
    );
    assert_eq!(session.tick(0.05), 1);
    assert_eq!(session.tick(0.05), 1);
    assert!(session.is_finished());
    assert_eq!(session.tick(0.05), 0);

    session.request_replay();
    assert!(!session.is_finished());
    assert_eq!(session.tick(0.05), 1);
}

#[test]
fn flat_transform_buffer_matches_records() {
    let session = running(INCLINE_SCENE);
    let mut buf = Vec::new();
    session.write_transforms(&mut buf);
    assert_eq!(buf.len(), 2 * TRANSFORM_STRIDE);

    let second = session.body_transform(1).unwrap();
    assert_eq!(buf[TRANSFORM_STRIDE], 1.0);
    assert_eq!(buf[TRANSFORM_STRIDE + 1], second.position.x);
    assert_eq!(buf[TRANSFORM_STRIDE + 2], second.position.y);
    assert_eq!(buf[TRANSFORM_STRIDE + 7], second.orientation.w);
}
