use glam::{Quat, Vec3};

use visigen_engine::core::config::EngineConfig;
use visigen_engine::domain::{normalize_json, SurfaceKind};
use visigen_engine::systems::geometry::{ground_frame, resolve_surface};
use visigen_engine::systems::placement::plan_initial_placement;
use visigen_engine::systems::registry::BodyRegistry;
use visigen_engine::systems::runtime::{BasicWorld, PhysicsRuntime};
use visigen_engine::{ReplayOutcome, SessionState, SimulationSession};

fn session(json: &str) -> SimulationSession<BasicWorld> {
    let mut session = SimulationSession::new(BasicWorld::new());
    session.load_json(json).expect("scene should validate");
    session
}

#[test]
fn ground_default_box_rests_at_half_height_on_origin() {
    let s = session(r#"{ "environment": { "type": "plane" }, "objects": [{ "type": "box" }] }"#);
    let t = s.body_transform(0).unwrap();
    assert_eq!(t.position, Vec3::new(0.0, 1.5, 0.0));
    assert_eq!(t.orientation, Quat::IDENTITY);
}

#[test]
fn incline_sphere_sits_on_face_at_anchor() {
    let scene = normalize_json(r#"{ "environment": { "type": "incline", "angle": 40 }, "objects": [{ "type": "sphere" }] }"#)
        .unwrap();
    let config = EngineConfig::default();
    let frame = resolve_surface(&scene.environment, &config.geometry);
    let snap = plan_initial_placement(&frame, &config, &scene.objects[0], 0).unwrap();

    let theta = 40f32.to_radians();
    let r = 1.5 * 3.0;
    assert!((snap.position.z + theta.sin() * 7.5).abs() < 1e-5);
    let surface_y = frame.surface_top_y(snap.position.z + r * theta.sin());
    assert!((snap.position.y - (surface_y + r * theta.cos())).abs() < 1e-4);
}

#[test]
fn incline_two_spheres_are_separated_along_slope() {
    let s = session(
        r#"{ "environment": { "type": "incline", "angle": 40 }, "objects": [{ "type": "sphere" }, { "type": "sphere" }] }"#,
    );
    let a = s.body_transform(0).unwrap().position;
    let b = s.body_transform(1).unwrap().position;
    assert!((b.z - a.z).abs() >= 2.0 * 4.5 + 0.5 - 1e-4);
}

#[test]
fn unknown_shape_is_skipped_but_batch_continues() {
    let s = session(
        r#"{ "environment": { "type": "incline", "angle": 40 },
             "objects": [{ "type": "sphere" }, { "type": "tetra" }, { "type": "box" }] }"#,
    );
    assert_eq!(s.body_count(), 2);
    assert_eq!(s.placement_errors().len(), 1);
    assert_eq!(s.placement_errors()[0].slot(), 1);
    assert!(s.body_transform(1).is_err());
    assert!(s.body_transform(2).is_ok());
}

#[test]
fn double_replay_in_one_frame_is_coalesced() {
    let mut s = session(r#"{ "environment": { "type": "incline", "angle": 25 }, "objects": [{ "type": "box" }] }"#);
    s.tick(0.25);
    assert_eq!(s.request_replay(), ReplayOutcome::Applied);
    assert_eq!(s.request_replay(), ReplayOutcome::Coalesced);

    let mut transitions = 0;
    let mut last = s.state();
    for _ in 0..5 {
        s.tick(1.0 / 60.0);
        if last == SessionState::Resetting && s.state() == SessionState::Running {
            transitions += 1;
        }
        last = s.state();
    }
    assert_eq!(transitions, 1);
}

#[test]
fn placed_bodies_never_overlap_surface_or_each_other() {
    let config = EngineConfig::default();
    for angle in [0, 15, 40, 65] {
        let json = format!(
            r#"{{ "environment": {{ "type": "incline", "angle": {} }},
                 "objects": [{{ "type": "sphere", "size": {{ "radius": 0.8 }} }}, {{ "type": "box" }},
                             {{ "type": "cube", "size": {{ "width": 4, "height": 1, "depth": 2 }} }},
                             {{ "type": "ball" }}, {{ "type": "crate" }}, {{ "type": "sphere", "size": {{ "radius": 2 }} }}] }}"#,
            angle
        );
        let scene = normalize_json(&json).unwrap();
        let mut world = BasicWorld::new();
        let registry = BodyRegistry::build(&mut world, &scene, &config);
        let ground = ground_frame(&config.geometry);

        let handles: Vec<_> = registry.iter().collect();
        assert_eq!(handles.len(), 6);
        for h in &handles {
            let frame = if h.resting_on == registry.frame().kind { registry.frame() } else { &ground };
            let extent = h.collider.support_extent(Quat::IDENTITY, frame.outward_normal);
            let gap = frame.signed_distance(h.snapshot.position) - extent;
            assert!(gap > -1e-3, "angle {} slot {} sinks by {}", angle, h.slot, -gap);
            let lowest = h.snapshot.position.y - h.collider.support_extent(Quat::IDENTITY, Vec3::Y);
            assert!(lowest >= -1e-4, "angle {} slot {} below the ground", angle, h.slot);
        }
        for (i, a) in handles.iter().enumerate() {
            for b in &handles[i + 1..] {
                let d = a.snapshot.position.distance(b.snapshot.position);
                let need = a.collider.bounding_radius() + b.collider.bounding_radius() + 0.5;
                assert!(d >= need - 1e-3, "angle {}: slots {} and {} too close", angle, a.slot, b.slot);
            }
        }
    }
}

#[test]
fn steep_incline_bodies_stay_above_the_ground() {
    let config = EngineConfig::default();
    for angle in [70.0, 78.0, 80.0, 85.0, 89.0, 89.9] {
        let json = format!(
            r#"{{ "environment": {{ "type": "incline", "angle": {} }},
                 "objects": [{{ "type": "sphere" }}, {{ "type": "box" }}, {{ "type": "sphere", "size": {{ "radius": 0.5 }} }}] }}"#,
            angle
        );
        let scene = normalize_json(&json).unwrap();
        let mut world = BasicWorld::new();
        let registry = BodyRegistry::build(&mut world, &scene, &config);

        assert_eq!(registry.live_count(), 3);
        for h in registry.iter() {
            let lowest = h.snapshot.position.y - h.collider.support_extent(Quat::IDENTITY, Vec3::Y);
            assert!(lowest >= -1e-4, "angle {} slot {}: lowest point at y = {}", angle, h.slot, lowest);
        }
    }
}

#[test]
fn crowded_incline_spills_onto_the_ground_base() {
    let objects = vec![r#"{ "type": "sphere" }"#; 7].join(", ");
    let json = format!(r#"{{ "environment": {{ "type": "incline", "angle": 40 }}, "objects": [{}] }}"#, objects);
    let scene = normalize_json(&json).unwrap();
    let mut world = BasicWorld::new();
    let registry = BodyRegistry::build(&mut world, &scene, &EngineConfig::default());
    let frame = registry.frame();

    assert_eq!(registry.live_count(), 7);
    for h in registry.iter().take(6) {
        assert_eq!(h.resting_on, SurfaceKind::Incline);
        assert!(h.snapshot.position.x.abs() + 4.5 <= frame.half_width + 1e-4);
    }
    let spilled = registry.get(6).unwrap();
    assert_eq!(spilled.resting_on, SurfaceKind::Ground);
    assert_eq!(spilled.snapshot.position.y, 4.5);
    assert!(spilled.snapshot.position.z + 4.5 < frame.footprint_min_z());
}

#[test]
fn reset_is_idempotent_and_complete() {
    let scene = normalize_json(
        r#"{ "environment": { "type": "incline", "angle": 35 }, "objects": [{ "type": "sphere" }, { "type": "box" }] }"#,
    )
    .unwrap();
    let mut world = BasicWorld::new();
    let registry = BodyRegistry::build(&mut world, &scene, &EngineConfig::default());

    for _ in 0..120 {
        world.step(1.0 / 60.0);
    }
    registry.reset_all(&mut world);
    registry.reset_all(&mut world);
    for h in registry.iter() {
        let pose = world.pose(h.body).unwrap();
        assert_eq!(pose.position, h.snapshot.position);
        assert_eq!(pose.orientation, h.snapshot.orientation);
        assert_eq!(world.velocities(h.body), Some((Vec3::ZERO, Vec3::ZERO)));
    }
}

#[test]
fn dispose_leaves_no_bodies_behind() {
    let scene = normalize_json(r#"{ "objects": [{ "type": "sphere" }, { "type": "box" }] }"#).unwrap();
    let mut world = BasicWorld::new();
    let mut registry = BodyRegistry::build(&mut world, &scene, &EngineConfig::default());

    registry.dispose_all(&mut world);
    registry.dispose_all(&mut world);
    assert_eq!(world.body_count(), 0);
    assert!((0..registry.len()).all(|slot| registry.get(slot).is_err()));
}
