//! BasicWorld - minimal in-crate rigid body runtime
//!
//! Intentionally simple (no SAT, no body-body contacts, no solver):
//! - Dynamic bodies integrate gravity with semi-implicit Euler.
//! - Contacts only against the top faces of fixed cuboids (ground, incline).
//! - Restitution + friction on the linear velocity; angular velocity is
//!   integrated but never generated by contacts.
//!
//! Bodies live in a generational arena so a stale `BodyId` can never address
//! a body created later in the same slot.

use glam::Vec3;

use super::body::{BodyDesc, BodyKind, ColliderShape, Pose};
use super::contact::{integrate_orientation, resolve, SupportFace};
use super::PhysicsRuntime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId {
    index: u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Body {
    kind: BodyKind,
    pose: Pose,
    collider: ColliderShape,
    linvel: Vec3,
    angvel: Vec3,
    restitution: f32,
    friction: f32,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Manages all bodies of one scene
#[derive(Debug)]
pub struct BasicWorld {
    slots: Vec<Slot>,
    free: Vec<u32>,
    gravity: Vec3,
    live: usize,
    faces: Vec<SupportFace>,
    faces_dirty: bool,
}

impl BasicWorld {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            gravity: Vec3::new(0.0, -9.81, 0.0),
            live: 0,
            faces: Vec::new(),
            faces_dirty: false,
        }
    }

    fn get(&self, id: BodyId) -> Option<&Body> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.body.as_ref()
    }

    fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.body.as_mut()
    }

    fn rebuild_faces(&mut self) {
        self.faces.clear();
        for body in self.slots.iter().filter_map(|s| s.body.as_ref()) {
            if body.kind != BodyKind::Fixed {
                continue;
            }
            if let ColliderShape::Cuboid { half_extents } = body.collider {
                self.faces.push(SupportFace::from_fixed_cuboid(
                    body.pose,
                    half_extents,
                    body.restitution,
                    body.friction,
                ));
            }
        }
        self.faces_dirty = false;
    }
}

impl Default for BasicWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsRuntime for BasicWorld {
    type Handle = BodyId;

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    fn create_body(&mut self, desc: &BodyDesc) -> BodyId {
        let body = Body {
            kind: desc.kind,
            pose: desc.pose,
            collider: desc.collider,
            linvel: Vec3::ZERO,
            angvel: Vec3::ZERO,
            restitution: desc.restitution.clamp(0.0, 1.0),
            friction: desc.friction.max(0.0),
        };
        if body.kind == BodyKind::Fixed {
            self.faces_dirty = true;
        }
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return BodyId { index, generation: slot.generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, body: Some(body) });
        BodyId { index, generation: 0 }
    }

    fn remove_body(&mut self, id: BodyId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return false;
        };
        if slot.generation != id.generation {
            return false;
        }
        let Some(body) = slot.body.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        if body.kind == BodyKind::Fixed {
            self.faces_dirty = true;
        }
        true
    }

    fn set_pose(&mut self, id: BodyId, pose: Pose) {
        let mut moved_fixed = false;
        if let Some(body) = self.get_mut(id) {
            body.pose = pose;
            moved_fixed = body.kind == BodyKind::Fixed;
        }
        if moved_fixed {
            self.faces_dirty = true;
        }
    }

    fn set_velocities(&mut self, id: BodyId, linear: Vec3, angular: Vec3) {
        if let Some(body) = self.get_mut(id) {
            if body.kind == BodyKind::Dynamic {
                body.linvel = linear;
                body.angvel = angular;
            }
        }
    }

    fn pose(&self, id: BodyId) -> Option<Pose> {
        self.get(id).map(|b| b.pose)
    }

    fn velocities(&self, id: BodyId) -> Option<(Vec3, Vec3)> {
        self.get(id).map(|b| (b.linvel, b.angvel))
    }

    fn step(&mut self, dt: f32) {
        if self.faces_dirty {
            self.rebuild_faces();
        }
        let gravity = self.gravity;

        for body in self.slots.iter_mut().filter_map(|s| s.body.as_mut()) {
            if body.kind != BodyKind::Dynamic {
                continue;
            }

            body.linvel += gravity * dt;
            body.pose.position += body.linvel * dt;
            body.pose.orientation = integrate_orientation(body.pose.orientation, body.angvel, dt);

            for face in self.faces.iter() {
                if let Some(depth) = face.penetration(&body.collider, &body.pose) {
                    resolve(
                        face,
                        depth,
                        &mut body.pose.position,
                        &mut body.linvel,
                        body.restitution,
                        body.friction,
                    );
                }
            }
        }
    }

    fn body_count(&self) -> usize {
        self.live
    }
}
