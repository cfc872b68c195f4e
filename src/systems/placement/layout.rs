use glam::{Quat, Vec3};

use crate::core::config::{EngineConfig, SizeMapping};
use crate::domain::{ObjectSpec, SurfaceKind};
use crate::systems::geometry::{ground_frame, SurfaceFrame};
use crate::systems::runtime::ColliderShape;

use super::{collider_for, PlacementError, PlacementSnapshot};

/// Float slack for the pairwise clearance check.
const CLEARANCE_TOLERANCE: f32 = 1e-4;

/// One successfully placed object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedBody {
    pub slot: usize,
    pub collider: ColliderShape,
    pub snapshot: PlacementSnapshot,
    /// Surface the object starts on; Ground for objects that spilled off an incline
    pub resting_on: SurfaceKind,
}

#[derive(Clone, Copy, Debug)]
struct Placed {
    center: Vec3,
    bound: f32,
}

#[derive(Clone, Copy, Debug)]
struct Cursor {
    z: f32,
    bound: f32,
}

/// Measures of one collider against a region's frame
#[derive(Clone, Copy, Debug)]
struct Footprint {
    /// Support distance along the surface normal
    extent: f32,
    /// Support distance straight down
    drop: f32,
    /// Bounding radius
    bound: f32,
}

impl Footprint {
    fn new(collider: &ColliderShape, frame: &SurfaceFrame) -> Self {
        Self {
            extent: collider.support_extent(Quat::IDENTITY, frame.outward_normal),
            drop: collider.support_extent(Quat::IDENTITY, Vec3::Y),
            bound: collider.bounding_radius(),
        }
    }
}

/// A rectangle of one surface with its own lanes and cursor.
///
/// Positions are solved in face coordinates (lateral x, up-slope s) so steep
/// faces keep their heights exact; the cursor still steps in world z.
#[derive(Clone, Debug)]
struct Region {
    frame: SurfaceFrame,
    /// World z of the first centre in every lane, if the lane has a preferred start
    anchor_z: Option<f32>,
    s_min: f32,
    s_max: f32,
    half_width: f32,
    lane: u32,
    cursor: Option<Cursor>,
}

impl Region {
    /// The whole top face of the scene's surface
    fn surface(frame: SurfaceFrame) -> Self {
        let anchor_z = if frame.is_tilted() {
            -frame.tilt_radians.sin() * frame.half_length * 0.5
        } else {
            0.0
        };
        Self {
            frame,
            anchor_z: Some(anchor_z),
            s_min: -frame.half_length,
            s_max: frame.half_length,
            half_width: frame.half_width,
            lane: 0,
            cursor: None,
        }
    }

    /// Ground base in front of an incline's low edge
    fn apron(incline: &SurfaceFrame, config: &EngineConfig) -> Self {
        let ground = ground_frame(&config.geometry);
        Self {
            frame: ground,
            anchor_z: None,
            s_min: -ground.half_length,
            s_max: incline.footprint_min_z() - config.layout.spawn_margin,
            half_width: ground.half_width,
            lane: 0,
            cursor: None,
        }
    }

    /// Up-slope range of the contact point for this body, or None if it
    /// cannot fit at all.
    fn slope_range(&self, body: &Footprint) -> Option<(f32, f32)> {
        let lo = if self.frame.is_tilted() {
            // The contact point stays on the face and the lowest point stays on
            // or above the ground top (y = 0).
            let (sin, cos) = self.frame.tilt_radians.sin_cos();
            let clear_ground = (body.drop - body.extent * cos - self.frame.top_center().y) / sin;
            self.s_min.max(clear_ground)
        } else {
            self.s_min + body.bound
        };
        let hi = self.s_max - body.bound;
        (lo <= hi).then_some((lo, hi))
    }

    fn try_place(&mut self, body: &Footprint, pitch: f32, margin: f32, placed: &[Placed]) -> Option<Vec3> {
        let (lo, hi) = self.slope_range(body)?;
        loop {
            let x = lane_offset(self.lane, pitch);
            if x.abs() + body.bound > self.half_width {
                return None;
            }

            let mut s = match self.cursor {
                Some(prev) => self
                    .frame
                    .slope_coordinate(prev.z + prev.bound + margin + body.bound, body.extent)
                    .max(lo),
                None => self
                    .anchor_z
                    .map_or(lo, |z| self.frame.slope_coordinate(z, body.extent))
                    .max(lo)
                    .min(hi),
            };

            // Each conflict jumps strictly past the conflicting object in z, so
            // a lane is scanned in a bounded number of steps.
            while s <= hi {
                let center = self.frame.face_point(x, s, body.extent);
                let Some(other) = conflict(placed, center, body.bound, margin) else {
                    self.cursor = Some(Cursor { z: center.z, bound: body.bound });
                    return Some(center);
                };
                let past = other.center.z + other.bound + margin + body.bound;
                s = self.frame.slope_coordinate(past, body.extent).max(s + CLEARANCE_TOLERANCE);
            }

            self.lane += 1;
            self.cursor = None;
        }
    }
}

/// Deterministic batch layout.
///
/// Objects march up-slope from the anchor, each one starting
/// `b_prev + margin + b` past the previous centre in world z (b = bounding
/// radius). When a lane runs off the face it wraps to the next lane in x:
/// 0, +p, -p, +2p, ... with p = 2 * largest bounding radius so far + margin,
/// as long as the lane still fits within the face width. A full incline
/// continues on the ground base in front of its low edge.
pub struct LayoutPlanner {
    sizing: SizeMapping,
    margin: f32,
    lane_pitch: f32,
    surface: Region,
    apron: Option<Region>,
    placed: Vec<Placed>,
}

impl LayoutPlanner {
    pub fn new(frame: SurfaceFrame, config: &EngineConfig) -> Self {
        Self {
            sizing: config.sizing.clone(),
            margin: config.layout.spawn_margin,
            lane_pitch: 0.0,
            surface: Region::surface(frame),
            apron: frame.is_tilted().then(|| Region::apron(&frame, config)),
            placed: Vec::new(),
        }
    }

    /// World z of the first object in every lane of the surface
    pub fn anchor_z(&self) -> f32 {
        self.surface.anchor_z.unwrap_or_default()
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Place the next object of the batch. An unrecognized shape is rejected
    /// without moving the cursor.
    pub fn place(&mut self, slot: usize, spec: &ObjectSpec) -> Result<PlannedBody, PlacementError> {
        let collider = collider_for(&spec.shape, &spec.size, &self.sizing).ok_or_else(|| {
            PlacementError::UnrecognizedShape { slot, shape: spec.shape.name().to_string() }
        })?;

        let bound = collider.bounding_radius();
        self.lane_pitch = self.lane_pitch.max(2.0 * bound + self.margin);

        let on_surface = Footprint::new(&collider, &self.surface.frame);
        let mut spot = self
            .surface
            .try_place(&on_surface, self.lane_pitch, self.margin, &self.placed)
            .map(|center| (center, self.surface.frame.kind));

        if spot.is_none() {
            if let Some(apron) = self.apron.as_mut() {
                let on_ground = Footprint::new(&collider, &apron.frame);
                spot = apron
                    .try_place(&on_ground, self.lane_pitch, self.margin, &self.placed)
                    .map(|center| (center, SurfaceKind::Ground));
            }
        }

        let (center, resting_on) = spot.ok_or(PlacementError::NoRoom { slot })?;
        self.placed.push(Placed { center, bound });

        Ok(PlannedBody {
            slot,
            collider,
            snapshot: PlacementSnapshot::at_rest(center),
            resting_on,
        })
    }
}

fn conflict(placed: &[Placed], center: Vec3, bound: f32, margin: f32) -> Option<Placed> {
    placed
        .iter()
        .copied()
        .find(|p| p.center.distance(center) < p.bound + bound + margin - CLEARANCE_TOLERANCE)
}

fn lane_offset(lane: u32, pitch: f32) -> f32 {
    if lane == 0 {
        return 0.0;
    }
    let step = ((lane + 1) / 2) as f32 * pitch;
    if lane % 2 == 1 {
        step
    } else {
        -step
    }
}

/// Snapshot for `slot` in a batch where every object looks like `spec`.
pub fn plan_initial_placement(
    frame: &SurfaceFrame,
    config: &EngineConfig,
    spec: &ObjectSpec,
    slot: usize,
) -> Result<PlacementSnapshot, PlacementError> {
    let mut planner = LayoutPlanner::new(*frame, config);
    let mut planned = planner.place(0, spec).map_err(|e| e.with_slot(slot))?;
    for i in 1..=slot {
        planned = planner.place(i, spec).map_err(|e| e.with_slot(slot))?;
    }
    Ok(planned.snapshot)
}
