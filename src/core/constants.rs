//! Design constants
//!
//! Defaults for the declared engine parameters. Everything here can be
//! overridden through `EngineConfig`; the values match the scene layout the
//! Visigen front end was tuned against.

// === Incline slab ===

/// Half thickness of the inclined slab (full slab is 0.8 thick)
pub const INCLINE_HALF_THICKNESS: f32 = 0.4;
/// Half length of the inclined slab along its slope axis (full slab is 30 long)
pub const INCLINE_HALF_LENGTH: f32 = 15.0;
/// Half width of the inclined slab across the slope (full slab is 30 wide)
pub const INCLINE_HALF_WIDTH: f32 = 15.0;
/// Lift applied to the incline so its low edge does not z-fight the ground
pub const SURFACE_EPSILON: f32 = 0.0005;

// === Ground base slab ===

/// Half extent of the square ground base in X and Z (full base is 60 x 60)
pub const GROUND_HALF_EXTENT: f32 = 30.0;
/// Full thickness of the ground base; its top face is the plane y = 0
pub const GROUND_THICKNESS: f32 = 1.5;

// === Size-to-geometry mapping ===

/// Declared sphere radius is multiplied by this before building the collider
pub const SPHERE_RADIUS_SCALE: f32 = 3.0;
/// Declared box dimensions are multiplied by this
pub const BOX_SCALE: f32 = 1.0;
/// Edge length used for any box dimension the description leaves out
pub const DEFAULT_BOX_EDGE: f32 = 3.0;

// === Layout ===

/// Gap left between the bounding extents of neighbouring objects at spawn
pub const SPAWN_MARGIN: f32 = 0.5;

// === Scene description defaults ===

pub const MAX_ANGLE_DEGREES: f32 = 89.9;
pub const DEFAULT_RESTITUTION: f32 = 0.3;
pub const DEFAULT_FRICTION: f32 = 0.4;
pub const DEFAULT_RADIUS: f32 = 1.5;
pub const DEFAULT_MASS: f32 = 1.0;
pub const MIN_MASS: f32 = 0.01;
pub const MAX_MASS: f32 = 1000.0;
pub const MAX_OBJECTS: usize = 64;

pub const DEFAULT_OBJECT_COLOR: &str = "#E2562C";
pub const DEFAULT_SURFACE_COLOR: &str = "#AAAAAA";

pub const DEFAULT_AMBIENT_INTENSITY: f32 = 0.5;
pub const DEFAULT_DIRECTIONAL_INTENSITY: f32 = 0.8;

pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];
pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [75.0, 40.0, -80.0];

// === Stepping ===

pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;
pub const MIN_TIMESTEP: f32 = 1.0 / 1000.0;
pub const MAX_TIMESTEP: f32 = 1.0 / 15.0;
/// Upper bound on fixed steps taken for a single rendered frame
pub const MAX_SUBSTEPS: u32 = 8;
