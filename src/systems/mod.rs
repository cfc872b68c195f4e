//! Systems - geometry, placement, body bookkeeping and the physics seam

pub mod geometry;
pub mod placement;
pub mod registry;
pub mod runtime;
