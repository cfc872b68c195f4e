//! Placement Planner - initial resting poses for scene objects
//!
//! Positions are computed from geometry, never by letting physics settle:
//! every object starts with its lowest point on the surface and clear of all
//! objects placed before it. On an incline, objects that no longer fit on the
//! tilted face spill onto the ground base in front of its low edge.

mod extent;
mod layout;
mod snapshot;

use serde::Serialize;
use thiserror::Error;

pub use extent::collider_for;
pub use layout::{plan_initial_placement, LayoutPlanner, PlannedBody};
pub use snapshot::PlacementSnapshot;

/// Per-object failure; the object gets no body and the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum PlacementError {
    #[error("object {slot}: unrecognized shape `{shape}`")]
    UnrecognizedShape { slot: usize, shape: String },
    #[error("object {slot}: no free space left on the incline or the ground")]
    NoRoom { slot: usize },
}

impl PlacementError {
    pub fn slot(&self) -> usize {
        match *self {
            PlacementError::UnrecognizedShape { slot, .. } | PlacementError::NoRoom { slot } => slot,
        }
    }

    fn with_slot(self, slot: usize) -> Self {
        match self {
            PlacementError::UnrecognizedShape { shape, .. } => PlacementError::UnrecognizedShape { slot, shape },
            PlacementError::NoRoom { .. } => PlacementError::NoRoom { slot },
        }
    }
}
