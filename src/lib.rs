//! Visigen Engine - scene composition and physical placement in WASM
//!
//! Turns a declarative scene (surface + objects) into collision-ready rigid
//! bodies resting exactly on their surface, and restarts the scene
//! deterministically on demand.
//!
//! Architecture:
//! - core/        - constants, configuration, logging
//! - domain/      - scene description types and the input adapter
//! - systems/     - geometry, placement, body registry, physics runtime seam
//! - simulation/  - session state machine and the wasm facade

pub mod core;
pub mod domain;
pub mod simulation;
pub mod systems;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install();
    log::info!("Visigen engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::config::EngineConfig;
pub use domain::{normalize_json, SceneDescription, ValidationError};
pub use simulation::{ReplayOutcome, SceneEngine, SessionState, SimulationSession};
pub use systems::placement::PlacementError;
pub use systems::registry::RegistryError;
pub use systems::runtime::{BasicWorld, PhysicsRuntime};
