//! Core - constants, configuration and logging shared by every layer

pub mod config;
pub mod constants;
pub mod logging;
