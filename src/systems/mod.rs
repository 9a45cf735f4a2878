//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod simulation;
mod render;

pub use simulation::{SimulationResult, SimulationSystem, DEFAULT_MAX_DT};
pub use render::{FrameStats, RenderSystem};
