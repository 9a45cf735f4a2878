//! Buffer layouts shared with the shaders
//!
//! Only the data side of the pipeline lives here; device and surface
//! management belong to the embedding application.

pub mod types;

// Re-export types
pub use types::{LineVertex, MeshVertex, PointInstance};
