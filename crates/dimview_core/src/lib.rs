//! Core types for dimview
//!
//! This crate turns the pure geometry of `dimview_math` into things a scene
//! can draw:
//!
//! - [`Material`] - Color and opacity of a primitive
//! - [`Primitive`] - A point, segment or triangle mesh in a scene
//! - [`Scene`] / [`SceneGraph`] - Where primitives live
//! - [`ShapeKind`] / [`ShapeDescriptor`] - Per-dimension metadata table
//! - [`ColorPolicy`] - How each dimension colors its vertices and edges
//! - [`DimensionalShape`] - One hypercube drawn into a scene
//! - [`Viewer`] - The six shapes plus animation state

mod material;
mod primitive;
mod scene;
mod coloring;
mod descriptor;
mod shape;
mod viewer;

pub use material::Material;
pub use primitive::{DirtyFlags, Geometry, Primitive};
pub use scene::{PrimitiveKey, Scene, SceneGraph};
pub use coloring::{gradient_edge_opacity, gradient_vertex_level, ColorPolicy};
pub use descriptor::{ShapeDescriptor, ShapeKind};
pub use shape::{DimensionalShape, ProjectedFrame, ShapeError, ShapeState};
pub use viewer::{
    rate_from_slider, TickOutcome, Viewer, ViewerOptions, ViewerState, DEFAULT_RATE, DEFAULT_SIZES,
};

// Re-export commonly used types from dimview_math for convenience
pub use dimview_math::{
    Degeneracy, GeometryError, Hypercube, Polytope, ProjectionChain, RotationPlane, Vec3, Vertex,
};
