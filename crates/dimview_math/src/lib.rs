//! N-dimensional geometry for dimview
//!
//! This crate generates hypercubes of dimension 0 through 5, rotates them in
//! coordinate planes and projects them down to 3D with perspective division.
//!
//! ## Core Types
//!
//! - [`Vertex`] - A point with up to 5 coordinates
//! - [`Vec3`] - A projected, renderable 3D position
//! - [`Hypercube`] - Vertices, edges and square faces of an n-cube
//! - [`RotationPlane`] / [`HyperRotation`] - Rotations in coordinate planes
//! - [`PerspectiveProjector`] / [`ProjectionChain`] - Dimension-reducing projection
//!
//! Every operation is a pure function of its inputs. Contract violations
//! (bad dimension, bad axis, collapsing projection) are reported as
//! [`GeometryError`] and never clamped silently.

mod error;
mod vertex;
mod vec3;
pub mod hypercube;
pub mod rotation;
pub mod projection;

pub use error::GeometryError;
pub use vertex::{Vertex, MAX_DIMENSION};
pub use vec3::Vec3;
pub use hypercube::{Edge, Face, Hypercube, Polytope, validate_dimension};
pub use rotation::{HyperRotation, PlaneRotation, RotationPlane, rotate, rotate_about_vertical};
pub use projection::{
    Degeneracy, PerspectiveProjector, ProjectionChain, project_down, DEFAULT_EYE_OFFSET,
    DEGENERACY_EPSILON,
};
