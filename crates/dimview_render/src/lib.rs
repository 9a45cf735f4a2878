//! Render buffers for dimview
//!
//! This crate turns a scene of points, segments and face meshes into
//! `#[repr(C)]` buffers a GPU renderer can upload as-is. It owns no device
//! or window state.
//!
//! ## Key Components
//!
//! - [`pipeline::LineVertex`] / [`pipeline::PointInstance`] / [`pipeline::MeshVertex`] - Shader layouts
//! - [`renderable::RenderableGeometry`] - Converts a scene or frame to buffers

pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use dimview_core::{Material, Primitive, ProjectedFrame, SceneGraph};

// Re-export renderable for easy access
pub use renderable::RenderableGeometry;
