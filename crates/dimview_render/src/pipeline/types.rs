//! GPU-compatible data types for the line, point and mesh passes
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// One endpoint of a line segment
///
/// Segments are drawn as line lists, two vertices per segment.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// Position in 3D space (x, y, z)
    pub position: [f32; 3],
    /// Padding to align color to 16 bytes
    pub _padding: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl LineVertex {
    /// Create a new line vertex
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, _padding: 0.0, color }
    }
}

/// One instanced sphere marker
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    /// Center in 3D space
    pub center: [f32; 3],
    /// Sphere radius
    pub radius: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl PointInstance {
    /// Create a new point instance
    pub fn new(center: [f32; 3], radius: f32, color: [f32; 4]) -> Self {
        Self { center, radius, color }
    }
}

/// A vertex of a face triangle
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in 3D space (x, y, z)
    pub position: [f32; 3],
    /// Surface normal for lighting
    pub normal: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
    /// Padding to align to 16 bytes
    pub _padding: [f32; 2],
}

impl Default for MeshVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0, 0.0, 1.0],
            color: [1.0; 4],
            _padding: [0.0; 2],
        }
    }
}

impl MeshVertex {
    /// Create a new mesh vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, normal, color, _padding: [0.0; 2] }
    }
}

/// Number of vertices emitted per segment
pub const SEGMENT_VERTEX_COUNT: usize = 2;

/// Number of vertices emitted per triangle
pub const TRIANGLE_VERTEX_COUNT: usize = 3;
