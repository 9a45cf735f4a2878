//! Renderable geometry - bridges the scene to GPU buffers
//!
//! This module flattens the primitives of a [`SceneGraph`] (or a single
//! [`ProjectedFrame`]) into line, point and mesh buffers ready for upload.

use dimview_core::{Geometry, Material, Primitive, ProjectedFrame, SceneGraph};
use dimview_math::Vec3;

use crate::pipeline::{LineVertex, MeshVertex, PointInstance};
use crate::pipeline::types::{SEGMENT_VERTEX_COUNT, TRIANGLE_VERTEX_COUNT};

/// GPU-ready geometry collected from a scene
///
/// Hidden primitives are skipped; everything else keeps the order it had in
/// the scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderableGeometry {
    /// Line list, two vertices per segment
    pub lines: Vec<LineVertex>,
    /// One instance per point marker
    pub points: Vec<PointInstance>,
    /// Triangle list, three vertices per triangle
    pub triangles: Vec<MeshVertex>,
}

impl RenderableGeometry {
    /// Create an empty renderable geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create renderable geometry with pre-allocated capacity
    pub fn with_capacity(segments: usize, points: usize, triangles: usize) -> Self {
        Self {
            lines: Vec::with_capacity(segments * SEGMENT_VERTEX_COUNT),
            points: Vec::with_capacity(points),
            triangles: Vec::with_capacity(triangles * TRIANGLE_VERTEX_COUNT),
        }
    }

    /// Collect every visible primitive of a scene
    pub fn from_scene(scene: &SceneGraph) -> Self {
        let mut result = Self::new();
        for primitive in scene.visible() {
            result.add_primitive(primitive);
        }
        log::trace!(
            "Collected {} line vertices, {} points, {} mesh vertices",
            result.lines.len(),
            result.points.len(),
            result.triangles.len()
        );
        result
    }

    /// Collect a projected frame directly, without a scene
    pub fn from_frame(frame: &ProjectedFrame) -> Self {
        let mut result =
            Self::with_capacity(frame.edges.len(), frame.points.len(), frame.triangles.len());

        for (&center, material) in frame.points.iter().zip(&frame.point_materials) {
            result.push_point(center, frame.point_radius, material);
        }
        for (&[start, end], material) in frame.edges.iter().zip(&frame.edge_materials) {
            result.push_segment(start, end, material);
        }
        for triangle in &frame.triangles {
            result.push_triangle(triangle, &frame.face_material);
        }
        result
    }

    /// Add one primitive regardless of its visibility
    pub fn add_primitive(&mut self, primitive: &Primitive) {
        let material = primitive.material();
        match primitive.geometry() {
            Geometry::Point { position, radius } => self.push_point(*position, *radius, material),
            Geometry::Segment { start, end } => self.push_segment(*start, *end, material),
            Geometry::Mesh { triangles } => {
                for triangle in triangles {
                    self.push_triangle(triangle, material);
                }
            }
        }
    }

    fn push_point(&mut self, center: Vec3, radius: f64, material: &Material) {
        self.points
            .push(PointInstance::new(center.to_f32_array(), radius as f32, material.base_color));
    }

    fn push_segment(&mut self, start: Vec3, end: Vec3, material: &Material) {
        self.lines.push(LineVertex::new(start.to_f32_array(), material.base_color));
        self.lines.push(LineVertex::new(end.to_f32_array(), material.base_color));
    }

    fn push_triangle(&mut self, triangle: &[Vec3; 3], material: &Material) {
        let corners = triangle.map(Vec3::to_f32_array);
        let normal = face_normal(corners);
        for position in corners {
            self.triangles.push(MeshVertex::new(position, normal, material.base_color));
        }
    }

    /// Clear all geometry
    pub fn clear(&mut self) {
        self.lines.clear();
        self.points.clear();
        self.triangles.clear();
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.points.is_empty() && self.triangles.is_empty()
    }

    /// Get the number of segments
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.lines.len() / SEGMENT_VERTEX_COUNT
    }

    /// Get the number of point markers
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / TRIANGLE_VERTEX_COUNT
    }

    /// Line buffer as raw bytes
    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }

    /// Point instance buffer as raw bytes
    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Mesh buffer as raw bytes
    pub fn mesh_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}

/// Unit normal of a triangle, +z when the triangle is degenerate
fn face_normal([a, b, c]: [[f32; 3]; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if length > f32::EPSILON {
        [n[0] / length, n[1] / length, n[2] / length]
    } else {
        [0.0, 0.0, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimview_core::{DimensionalShape, Scene, ShapeKind};
    use std::mem::size_of;

    #[test]
    fn test_renderable_geometry_new() {
        let geom = RenderableGeometry::new();
        assert!(geom.is_empty());
        assert_eq!(geom.segment_count(), 0);
    }

    #[test]
    fn test_from_scene_counts() {
        let mut scene = SceneGraph::new();
        DimensionalShape::create(&mut scene, 3, 1.3, true).unwrap();
        let geom = RenderableGeometry::from_scene(&scene);
        assert_eq!(geom.point_count(), 8);
        assert_eq!(geom.segment_count(), 12);
        assert_eq!(geom.triangle_count(), 12);
    }

    #[test]
    fn test_hidden_primitives_are_skipped() {
        let mut scene = SceneGraph::new();
        DimensionalShape::create(&mut scene, 4, 1.0, false).unwrap();
        assert!(!scene.is_empty());
        assert!(RenderableGeometry::from_scene(&scene).is_empty());
    }

    #[test]
    fn test_from_frame_matches_from_scene() {
        let mut scene = SceneGraph::new();
        let shape = DimensionalShape::create(&mut scene, 2, 2.0, true).unwrap();
        let frame = shape.frame(0.0, 0.0).unwrap();

        let from_frame = RenderableGeometry::from_frame(&frame);
        let from_scene = RenderableGeometry::from_scene(&scene);
        assert_eq!(from_frame.point_count(), from_scene.point_count());
        assert_eq!(from_frame.segment_count(), from_scene.segment_count());
        assert_eq!(from_frame.triangle_count(), from_scene.triangle_count());
    }

    #[test]
    fn test_byte_lengths() {
        let shape = DimensionalShape::new(ShapeKind::Tesseract, 1.0).unwrap();
        let geom = RenderableGeometry::from_frame(&shape.frame(0.3, 0.1).unwrap());
        assert_eq!(geom.point_bytes().len(), 16 * size_of::<PointInstance>());
        assert_eq!(geom.line_bytes().len(), 64 * size_of::<LineVertex>());
        assert!(geom.mesh_bytes().is_empty());
    }

    #[test]
    fn test_colors_carry_opacity() {
        let shape = DimensionalShape::new(ShapeKind::Square, 2.0).unwrap();
        let geom = RenderableGeometry::from_frame(&shape.frame(0.0, 0.0).unwrap());
        assert!(geom.triangles.iter().all(|v| v.color == Material::FACE.base_color));
        assert!(geom.lines.iter().all(|v| v.color == Material::BLACK.base_color));
    }

    #[test]
    fn test_face_normal() {
        let n = face_normal([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(n, [0.0, 0.0, 1.0]);
        let degenerate = face_normal([[0.0; 3]; 3]);
        assert_eq!(degenerate, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_clear() {
        let mut scene = SceneGraph::new();
        DimensionalShape::create(&mut scene, 1, 2.0, true).unwrap();
        let mut geom = RenderableGeometry::from_scene(&scene);
        assert_eq!(geom.segment_count(), 1);
        geom.clear();
        assert!(geom.is_empty());
    }
}
