//! Per-dimension color and opacity rules
//!
//! Colors are derived from the original (unrotated) vertex coordinates, so a
//! vertex keeps its color for the life of the shape while it spins.

use dimview_math::Vertex;
use crate::Material;

/// How a shape colors its vertices, edges and faces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorPolicy {
    /// Black points and lines, translucent black faces
    Uniform,
    /// Vertices split by the sign of the fourth coordinate
    ///
    /// Negative w is the "inner" cube (black), the rest the "outer" cube (amber).
    FourthAxisSplit,
    /// Gray levels and edge opacity follow the fourth and fifth coordinates
    HigherAxesGradient,
}

/// Coordinate `axis`, treating missing axes as zero
#[inline]
fn coord(vertex: &Vertex, axis: usize) -> f64 {
    vertex.get(axis).unwrap_or(0.0)
}

/// Edge opacity from the mean w and v of its endpoints
///
/// `0.5 + (w̄ + 0.5)·0.25 + (v̄ + 0.5)·0.25`, clamped to `0..=1`.
pub fn gradient_edge_opacity(a: &Vertex, b: &Vertex) -> f32 {
    let w = (coord(a, 3) + coord(b, 3)) / 2.0;
    let v = (coord(a, 4) + coord(b, 4)) / 2.0;
    (0.5 + (w + 0.5) * 0.25 + (v + 0.5) * 0.25).clamp(0.0, 1.0) as f32
}

/// Vertex gray level from its w and v
///
/// `0.2 + (w + 0.5)·0.3 + (v + 0.5)·0.3`, clamped to `0..=1`.
pub fn gradient_vertex_level(vertex: &Vertex) -> f32 {
    let w = coord(vertex, 3);
    let v = coord(vertex, 4);
    (0.2 + (w + 0.5) * 0.3 + (v + 0.5) * 0.3).clamp(0.0, 1.0) as f32
}

impl ColorPolicy {
    /// Material for a point marker at `original`
    pub fn vertex_material(&self, original: &Vertex) -> Material {
        match self {
            ColorPolicy::Uniform => Material::BLACK,
            ColorPolicy::FourthAxisSplit => {
                if coord(original, 3) < 0.0 {
                    Material::BLACK
                } else {
                    Material::AMBER
                }
            }
            ColorPolicy::HigherAxesGradient => Material::gray(gradient_vertex_level(original)),
        }
    }

    /// Material for the edge joining `a` and `b`
    pub fn edge_material(&self, a: &Vertex, b: &Vertex) -> Material {
        match self {
            ColorPolicy::Uniform | ColorPolicy::FourthAxisSplit => Material::BLACK,
            ColorPolicy::HigherAxesGradient => {
                Material::BLACK.with_opacity(gradient_edge_opacity(a, b))
            }
        }
    }

    /// Material for square faces
    pub fn face_material(&self) -> Material {
        Material::FACE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_black() {
        let v = Vertex::from([0.5, 0.5, 0.5]);
        assert_eq!(ColorPolicy::Uniform.vertex_material(&v), Material::BLACK);
        assert_eq!(ColorPolicy::Uniform.edge_material(&v, &v), Material::BLACK);
    }

    #[test]
    fn test_fourth_axis_split() {
        let inner = Vertex::from([0.5, 0.5, 0.5, -0.5]);
        let outer = Vertex::from([0.5, 0.5, 0.5, 0.5]);
        let policy = ColorPolicy::FourthAxisSplit;
        assert_eq!(policy.vertex_material(&inner), Material::BLACK);
        assert_eq!(policy.vertex_material(&outer), Material::AMBER);
        assert_eq!(policy.edge_material(&inner, &outer), Material::BLACK);
    }

    #[test]
    fn test_gradient_edge_opacity_range() {
        let low = Vertex::from([0.0, 0.0, 0.0, -0.5, -0.5]);
        let high = Vertex::from([0.0, 0.0, 0.0, 0.5, 0.5]);
        assert_eq!(gradient_edge_opacity(&low, &low), 0.5);
        assert_eq!(gradient_edge_opacity(&high, &high), 1.0);
        assert_eq!(gradient_edge_opacity(&low, &high), 0.75);
    }

    #[test]
    fn test_gradient_vertex_level() {
        assert!((gradient_vertex_level(&Vertex::from([0.0, 0.0, 0.0, -0.5, -0.5])) - 0.2).abs() < 1e-6);
        assert!((gradient_vertex_level(&Vertex::from([0.0, 0.0, 0.0, 0.5, 0.5])) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_clamps_large_sizes() {
        let far = Vertex::from([0.0, 0.0, 0.0, 5.0, 5.0]);
        assert_eq!(gradient_edge_opacity(&far, &far), 1.0);
        assert_eq!(gradient_vertex_level(&far), 1.0);
    }

    #[test]
    fn test_gradient_materials() {
        let v = Vertex::from([0.0, 0.0, 0.0, -0.5, -0.5]);
        let policy = ColorPolicy::HigherAxesGradient;
        assert_eq!(policy.edge_material(&v, &v).opacity(), 0.5);
        let level = policy.vertex_material(&v).base_color[0];
        assert!((level - 0.2).abs() < 1e-6);
    }
}
