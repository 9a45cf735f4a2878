//! Perspective projection from n dimensions down to n-1
//!
//! The viewpoint sits on the dropped axis at distance `eye_offset` from the
//! origin. Each vertex is scaled by `1 / (eye_offset - last)`, so vertices
//! nearer the eye along the hidden axis appear larger, just as a 3D
//! perspective camera enlarges near objects.

use crate::{GeometryError, Vec3, Vertex};

/// Default distance of the eye along the dropped axis
pub const DEFAULT_EYE_OFFSET: f64 = 2.0;

/// Smallest denominator magnitude accepted before a projection counts as degenerate
pub const DEGENERACY_EPSILON: f64 = 1e-6;

/// What to do when `eye_offset - last` collapses toward zero
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Degeneracy {
    /// Fail with [`GeometryError::DegenerateProjection`]
    #[default]
    Reject,
    /// Replace the denominator by `±epsilon`, keeping its sign (`+` for exactly zero)
    Clamp,
}

/// A single n → n-1 perspective step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveProjector {
    /// Distance of the eye along the dropped axis
    pub eye_offset: f64,
    /// Policy for near-zero denominators
    pub degeneracy: Degeneracy,
    /// Threshold below which a denominator counts as degenerate
    pub epsilon: f64,
}

impl Default for PerspectiveProjector {
    fn default() -> Self {
        Self::new(DEFAULT_EYE_OFFSET)
    }
}

impl PerspectiveProjector {
    /// Create a projector that rejects degenerate denominators
    pub fn new(eye_offset: f64) -> Self {
        Self {
            eye_offset,
            degeneracy: Degeneracy::Reject,
            epsilon: DEGENERACY_EPSILON,
        }
    }

    /// Set the degeneracy policy
    pub fn with_degeneracy(mut self, degeneracy: Degeneracy) -> Self {
        self.degeneracy = degeneracy;
        self
    }

    /// Perspective factor for a vertex whose dropped coordinate is `last`
    fn factor(&self, index: usize, last: f64) -> Result<f64, GeometryError> {
        let denominator = self.eye_offset - last;
        if !denominator.is_finite() {
            return Err(GeometryError::DegenerateProjection { index, denominator });
        }

        if denominator.abs() >= self.epsilon {
            return Ok(1.0 / denominator);
        }

        match self.degeneracy {
            Degeneracy::Reject => Err(GeometryError::DegenerateProjection { index, denominator }),
            Degeneracy::Clamp => {
                let clamped = if denominator < 0.0 { -self.epsilon } else { self.epsilon };
                Ok(1.0 / clamped)
            }
        }
    }

    /// Project one vertex; `index` is only used for error reporting
    pub fn project_vertex(&self, vertex: &Vertex, index: usize) -> Result<Vertex, GeometryError> {
        let last = vertex
            .last()
            .ok_or(GeometryError::InvalidDimension { dimension: 0 })?;
        if !vertex.is_finite() {
            return Err(GeometryError::DegenerateProjection { index, denominator: f64::NAN });
        }

        let factor = self.factor(index, last)?;
        vertex
            .drop_last_scaled(factor)
            .ok_or(GeometryError::InvalidDimension { dimension: 0 })
    }

    /// Project every vertex, dropping its last coordinate
    pub fn project_down(&self, vertices: &[Vertex]) -> Result<Vec<Vertex>, GeometryError> {
        vertices
            .iter()
            .enumerate()
            .map(|(i, v)| self.project_vertex(v, i))
            .collect()
    }
}

/// Project vertices down one dimension with the default (rejecting) policy
pub fn project_down(vertices: &[Vertex], eye_offset: f64) -> Result<Vec<Vertex>, GeometryError> {
    PerspectiveProjector::new(eye_offset).project_down(vertices)
}

/// Successive projections from up to 5D down to 3D
///
/// A 5D vertex first loses its fifth axis (the `v` stage), then its fourth
/// (the `w` stage). 4D vertices only pass through the `w` stage. Vertices
/// with three or fewer coordinates are embedded as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionChain {
    /// Drops the fourth axis (4D → 3D)
    pub w_stage: PerspectiveProjector,
    /// Drops the fifth axis (5D → 4D)
    pub v_stage: PerspectiveProjector,
}

impl Default for ProjectionChain {
    fn default() -> Self {
        Self::new(DEFAULT_EYE_OFFSET, DEFAULT_EYE_OFFSET)
    }
}

impl ProjectionChain {
    /// Create a chain with the given eye offsets for the 4D and 5D stages
    pub fn new(eye_offset_4d: f64, eye_offset_5d: f64) -> Self {
        Self {
            w_stage: PerspectiveProjector::new(eye_offset_4d),
            v_stage: PerspectiveProjector::new(eye_offset_5d),
        }
    }

    /// Apply one degeneracy policy to both stages
    pub fn with_degeneracy(mut self, degeneracy: Degeneracy) -> Self {
        self.w_stage.degeneracy = degeneracy;
        self.v_stage.degeneracy = degeneracy;
        self
    }

    /// Project a single vertex to 3D
    pub fn project_vertex(&self, vertex: &Vertex, index: usize) -> Result<Vec3, GeometryError> {
        let mut current = *vertex;
        while current.dimension() > 3 {
            let stage = if current.dimension() == 5 { &self.v_stage } else { &self.w_stage };
            current = stage.project_vertex(&current, index)?;
        }
        Ok(current.embed_3d())
    }

    /// Project every vertex to 3D
    ///
    /// All vertices of a shape are projected before any result is returned;
    /// a failure anywhere yields no partial output.
    pub fn project_to_3d(&self, vertices: &[Vertex]) -> Result<Vec<Vec3>, GeometryError> {
        vertices
            .iter()
            .enumerate()
            .map(|(i, v)| self.project_vertex(v, i))
            .collect()
    }
}
