//! Rotations in coordinate planes
//!
//! In n dimensions, rotations happen in planes rather than around axes.
//! There are n(n-1)/2 coordinate planes: 3 in 3D (XY, XZ, YZ), 6 in 4D and
//! 10 in 5D. A plane rotation mixes two coordinates and leaves the rest alone.

use crate::{GeometryError, Vec3, Vertex, MAX_DIMENSION};

const AXIS_NAMES: [char; MAX_DIMENSION] = ['x', 'y', 'z', 'w', 'v'];

fn check_axes(dim1: usize, dim2: usize, dimension: usize) -> Result<(), GeometryError> {
    if dim1 == dim2 || dim1 >= dimension || dim2 >= dimension {
        Err(GeometryError::InvalidAxis { dim1, dim2, dimension })
    } else {
        Ok(())
    }
}

/// Rotate every vertex within the `(dim1, dim2)` plane by `angle` radians
///
/// Coordinates `(c1, c2)` become `(c1·cosθ − c2·sinθ, c1·sinθ + c2·cosθ)`.
/// Swapping `dim1` and `dim2` reverses the direction of rotation.
///
/// Fails with [`GeometryError::InvalidAxis`] if the axes coincide or either
/// one is out of range for some vertex.
pub fn rotate(
    vertices: &[Vertex],
    dim1: usize,
    dim2: usize,
    angle: f64,
) -> Result<Vec<Vertex>, GeometryError> {
    let mut rotated = vertices.to_vec();
    rotate_in_place(&mut rotated, dim1, dim2, angle)?;
    Ok(rotated)
}

/// In-place variant of [`rotate`]
///
/// Axes are validated against every vertex before any is modified, so on
/// error the slice is left untouched.
pub fn rotate_in_place(
    vertices: &mut [Vertex],
    dim1: usize,
    dim2: usize,
    angle: f64,
) -> Result<(), GeometryError> {
    // A coincident plane is invalid even for an empty slice
    let dimension = vertices.first().map_or(MAX_DIMENSION, Vertex::dimension);
    if dim1 == dim2 {
        return Err(GeometryError::InvalidAxis { dim1, dim2, dimension });
    }
    for v in vertices.iter() {
        check_axes(dim1, dim2, v.dimension())?;
    }

    let (sin, cos) = angle.sin_cos();
    for v in vertices.iter_mut() {
        let c1 = v[dim1];
        let c2 = v[dim2];
        v[dim1] = c1 * cos - c2 * sin;
        v[dim2] = c1 * sin + c2 * cos;
    }

    Ok(())
}

/// Rotate a projected point about the vertical (y) axis
///
/// Matches a right-handed scene graph's `rotation.y`:
/// `x' = x·cosθ + z·sinθ`, `z' = −x·sinθ + z·cosθ`.
#[inline]
pub fn rotate_about_vertical(p: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos)
}

/// A coordinate plane `(dim1, dim2)` with `dim1 < dim2`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RotationPlane {
    dim1: usize,
    dim2: usize,
}

impl RotationPlane {
    /// Create a plane in an n-dimensional space
    ///
    /// Requires `dim1 < dim2 < dimension`.
    pub fn new(dim1: usize, dim2: usize, dimension: usize) -> Result<Self, GeometryError> {
        if dim1 >= dim2 || dimension > MAX_DIMENSION {
            return Err(GeometryError::InvalidAxis { dim1, dim2, dimension });
        }
        check_axes(dim1, dim2, dimension)?;
        Ok(Self { dim1, dim2 })
    }

    /// The plane pairing axis 0 with the last axis
    ///
    /// This is the plane animated for 4D (XW) and 5D (XV) shapes. `None`
    /// below two dimensions.
    pub fn primary(dimension: usize) -> Option<Self> {
        if (2..=MAX_DIMENSION).contains(&dimension) {
            Some(Self { dim1: 0, dim2: dimension - 1 })
        } else {
            None
        }
    }

    /// All planes of an n-dimensional space in lexicographic order
    pub fn all(dimension: usize) -> impl Iterator<Item = Self> {
        let dimension = dimension.min(MAX_DIMENSION);
        (0..dimension).flat_map(move |dim1| {
            ((dim1 + 1)..dimension).map(move |dim2| Self { dim1, dim2 })
        })
    }

    /// Number of independent planes in n dimensions
    #[inline]
    pub fn count(dimension: usize) -> usize {
        dimension * dimension.saturating_sub(1) / 2
    }

    /// The two axes `(dim1, dim2)`
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.dim1, self.dim2)
    }

    /// Conventional name such as `"xw"` or `"zv"`
    pub fn label(&self) -> String {
        [AXIS_NAMES[self.dim1], AXIS_NAMES[self.dim2]].iter().collect()
    }

    /// Position of this plane in [`RotationPlane::all`] order
    fn index(&self, dimension: usize) -> usize {
        // Planes before row dim1: sum over k < dim1 of (dimension - 1 - k)
        let before = self.dim1 * dimension - self.dim1 * (self.dim1 + 1) / 2;
        before + (self.dim2 - self.dim1 - 1)
    }
}

/// A plane together with an angle in radians
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneRotation {
    /// The plane to rotate in
    pub plane: RotationPlane,
    /// The angle in radians
    pub angle: f64,
}

impl PlaneRotation {
    /// Create a new plane rotation
    pub fn new(plane: RotationPlane, angle: f64) -> Self {
        Self { plane, angle }
    }

    /// Apply this rotation to a set of vertices
    pub fn apply(&self, vertices: &[Vertex]) -> Result<Vec<Vertex>, GeometryError> {
        rotate(vertices, self.plane.dim1, self.plane.dim2, self.angle)
    }
}

/// One angle per coordinate plane of an n-dimensional space
///
/// Applying it rotates in every plane with a non-zero angle, in lexicographic
/// plane order (XY, XZ, XW, ... for 4D). Plane rotations do not commute, so
/// the order is part of the result.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperRotation {
    dimension: usize,
    angles: Vec<f64>,
}

impl HyperRotation {
    /// Create an identity rotation for an n-dimensional space
    pub fn new(dimension: usize) -> Result<Self, GeometryError> {
        crate::validate_dimension(dimension)?;
        Ok(Self {
            dimension,
            angles: vec![0.0; RotationPlane::count(dimension)],
        })
    }

    /// Dimension of the space this rotation acts on
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn slot(&self, plane: RotationPlane) -> Result<usize, GeometryError> {
        let (dim1, dim2) = plane.dims();
        check_axes(dim1, dim2, self.dimension)?;
        Ok(plane.index(self.dimension))
    }

    /// Set the angle of one plane
    pub fn set(&mut self, plane: RotationPlane, angle: f64) -> Result<(), GeometryError> {
        let slot = self.slot(plane)?;
        self.angles[slot] = angle;
        Ok(())
    }

    /// Get the angle of one plane
    pub fn angle(&self, plane: RotationPlane) -> Result<f64, GeometryError> {
        Ok(self.angles[self.slot(plane)?])
    }

    /// Reset every plane to zero
    pub fn reset(&mut self) {
        self.angles.iter_mut().for_each(|a| *a = 0.0);
    }

    /// Planes with their angles, in application order
    pub fn planes(&self) -> impl Iterator<Item = PlaneRotation> + '_ {
        RotationPlane::all(self.dimension)
            .zip(self.angles.iter())
            .map(|(plane, &angle)| PlaneRotation::new(plane, angle))
    }

    /// Rotate vertices through every non-zero plane
    ///
    /// A zero angle is an exact identity, so skipping those planes gives the
    /// same result as applying all of them.
    pub fn apply(&self, vertices: &[Vertex]) -> Result<Vec<Vertex>, GeometryError> {
        let mut rotated = vertices.to_vec();
        for rotation in self.planes().filter(|r| r.angle != 0.0) {
            let (dim1, dim2) = rotation.plane.dims();
            rotate_in_place(&mut rotated, dim1, dim2, rotation.angle)?;
        }
        Ok(rotated)
    }
}
