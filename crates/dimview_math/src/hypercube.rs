//! Hypercube combinatorics
//!
//! An n-cube has 2^n vertices, n·2^(n-1) edges and C(n,2)·2^(n-2) square
//! faces. Vertex `i` is identified with the n-bit integer `i`: coordinate `d`
//! is `+size/2` when bit `d` is set and `-size/2` otherwise. Two vertices
//! share an edge exactly when their indices differ in one bit.

use crate::{GeometryError, Vertex, MAX_DIMENSION};

/// Check that `dimension` is in `0..=5`
#[inline]
pub fn validate_dimension(dimension: usize) -> Result<(), GeometryError> {
    if dimension > MAX_DIMENSION {
        Err(GeometryError::InvalidDimension { dimension })
    } else {
        Ok(())
    }
}

/// An edge between two vertex indices, stored with `indices[0] < indices[1]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Indices into the parent shape's vertex array
    pub indices: [usize; 2],
}

impl Edge {
    /// Create an edge, ordering the indices
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self { indices: [a.min(b), a.max(b)] }
    }

    /// The axis along which the edge runs
    ///
    /// Meaningful only for hypercube edges, whose endpoints differ in a single bit.
    #[inline]
    pub fn axis(&self) -> usize {
        (self.indices[0] ^ self.indices[1]).trailing_zeros() as usize
    }
}

/// A square 2-face as four vertex indices in cyclic order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    /// Corner indices, walking around the square
    pub indices: [usize; 4],
}

impl Face {
    /// Split the square into two triangles sharing the first corner
    pub fn triangles(&self) -> [[usize; 3]; 2] {
        let [a, b, c, d] = self.indices;
        [[a, b, c], [a, c, d]]
    }
}

/// Generate the vertices of a hypercube
///
/// Dimension 0 yields a single 0-dimensional vertex. Otherwise vertex `i`
/// has coordinate `d` equal to `+size/2` if bit `d` of `i` is set, else
/// `-size/2`, for `i` in `0..2^n`.
pub fn vertices(dimension: usize, size: f64) -> Result<Vec<Vertex>, GeometryError> {
    validate_dimension(dimension)?;
    let half = size * 0.5;
    let origin = Vertex::origin(dimension)?;

    Ok((0..1usize << dimension)
        .map(|i| {
            let mut vertex = origin;
            for d in 0..dimension {
                vertex[d] = if (i & (1 << d)) != 0 { half } else { -half };
            }
            vertex
        })
        .collect())
}

/// Generate the edges of a hypercube
///
/// Ordered by ascending first index, then ascending bit position. The order
/// only matters for reproducible draw order.
pub fn edges(dimension: usize) -> Result<Vec<Edge>, GeometryError> {
    validate_dimension(dimension)?;
    let mut edges = Vec::with_capacity(edge_count(dimension));

    for i in 0..1usize << dimension {
        for d in 0..dimension {
            let j = i ^ (1 << d);
            if i < j {
                edges.push(Edge::new(i, j));
            }
        }
    }

    Ok(edges)
}

/// Generate the square 2-faces of a hypercube
///
/// For each axis pair `a < b` and each vertex with bits `a` and `b` clear,
/// the face walks `base → +a → +a+b → +b`.
pub fn faces(dimension: usize) -> Result<Vec<Face>, GeometryError> {
    validate_dimension(dimension)?;
    let mut faces = Vec::new();

    for a in 0..dimension {
        for b in (a + 1)..dimension {
            let (bit_a, bit_b) = (1usize << a, 1usize << b);
            for base in (0..1usize << dimension).filter(|&i| (i & (bit_a | bit_b)) == 0) {
                faces.push(Face {
                    indices: [base, base | bit_a, base | bit_a | bit_b, base | bit_b],
                });
            }
        }
    }

    Ok(faces)
}

/// Number of vertices of an n-cube
#[inline]
pub fn vertex_count(dimension: usize) -> usize {
    1 << dimension
}

/// Number of edges of an n-cube
#[inline]
pub fn edge_count(dimension: usize) -> usize {
    if dimension == 0 {
        0
    } else {
        dimension << (dimension - 1)
    }
}

/// Trait for shapes made of vertices joined by edges and square faces
pub trait Polytope {
    /// Dimension of the space the vertices live in
    fn dimension(&self) -> usize;

    /// Get the vertices of this shape
    fn vertices(&self) -> &[Vertex];

    /// Get the edges of this shape
    fn edges(&self) -> &[Edge];

    /// Get the square faces of this shape
    fn faces(&self) -> &[Face];

    /// Get the number of vertices
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Get the number of edges
    #[inline]
    fn edge_count(&self) -> usize {
        self.edges().len()
    }
}

/// A hypercube centered at the origin - pure geometry without colors
///
/// Combinatorics are computed once; rotation and projection work on copies
/// of [`Hypercube::vertices`], never on the cube itself.
#[derive(Clone, Debug)]
pub struct Hypercube {
    dimension: usize,
    size: f64,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl Hypercube {
    /// Create a new hypercube with the given dimension and side length
    pub fn new(dimension: usize, size: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            dimension,
            size,
            vertices: vertices(dimension, size)?,
            edges: edges(dimension)?,
            faces: faces(dimension)?,
        })
    }

    /// Get the full size (side length)
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Get the half-size (half the side length)
    #[inline]
    pub fn half_size(&self) -> f64 {
        self.size * 0.5
    }
}

impl Polytope for Hypercube {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn faces(&self) -> &[Face] {
        &self.faces
    }
}
