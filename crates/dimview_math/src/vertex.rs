//! Fixed-capacity N-dimensional vertex

use std::ops::{Index, IndexMut};
use serde::{Serialize, Deserialize};
use crate::{GeometryError, Vec3};

/// Highest supported dimension
pub const MAX_DIMENSION: usize = 5;

/// A vertex with `dimension` real coordinates (0 to 5)
///
/// Coordinates are stored inline so vertices stay `Copy` and rotating or
/// projecting a whole shape never allocates per vertex. Slots past
/// `dimension` are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VertexData")]
pub struct Vertex {
    coords: [f64; MAX_DIMENSION],
    dimension: usize,
}

/// Unchecked serialized form of [`Vertex`]
#[derive(Deserialize)]
struct VertexData {
    coords: [f64; MAX_DIMENSION],
    dimension: usize,
}

impl TryFrom<VertexData> for Vertex {
    type Error = GeometryError;

    fn try_from(data: VertexData) -> Result<Self, Self::Error> {
        let coords = data
            .coords
            .get(..data.dimension)
            .ok_or(GeometryError::InvalidDimension { dimension: data.dimension })?;
        Self::from_slice(coords)
    }
}

impl Vertex {
    /// The origin of an n-dimensional space
    pub fn origin(dimension: usize) -> Result<Self, GeometryError> {
        if dimension > MAX_DIMENSION {
            return Err(GeometryError::InvalidDimension { dimension });
        }
        Ok(Self { coords: [0.0; MAX_DIMENSION], dimension })
    }

    /// Create a vertex from a coordinate slice
    pub fn from_slice(coords: &[f64]) -> Result<Self, GeometryError> {
        let mut vertex = Self::origin(coords.len())?;
        vertex.coords[..coords.len()].copy_from_slice(coords);
        Ok(vertex)
    }

    /// Number of coordinates
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The coordinates as a slice of length `dimension`
    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords[..self.dimension]
    }

    /// Coordinate `axis`, or `None` past the vertex dimension
    #[inline]
    pub fn get(&self, axis: usize) -> Option<f64> {
        self.coords().get(axis).copied()
    }

    /// The last coordinate (the one a projection drops)
    #[inline]
    pub fn last(&self) -> Option<f64> {
        self.coords().last().copied()
    }

    /// Squared Euclidean norm
    pub fn norm_squared(&self) -> f64 {
        self.coords().iter().map(|c| c * c).sum()
    }

    /// Whether every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.coords().iter().all(|c| c.is_finite())
    }

    /// Drop the last coordinate and scale the rest by `factor`
    ///
    /// Returns `None` for a 0-dimensional vertex.
    pub(crate) fn drop_last_scaled(&self, factor: f64) -> Option<Self> {
        let dimension = self.dimension.checked_sub(1)?;
        let mut coords = [0.0; MAX_DIMENSION];
        for (out, c) in coords.iter_mut().zip(&self.coords[..dimension]) {
            *out = c * factor;
        }
        Some(Self { coords, dimension })
    }

    /// Embed into 3D space
    ///
    /// Vertices with fewer than three coordinates are padded with zeros, so a
    /// 0-dimensional vertex lands on the origin. Coordinates past the third
    /// are ignored; project higher-dimensional vertices first.
    #[inline]
    pub fn embed_3d(&self) -> Vec3 {
        Vec3::new(self.coords[0], self.coords[1], self.coords[2])
    }
}

impl Index<usize> for Vertex {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.coords()[axis]
    }
}

impl IndexMut<usize> for Vertex {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        let dimension = self.dimension;
        &mut self.coords[..dimension][axis]
    }
}

macro_rules! impl_from_array {
    ($($n:literal),*) => {
        $(
            impl From<[f64; $n]> for Vertex {
                fn from(coords: [f64; $n]) -> Self {
                    let mut padded = [0.0; MAX_DIMENSION];
                    padded[..$n].copy_from_slice(&coords);
                    Self { coords: padded, dimension: $n }
                }
            }
        )*
    };
}

impl_from_array!(0, 1, 2, 3, 4, 5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let v = Vertex::origin(4).unwrap();
        assert_eq!(v.dimension(), 4);
        assert_eq!(v.coords(), &[0.0; 4]);
    }

    #[test]
    fn test_origin_rejects_high_dimension() {
        assert_eq!(
            Vertex::origin(6),
            Err(GeometryError::InvalidDimension { dimension: 6 })
        );
    }

    #[test]
    fn test_from_slice() {
        let v = Vertex::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v.dimension(), 3);
        assert_eq!(v[2], 3.0);
        assert!(Vertex::from_slice(&[0.0; 6]).is_err());
    }

    #[test]
    fn test_deserialize_checks_dimension() {
        let v: Vertex = toml::from_str("coords = [1.0, 2.0, 9.0, 9.0, 9.0]\ndimension = 2").unwrap();
        assert_eq!(v, Vertex::from([1.0, 2.0]));
        assert_eq!(v.embed_3d(), Vec3::new(1.0, 2.0, 0.0));

        let err = toml::from_str::<Vertex>("coords = [0.0, 0.0, 0.0, 0.0, 0.0]\ndimension = 7")
            .unwrap_err();
        assert!(err.to_string().contains("Invalid dimension 7"));
    }

    #[test]
    fn test_from_array() {
        let v = Vertex::from([0.5, -0.5, 0.5, -0.5, 0.5]);
        assert_eq!(v.dimension(), 5);
        assert_eq!(v.last(), Some(0.5));
        assert_eq!(v.get(5), None);
    }

    #[test]
    fn test_index_mut() {
        let mut v = Vertex::from([1.0, 2.0]);
        v[1] = 5.0;
        assert_eq!(v.coords(), &[1.0, 5.0]);
    }

    #[test]
    #[should_panic]
    fn test_index_past_dimension_panics() {
        let v = Vertex::from([1.0, 2.0]);
        let _ = v[2];
    }

    #[test]
    fn test_norm_squared() {
        let v = Vertex::from([3.0, 4.0]);
        assert_eq!(v.norm_squared(), 25.0);
    }

    #[test]
    fn test_embed_3d_pads_with_zeros() {
        assert_eq!(Vertex::from([0.0f64; 0]).embed_3d(), Vec3::ZERO);
        assert_eq!(Vertex::from([1.5]).embed_3d(), Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(Vertex::from([1.0, 2.0]).embed_3d(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_drop_last_scaled() {
        let v = Vertex::from([1.0, 2.0, 3.0, 4.0]);
        let dropped = v.drop_last_scaled(0.5).unwrap();
        assert_eq!(dropped.coords(), &[0.5, 1.0, 1.5]);
        assert!(Vertex::from([0.0f64; 0]).drop_last_scaled(1.0).is_none());
    }
}
