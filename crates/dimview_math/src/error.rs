//! Geometry error types

use std::fmt;

/// Error type for combinatorics, rotation and projection
///
/// All variants are contract violations by the caller. None of them are
/// transient, so there is nothing to retry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Requested dimension is outside `0..=5`
    InvalidDimension {
        /// The rejected dimension
        dimension: usize,
    },
    /// Rotation plane references a duplicate or out-of-range axis
    InvalidAxis {
        /// First axis of the plane
        dim1: usize,
        /// Second axis of the plane
        dim2: usize,
        /// Dimensionality the axes were checked against
        dimension: usize,
    },
    /// Perspective denominator collapsed to (near) zero or is not finite
    DegenerateProjection {
        /// Index of the offending vertex in its input slice
        index: usize,
        /// The denominator `eye_offset - last_coordinate`
        denominator: f64,
    },
    /// A computed coordinate came out as NaN or infinite
    NonFinite {
        /// Index of the offending vertex
        index: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidDimension { dimension } => {
                write!(f, "Invalid dimension {} (expected 0 to 5)", dimension)
            }
            GeometryError::InvalidAxis { dim1, dim2, dimension } => write!(
                f,
                "Invalid rotation plane ({}, {}) for {}-dimensional vertices",
                dim1, dim2, dimension
            ),
            GeometryError::DegenerateProjection { index, denominator } => write!(
                f,
                "Degenerate projection at vertex {}: denominator {}",
                index, denominator
            ),
            GeometryError::NonFinite { index } => {
                write!(f, "Non-finite coordinate at vertex {}", index)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_display() {
        let err = GeometryError::InvalidDimension { dimension: 7 };
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid dimension 7"));
    }

    #[test]
    fn test_invalid_axis_display() {
        let err = GeometryError::InvalidAxis { dim1: 2, dim2: 2, dimension: 4 };
        let msg = format!("{}", err);
        assert!(msg.contains("(2, 2)"));
        assert!(msg.contains("4-dimensional"));
    }

    #[test]
    fn test_degenerate_projection_display() {
        let err = GeometryError::DegenerateProjection { index: 3, denominator: 0.0 };
        let msg = format!("{}", err);
        assert!(msg.contains("vertex 3"));
    }

    #[test]
    fn test_non_finite_display() {
        let msg = GeometryError::NonFinite { index: 5 }.to_string();
        assert!(msg.contains("Non-finite"));
        assert!(msg.contains("vertex 5"));
    }
}
