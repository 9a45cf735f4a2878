//! Per-dimension shape policy table
//!
//! One [`ShapeDescriptor`] per dimension replaces a family of near-identical
//! shape types: everything that differs between a point and a penteract
//! (default size, marker radius, coloring, scale, text) lives here.

use dimview_math::{GeometryError, RotationPlane};
use crate::ColorPolicy;

/// The six shapes, indexed by dimension
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// 0D
    Point,
    /// 1D
    Line,
    /// 2D
    Square,
    /// 3D
    Cube,
    /// 4D hypercube
    Tesseract,
    /// 5D hypercube
    Penteract,
}

impl ShapeKind {
    /// All kinds in dimension order
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Point,
        ShapeKind::Line,
        ShapeKind::Square,
        ShapeKind::Cube,
        ShapeKind::Tesseract,
        ShapeKind::Penteract,
    ];

    /// Look up the kind for a dimension, failing outside `0..=5`
    pub fn from_dimension(dimension: usize) -> Result<Self, GeometryError> {
        Self::ALL
            .get(dimension)
            .copied()
            .ok_or(GeometryError::InvalidDimension { dimension })
    }

    /// Dimension of this shape
    #[inline]
    pub fn dimension(self) -> usize {
        self as usize
    }

    /// Static metadata for this shape
    #[inline]
    pub fn descriptor(self) -> &'static ShapeDescriptor {
        &DESCRIPTORS[self as usize]
    }
}

/// Immutable per-dimension metadata
#[derive(Debug)]
pub struct ShapeDescriptor {
    /// Which shape this describes
    pub kind: ShapeKind,
    /// Display title, e.g. "Cube (3D)"
    pub title: &'static str,
    /// Side length when the caller has no preference
    pub default_size: f64,
    /// Radius of the vertex markers
    ///
    /// The point shape has no edges; its single marker uses the shape size instead.
    pub point_radius: f64,
    /// Uniform scale applied to the projected geometry
    pub display_scale: f64,
    /// Coloring rule
    pub coloring: ColorPolicy,
    /// Whether square faces are drawn as translucent meshes
    pub draws_faces: bool,
    /// Multiplier from the shared animation phase to this shape's hyper-rotation angle
    pub animation_rate_scale: f64,
    /// Multiplier from the shared rotation phase to this shape's view angle
    pub view_rate_scale: f64,
    /// Human-readable explanation
    pub description: &'static str,
}

impl ShapeDescriptor {
    /// Dimension of the described shape
    #[inline]
    pub fn dimension(&self) -> usize {
        self.kind.dimension()
    }

    /// Radius of the vertex markers for a shape of the given size
    ///
    /// Markers grow with the display scale along with the positions.
    pub fn marker_radius(&self, size: f64) -> f64 {
        match self.kind {
            ShapeKind::Point => size,
            _ => self.point_radius * self.display_scale,
        }
    }

    /// The plane animated by the hyper rotation, if any
    ///
    /// Only 4D and 5D shapes rotate outside the view rotation.
    pub fn hyper_plane(&self) -> Option<RotationPlane> {
        if self.dimension() >= 4 {
            RotationPlane::primary(self.dimension())
        } else {
            None
        }
    }
}

static DESCRIPTORS: [ShapeDescriptor; 6] = [
    ShapeDescriptor {
        kind: ShapeKind::Point,
        title: "Point (0D)",
        default_size: 0.3,
        point_radius: 0.3,
        display_scale: 1.0,
        coloring: ColorPolicy::Uniform,
        draws_faces: false,
        animation_rate_scale: 0.0,
        view_rate_scale: 0.0,
        description: "A point has no extent: no length, no width, no depth. \
            It is the most fundamental concept in geometry.",
    },
    ShapeDescriptor {
        kind: ShapeKind::Line,
        title: "Line (1D)",
        default_size: 2.0,
        point_radius: 0.08,
        display_scale: 1.0,
        coloring: ColorPolicy::Uniform,
        draws_faces: false,
        animation_rate_scale: 0.0,
        view_rate_scale: 0.5,
        description: "A line (1D) is built from two connected points. \
            It has length, but no width or depth.",
    },
    ShapeDescriptor {
        kind: ShapeKind::Square,
        title: "Square (2D)",
        default_size: 1.5,
        point_radius: 0.06,
        display_scale: 1.0,
        coloring: ColorPolicy::Uniform,
        draws_faces: true,
        animation_rate_scale: 0.0,
        view_rate_scale: 0.5,
        description: "A square (2D) is built from two segments joined at right angles. \
            It has length and width, but no depth.",
    },
    ShapeDescriptor {
        kind: ShapeKind::Cube,
        title: "Cube (3D)",
        default_size: 1.3,
        point_radius: 0.05,
        display_scale: 1.0,
        coloring: ColorPolicy::Uniform,
        draws_faces: true,
        animation_rate_scale: 0.0,
        view_rate_scale: 0.5,
        description: "A cube (3D) is built from two squares joined along a direction \
            perpendicular to both (depth). It has length, width and depth.",
    },
    ShapeDescriptor {
        kind: ShapeKind::Tesseract,
        title: "Tesseract (4D)",
        default_size: 1.0,
        point_radius: 0.04,
        display_scale: 1.5,
        coloring: ColorPolicy::FourthAxisSplit,
        draws_faces: false,
        animation_rate_scale: 0.5,
        view_rate_scale: 0.2,
        description: "The tesseract (4D) is a hypercube in four dimensions. Its 3D projection \
            is mathematically exact but visually puzzling, because our brains are not built \
            to read higher dimensions. The 16 vertices and 32 edges look like two nested cubes \
            joined by extra edges, but that picture is a simplification. The distortion you \
            see while it rotates is like the warped shadow a spinning cube casts on a flat \
            sheet: we only ever see a partial \"shadow\" of the real 4D object.",
    },
    ShapeDescriptor {
        kind: ShapeKind::Penteract,
        title: "Penteract (5D)",
        default_size: 0.8,
        point_radius: 0.03,
        display_scale: 2.0,
        coloring: ColorPolicy::HigherAxesGradient,
        draws_faces: false,
        animation_rate_scale: 0.2,
        view_rate_scale: 0.1,
        description: "The penteract (5D) is built from two tesseracts joined along a fifth \
            dimension perpendicular to the first four. It has 32 vertices, 80 edges, 80 square \
            faces, 40 cubic cells and 10 tesseract cells. The view is especially abstract \
            because it is a double projection (5D to 4D to 3D) that compresses a great deal \
            of structure. The shades of gray encode position along the fourth and fifth \
            dimensions, giving an illusion of depth.",
    },
];
