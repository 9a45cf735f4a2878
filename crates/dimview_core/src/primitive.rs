//! Drawable primitives
//!
//! Primitives are what a shape hands to the scene: points, line segments and
//! triangle meshes, each with a material and a visibility flag.

use bitflags::bitflags;
use dimview_math::Vec3;
use crate::Material;

bitflags! {
    /// Flags indicating which parts of a primitive changed since the renderer last looked
    ///
    /// Used for dirty tracking so a renderer only re-uploads what moved.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Positions changed
        const GEOMETRY = 1 << 0;
        /// Material changed
        const MATERIAL = 1 << 1;
        /// Visibility toggled
        const VISIBILITY = 1 << 2;
        /// All flags set - primitive needs full rebuild
        const ALL = Self::GEOMETRY.bits() | Self::MATERIAL.bits() | Self::VISIBILITY.bits();
    }
}

/// The positional part of a primitive
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A spherical marker
    Point {
        /// Center of the marker
        position: Vec3,
        /// Marker radius
        radius: f64,
    },
    /// A straight line between two points
    Segment {
        /// First endpoint
        start: Vec3,
        /// Second endpoint
        end: Vec3,
    },
    /// A list of triangles
    Mesh {
        /// Triangle corners
        triangles: Vec<[Vec3; 3]>,
    },
}

impl Geometry {
    /// Short name of the primitive kind, for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "point",
            Geometry::Segment { .. } => "segment",
            Geometry::Mesh { .. } => "mesh",
        }
    }

    /// Whether every coordinate is finite
    pub fn is_finite(&self) -> bool {
        match self {
            Geometry::Point { position, radius } => position.is_finite() && radius.is_finite(),
            Geometry::Segment { start, end } => start.is_finite() && end.is_finite(),
            Geometry::Mesh { triangles } => triangles.iter().flatten().all(|p| p.is_finite()),
        }
    }
}

/// A drawable primitive: geometry, material and visibility
#[derive(Clone, Debug)]
pub struct Primitive {
    geometry: Geometry,
    material: Material,
    visible: bool,
    dirty: DirtyFlags,
}

impl Primitive {
    /// Create a visible primitive
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            visible: true,
            dirty: DirtyFlags::ALL, // New primitives are dirty
        }
    }

    /// A point marker
    pub fn point(position: Vec3, radius: f64, material: Material) -> Self {
        Self::new(Geometry::Point { position, radius }, material)
    }

    /// A line segment
    pub fn segment(start: Vec3, end: Vec3, material: Material) -> Self {
        Self::new(Geometry::Segment { start, end }, material)
    }

    /// A triangle mesh
    pub fn mesh(triangles: Vec<[Vec3; 3]>, material: Material) -> Self {
        Self::new(Geometry::Mesh { triangles }, material)
    }

    /// Start hidden instead of visible
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Get the geometry
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Get the material
    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Whether the renderer should draw this primitive
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the geometry and mark it as dirty
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        self.mark_dirty(DirtyFlags::GEOMETRY);
    }

    /// Replace the material and mark it as dirty
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.mark_dirty(DirtyFlags::MATERIAL);
    }

    /// Show or hide, marking visibility dirty only on change
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.mark_dirty(DirtyFlags::VISIBILITY);
        }
    }

    // --- Dirty tracking methods ---

    /// Check if this primitive has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this primitive as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }
}
