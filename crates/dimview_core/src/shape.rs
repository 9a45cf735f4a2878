//! The dimensional shape orchestrator
//!
//! A [`DimensionalShape`] owns the combinatorics of one hypercube and the keys
//! of the primitives it registered in a [`Scene`]. Each update rotates a copy
//! of the original vertices, projects them to 3D and pushes the new positions
//! into the existing primitives.
//!
//! Lifecycle: `Created -> Active <-> Hidden -> Disposed`.

use std::fmt;

use dimview_math::{
    rotate_about_vertical, GeometryError, HyperRotation, Hypercube, Polytope, ProjectionChain,
    Vec3, Vertex,
};

use crate::{Geometry, Material, Primitive, PrimitiveKey, Scene, ShapeDescriptor, ShapeKind};

/// Where a shape is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeState {
    /// Geometry computed, nothing registered in a scene yet
    Created,
    /// Primitives registered and visible
    Active,
    /// Primitives registered but hidden
    Hidden,
    /// Primitives removed; the shape is inert
    Disposed,
}

impl fmt::Display for ShapeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeState::Created => "created",
            ShapeState::Active => "active",
            ShapeState::Hidden => "hidden",
            ShapeState::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

/// Error from a shape operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeError {
    /// Geometry failed (bad dimension, degenerate projection)
    Geometry(GeometryError),
    /// The operation is not allowed in the current state
    InvalidTransition {
        /// State the shape was in
        from: ShapeState,
        /// Operation that was attempted
        operation: &'static str,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Geometry(e) => write!(f, "Geometry error: {}", e),
            ShapeError::InvalidTransition { from, operation } => {
                write!(f, "Cannot {} a {} shape", operation, from)
            }
        }
    }
}

impl std::error::Error for ShapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShapeError::Geometry(e) => Some(e),
            ShapeError::InvalidTransition { .. } => None,
        }
    }
}

impl From<GeometryError> for ShapeError {
    fn from(e: GeometryError) -> Self {
        ShapeError::Geometry(e)
    }
}

/// One frame of projected geometry, ready to hand to a renderer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedFrame {
    /// Projected vertex positions, indexed like the hypercube vertices
    pub points: Vec<Vec3>,
    /// Edge endpoints, indexed like the hypercube edges
    pub edges: Vec<[Vec3; 2]>,
    /// Face triangles (two per square face), empty unless the shape draws faces
    pub triangles: Vec<[Vec3; 3]>,
    /// Marker radius shared by all points
    pub point_radius: f64,
    /// Material per point
    pub point_materials: Vec<Material>,
    /// Material per edge
    pub edge_materials: Vec<Material>,
    /// Material for the face mesh
    pub face_material: Material,
}

/// A hypercube of dimension 0 through 5 drawn into a scene
#[derive(Debug)]
pub struct DimensionalShape {
    descriptor: &'static ShapeDescriptor,
    cube: Hypercube,
    /// Base orientation; the animated plane is overridden every frame
    rotation: HyperRotation,
    projection: ProjectionChain,
    point_materials: Vec<Material>,
    edge_materials: Vec<Material>,
    point_keys: Vec<PrimitiveKey>,
    edge_keys: Vec<PrimitiveKey>,
    face_key: Option<PrimitiveKey>,
    state: ShapeState,
}

impl DimensionalShape {
    /// Build the geometry for a shape without touching any scene
    pub fn new(kind: ShapeKind, size: f64) -> Result<Self, ShapeError> {
        let descriptor = kind.descriptor();
        let cube = Hypercube::new(kind.dimension(), size)?;
        let rotation = HyperRotation::new(kind.dimension())?;

        let coloring = descriptor.coloring;
        let vertices = cube.vertices();
        let point_materials = vertices.iter().map(|v| coloring.vertex_material(v)).collect();
        let edge_materials = cube
            .edges()
            .iter()
            .map(|e| coloring.edge_material(&vertices[e.indices[0]], &vertices[e.indices[1]]))
            .collect();

        Ok(Self {
            descriptor,
            cube,
            rotation,
            projection: ProjectionChain::default(),
            point_materials,
            edge_materials,
            point_keys: Vec::new(),
            edge_keys: Vec::new(),
            face_key: None,
            state: ShapeState::Created,
        })
    }

    /// Build a shape with the descriptor's default size
    pub fn with_default_size(kind: ShapeKind) -> Result<Self, ShapeError> {
        Self::new(kind, kind.descriptor().default_size)
    }

    /// Use a different projection chain (eye offsets, degeneracy policy)
    pub fn with_projection(mut self, projection: ProjectionChain) -> Self {
        self.projection = projection;
        self
    }

    /// Build a shape for `dimension` and register it in `scene`
    ///
    /// Fails with [`GeometryError::InvalidDimension`] outside `0..=5`.
    pub fn create<S: Scene + ?Sized>(
        scene: &mut S,
        dimension: usize,
        size: f64,
        visible: bool,
    ) -> Result<Self, ShapeError> {
        let kind = ShapeKind::from_dimension(dimension)?;
        let mut shape = Self::new(kind, size)?;
        shape.attach(scene, visible)?;
        Ok(shape)
    }

    /// Register this shape's primitives in `scene` at the rest pose
    ///
    /// Only valid from [`ShapeState::Created`]. Ends `Active` when `visible`,
    /// otherwise `Hidden`.
    pub fn attach<S: Scene + ?Sized>(&mut self, scene: &mut S, visible: bool) -> Result<(), ShapeError> {
        if self.state != ShapeState::Created {
            return Err(self.invalid("attach"));
        }

        let frame = self.frame(0.0, 0.0)?;
        let tag = |p: Primitive| if visible { p } else { p.hidden() };

        self.point_keys = frame
            .points
            .iter()
            .zip(&frame.point_materials)
            .map(|(&position, &material)| {
                scene.add(tag(Primitive::point(position, frame.point_radius, material)))
            })
            .collect();

        self.edge_keys = frame
            .edges
            .iter()
            .zip(&frame.edge_materials)
            .map(|(&[start, end], &material)| scene.add(tag(Primitive::segment(start, end, material))))
            .collect();

        if self.descriptor.draws_faces && !frame.triangles.is_empty() {
            let mesh = Primitive::mesh(frame.triangles, frame.face_material);
            self.face_key = Some(scene.add(tag(mesh)));
        }

        let next = if visible { ShapeState::Active } else { ShapeState::Hidden };
        self.transition(next);
        Ok(())
    }

    /// Compute projected geometry for the given phases
    ///
    /// For 4D and 5D shapes `animation_phase` drives the primary plane
    /// `(0, n-1)`; every shape is then turned about the vertical axis by
    /// `rotation_phase` and scaled by its display scale. Pure: the scene and
    /// the shape are left untouched.
    ///
    /// A non-finite phase yields [`GeometryError::NonFinite`] rather than NaN
    /// positions.
    pub fn frame(&self, animation_phase: f64, rotation_phase: f64) -> Result<ProjectedFrame, GeometryError> {
        let rotated = match self.descriptor.hyper_plane() {
            Some(plane) => {
                let mut rotation = self.rotation.clone();
                rotation.set(plane, animation_phase)?;
                rotation.apply(self.cube.vertices())?
            }
            None => self.cube.vertices().to_vec(),
        };

        let scale = self.descriptor.display_scale;
        let points: Vec<Vec3> = self
            .projection
            .project_to_3d(&rotated)?
            .into_iter()
            .map(|p| rotate_about_vertical(p, rotation_phase) * scale)
            .collect();
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite { index });
        }

        let edges = self
            .cube
            .edges()
            .iter()
            .map(|e| [points[e.indices[0]], points[e.indices[1]]])
            .collect();

        let triangles = if self.descriptor.draws_faces {
            self.cube
                .faces()
                .iter()
                .flat_map(|f| f.triangles())
                .map(|[a, b, c]| [points[a], points[b], points[c]])
                .collect()
        } else {
            Vec::new()
        };

        Ok(ProjectedFrame {
            points,
            edges,
            triangles,
            point_radius: self.descriptor.marker_radius(self.cube.size()),
            point_materials: self.point_materials.clone(),
            edge_materials: self.edge_materials.clone(),
            face_material: self.descriptor.coloring.face_material(),
        })
    }

    /// Rotate, project and move the registered primitives
    ///
    /// A no-op returning `Ok(())` unless the shape is `Active`; in particular
    /// updating a disposed shape never re-adds primitives. The whole frame is
    /// computed before any primitive moves, so a projection failure leaves
    /// the previous geometry in place.
    pub fn update<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        animation_phase: f64,
        rotation_phase: f64,
    ) -> Result<(), ShapeError> {
        if self.state != ShapeState::Active {
            log::trace!("{}: update skipped while {}", self.title(), self.state);
            return Ok(());
        }

        let frame = self.frame(animation_phase, rotation_phase)?;
        let radius = frame.point_radius;

        for (&key, &position) in self.point_keys.iter().zip(&frame.points) {
            if let Some(primitive) = scene.get_mut(key) {
                primitive.set_geometry(Geometry::Point { position, radius });
            }
        }
        for (&key, &[start, end]) in self.edge_keys.iter().zip(&frame.edges) {
            if let Some(primitive) = scene.get_mut(key) {
                primitive.set_geometry(Geometry::Segment { start, end });
            }
        }
        if let Some(primitive) = self.face_key.and_then(|key| scene.get_mut(key)) {
            primitive.set_geometry(Geometry::Mesh { triangles: frame.triangles });
        }
        Ok(())
    }

    /// Make the primitives visible
    pub fn show<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<(), ShapeError> {
        match self.state {
            ShapeState::Active => Ok(()),
            ShapeState::Hidden => {
                self.set_primitives_visible(scene, true);
                self.transition(ShapeState::Active);
                Ok(())
            }
            _ => Err(self.invalid("show")),
        }
    }

    /// Hide the primitives without removing them
    pub fn hide<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<(), ShapeError> {
        match self.state {
            ShapeState::Hidden => Ok(()),
            ShapeState::Active => {
                self.set_primitives_visible(scene, false);
                self.transition(ShapeState::Hidden);
                Ok(())
            }
            _ => Err(self.invalid("hide")),
        }
    }

    /// Remove every primitive from the scene
    ///
    /// Idempotent. After disposal the shape ignores updates.
    pub fn dispose<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if self.state == ShapeState::Disposed {
            return;
        }
        for key in self.keys().collect::<Vec<_>>() {
            scene.remove(key);
        }
        self.point_keys.clear();
        self.edge_keys.clear();
        self.face_key = None;
        self.transition(ShapeState::Disposed);
    }

    fn set_primitives_visible<S: Scene + ?Sized>(&self, scene: &mut S, visible: bool) {
        for key in self.keys() {
            if !scene.set_visible(key, visible) {
                log::warn!("{}: primitive {:?} is no longer in the scene", self.title(), key);
            }
        }
    }

    fn keys(&self) -> impl Iterator<Item = PrimitiveKey> + '_ {
        self.point_keys
            .iter()
            .chain(self.edge_keys.iter())
            .copied()
            .chain(self.face_key)
    }

    fn transition(&mut self, next: ShapeState) {
        log::debug!("{}: {} -> {}", self.title(), self.state, next);
        self.state = next;
    }

    fn invalid(&self, operation: &'static str) -> ShapeError {
        ShapeError::InvalidTransition { from: self.state, operation }
    }

    /// Current lifecycle state
    #[inline]
    pub fn state(&self) -> ShapeState {
        self.state
    }

    /// Whether the shape is registered and visible
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state == ShapeState::Active
    }

    /// Which shape this is
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.descriptor.kind
    }

    /// Static metadata for this shape
    #[inline]
    pub fn descriptor(&self) -> &'static ShapeDescriptor {
        self.descriptor
    }

    /// Dimension of the hypercube
    #[inline]
    pub fn dimension(&self) -> usize {
        self.cube.dimension()
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> f64 {
        self.cube.size()
    }

    /// Display title
    #[inline]
    pub fn title(&self) -> &'static str {
        self.descriptor.title
    }

    /// Human-readable explanation of the shape
    #[inline]
    pub fn description(&self) -> &'static str {
        self.descriptor.description
    }

    /// The underlying hypercube
    #[inline]
    pub fn polytope(&self) -> &Hypercube {
        &self.cube
    }

    /// Original (unrotated) vertices
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        self.cube.vertices()
    }

    /// Base orientation applied before the animated plane
    #[inline]
    pub fn rotation(&self) -> &HyperRotation {
        &self.rotation
    }

    /// Mutable base orientation
    #[inline]
    pub fn rotation_mut(&mut self) -> &mut HyperRotation {
        &mut self.rotation
    }

    /// The projection chain in use
    #[inline]
    pub fn projection(&self) -> &ProjectionChain {
        &self.projection
    }

    /// Number of primitives currently registered in the scene
    pub fn primitive_count(&self) -> usize {
        self.keys().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneGraph;
    use dimview_math::{Degeneracy, RotationPlane};
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert!(a.approx_eq(b, EPSILON), "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_create_registers_primitives() {
        let mut scene = SceneGraph::new();
        let expected = [(1, 0, 0), (2, 1, 0), (4, 4, 1), (8, 12, 1), (16, 32, 0), (32, 80, 0)];
        for (dimension, &(points, edges, faces)) in expected.iter().enumerate() {
            let shape = DimensionalShape::create(&mut scene, dimension, 1.0, true).unwrap();
            assert_eq!(shape.primitive_count(), points + edges + faces, "dimension {}", dimension);
            assert_eq!(shape.state(), ShapeState::Active);
        }
    }

    #[test]
    fn test_create_rejects_dimension_six() {
        let mut scene = SceneGraph::new();
        let err = DimensionalShape::create(&mut scene, 6, 1.0, true).unwrap_err();
        assert_eq!(err, ShapeError::Geometry(GeometryError::InvalidDimension { dimension: 6 }));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_create_hidden() {
        let mut scene = SceneGraph::new();
        let shape = DimensionalShape::create(&mut scene, 3, 1.3, false).unwrap();
        assert_eq!(shape.state(), ShapeState::Hidden);
        assert_eq!(scene.visible().count(), 0);
        assert_eq!(scene.len(), 8 + 12 + 1);
    }

    #[test]
    fn test_cube_rest_pose() {
        let shape = DimensionalShape::new(ShapeKind::Cube, 1.3).unwrap();
        let frame = shape.frame(0.0, 0.0).unwrap();
        assert_eq!(frame.points.len(), 8);
        assert_eq!(frame.edges.len(), 12);
        assert_eq!(frame.triangles.len(), 12);
        for p in &frame.points {
            for c in p.to_array() {
                assert!((c.abs() - 0.65).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_low_dimensions_are_padded() {
        let line = DimensionalShape::new(ShapeKind::Line, 2.0).unwrap();
        let frame = line.frame(0.0, 0.0).unwrap();
        assert_vec3_eq(frame.points[0], Vec3::new(-1.0, 0.0, 0.0));
        assert_vec3_eq(frame.points[1], Vec3::new(1.0, 0.0, 0.0));

        let point = DimensionalShape::new(ShapeKind::Point, 0.3).unwrap();
        let frame = point.frame(1.0, 1.0).unwrap();
        assert_vec3_eq(frame.points[0], Vec3::ZERO);
        assert_eq!(frame.point_radius, 0.3);
    }

    #[test]
    fn test_view_rotation_quarter_turn() {
        let line = DimensionalShape::new(ShapeKind::Line, 2.0).unwrap();
        let frame = line.frame(0.0, FRAC_PI_2).unwrap();
        // x' = x cos + z sin, z' = -x sin + z cos
        assert_vec3_eq(frame.points[1], Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_tesseract_quarter_turn_in_xw() {
        let shape = DimensionalShape::new(ShapeKind::Tesseract, 1.0).unwrap();
        let frame = shape.frame(FRAC_PI_2, 0.0).unwrap();
        // Vertex 15 is (0.5, 0.5, 0.5, 0.5) -> (-0.5, 0.5, 0.5, 0.5) -> (-1/3, 1/3, 1/3),
        // then scaled by the tesseract display scale
        let third = 1.0 / 3.0 * 1.5;
        assert_vec3_eq(frame.points[15], Vec3::new(-third, third, third));
    }

    #[test]
    fn test_base_rotation_is_applied() {
        let mut shape = DimensionalShape::new(ShapeKind::Tesseract, 1.0).unwrap();
        let rest = shape.frame(0.0, 0.0).unwrap();
        let plane = RotationPlane::new(1, 2, 4).unwrap();
        shape.rotation_mut().set(plane, 0.3).unwrap();
        assert_ne!(shape.frame(0.0, 0.0).unwrap().points, rest.points);
    }

    #[test]
    fn test_update_moves_primitives() {
        let mut scene = SceneGraph::new();
        let mut shape = DimensionalShape::create(&mut scene, 4, 1.0, true).unwrap();
        scene.clear_dirty();

        shape.update(&mut scene, 0.7, 0.2).unwrap();
        let frame = shape.frame(0.7, 0.2).unwrap();
        assert!(scene.has_dirty());

        let positions: Vec<Vec3> = scene
            .iter()
            .filter_map(|p| match p.geometry() {
                Geometry::Point { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        assert_eq!(positions.len(), 16);
        for p in &frame.points {
            assert!(positions.iter().any(|q| q.approx_eq(*p, EPSILON)));
        }
    }

    #[test]
    fn test_update_while_hidden_is_noop() {
        let mut scene = SceneGraph::new();
        let mut shape = DimensionalShape::create(&mut scene, 3, 1.3, false).unwrap();
        scene.clear_dirty();
        shape.update(&mut scene, 1.0, 1.0).unwrap();
        assert!(!scene.has_dirty());
    }

    #[test]
    fn test_degenerate_attach_registers_nothing() {
        let mut scene = SceneGraph::new();
        // Eye at the same distance as the w = +0.5 vertices
        let chain = ProjectionChain::new(0.5, 2.0).with_degeneracy(Degeneracy::Reject);
        let mut shape = DimensionalShape::new(ShapeKind::Tesseract, 1.0)
            .unwrap()
            .with_projection(chain);
        assert!(shape.attach(&mut scene, true).is_err());
        assert!(scene.is_empty());
        assert_eq!(shape.state(), ShapeState::Created);
    }

    #[test]
    fn test_failed_update_keeps_geometry() {
        let mut scene = SceneGraph::new();
        let chain = ProjectionChain::new(0.6, 2.0);
        let mut shape = DimensionalShape::new(ShapeKind::Tesseract, 1.0)
            .unwrap()
            .with_projection(chain);
        shape.attach(&mut scene, true).unwrap();
        scene.clear_dirty();

        // Angle at which vertex (0.5, _, _, 0.5) reaches w = 0.6 in the xw plane
        let angle = (1.2 / 2f64.sqrt()).asin() - std::f64::consts::FRAC_PI_4;
        let err = shape.update(&mut scene, angle, 0.0).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::Geometry(GeometryError::DegenerateProjection { .. })
        ));
        assert!(!scene.has_dirty());
        assert_eq!(shape.state(), ShapeState::Active);
    }

    #[test]
    fn test_non_finite_phase_keeps_geometry() {
        let mut scene = SceneGraph::new();
        let mut shape = DimensionalShape::create(&mut scene, 3, 2.0, true).unwrap();
        scene.clear_dirty();

        assert_eq!(
            shape.frame(0.0, f64::INFINITY).unwrap_err(),
            GeometryError::NonFinite { index: 0 }
        );
        let err = shape.update(&mut scene, 0.0, f64::NAN).unwrap_err();
        assert_eq!(err, ShapeError::Geometry(GeometryError::NonFinite { index: 0 }));
        assert!(!scene.has_dirty());
        assert!(scene.iter().all(|p| p.geometry().is_finite()));
    }

    #[test]
    fn test_show_hide_cycle() {
        let mut scene = SceneGraph::new();
        let mut shape = DimensionalShape::create(&mut scene, 2, 2.0, true).unwrap();

        shape.hide(&mut scene).unwrap();
        assert_eq!(shape.state(), ShapeState::Hidden);
        assert_eq!(scene.visible().count(), 0);

        shape.hide(&mut scene).unwrap();
        shape.show(&mut scene).unwrap();
        assert_eq!(shape.state(), ShapeState::Active);
        assert_eq!(scene.visible().count(), scene.len());
    }

    #[test]
    fn test_dispose_removes_everything() {
        let mut scene = SceneGraph::new();
        let mut shape = DimensionalShape::create(&mut scene, 5, 1.0, true).unwrap();
        shape.dispose(&mut scene);
        assert!(scene.is_empty());
        assert_eq!(shape.state(), ShapeState::Disposed);
        assert_eq!(shape.primitive_count(), 0);

        shape.dispose(&mut scene);
        assert_eq!(
            shape.show(&mut scene),
            Err(ShapeError::InvalidTransition { from: ShapeState::Disposed, operation: "show" })
        );
    }

    #[test]
    fn test_attach_twice_fails() {
        let mut scene = SceneGraph::new();
        let mut shape = DimensionalShape::create(&mut scene, 1, 2.0, true).unwrap();
        assert!(matches!(
            shape.attach(&mut scene, true),
            Err(ShapeError::InvalidTransition { from: ShapeState::Active, .. })
        ));
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_tesseract_colors_follow_original_w() {
        let shape = DimensionalShape::new(ShapeKind::Tesseract, 1.0).unwrap();
        let frame = shape.frame(2.0, 0.0).unwrap();
        for (vertex, material) in shape.vertices().iter().zip(&frame.point_materials) {
            let expected = if vertex[3] < 0.0 { Material::BLACK } else { Material::AMBER };
            assert_eq!(*material, expected);
        }
    }

    #[test]
    fn test_error_display() {
        let err = ShapeError::InvalidTransition { from: ShapeState::Disposed, operation: "hide" };
        assert_eq!(err.to_string(), "Cannot hide a disposed shape");
        let err: ShapeError = GeometryError::InvalidDimension { dimension: 7 }.into();
        assert!(err.to_string().starts_with("Geometry error"));
    }
}
