//! Render collection system
//!
//! Rebuilds the GPU-ready buffers from the scene whenever primitives changed,
//! then clears the dirty flags. The buffers are what a window-backed renderer
//! would upload; the headless driver only reports their sizes.

use dimview_core::SceneGraph;
use dimview_render::RenderableGeometry;

/// Statistics for the buffers currently held
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Point instances
    pub points: usize,
    /// Line segments
    pub segments: usize,
    /// Face triangles
    pub triangles: usize,
    /// Total bytes across all buffers
    pub bytes: usize,
}

/// Keeps renderable geometry in sync with the scene
#[derive(Default)]
pub struct RenderSystem {
    geometry: RenderableGeometry,
    rebuilds: u64,
}

impl RenderSystem {
    /// Create a render system with empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild buffers if the scene changed; returns whether a rebuild happened
    pub fn sync(&mut self, scene: &mut SceneGraph) -> bool {
        if !scene.has_dirty() {
            return false;
        }
        self.geometry = RenderableGeometry::from_scene(scene);
        scene.clear_dirty();
        self.rebuilds += 1;
        true
    }

    /// The current buffers
    pub fn geometry(&self) -> &RenderableGeometry {
        &self.geometry
    }

    /// How many times the buffers were rebuilt
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Sizes of the current buffers
    pub fn stats(&self) -> FrameStats {
        let g = &self.geometry;
        FrameStats {
            points: g.point_count(),
            segments: g.segment_count(),
            triangles: g.triangle_count(),
            bytes: g.point_bytes().len() + g.line_bytes().len() + g.mesh_bytes().len(),
        }
    }
}
