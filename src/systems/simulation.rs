//! Frame clock and viewer stepping
//!
//! Manages the animation loop:
//! - Delta time calculation
//! - Delta capping after stalls
//! - Viewer tick and dirty check

use std::time::Instant;
use dimview_core::{SceneGraph, TickOutcome, Viewer};

/// Longest delta handed to the viewer unless configured otherwise
pub const DEFAULT_MAX_DT: f64 = 0.25;

/// Result of a simulation update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationResult {
    /// What the viewer did with the frame
    pub outcome: TickOutcome,
    /// Whether geometry needs to be rebuilt and re-uploaded
    pub geometry_dirty: bool,
    /// Delta actually applied, after capping
    pub dt: f64,
}

/// Drives the viewer once per frame
pub struct SimulationSystem {
    last_frame: Instant,
    max_dt: f64,
}

impl SimulationSystem {
    /// Create a new simulation system with the default delta cap
    pub fn new() -> Self {
        Self::with_max_dt(DEFAULT_MAX_DT)
    }

    /// Create a simulation system with a custom delta cap
    pub fn with_max_dt(max_dt: f64) -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt,
        }
    }

    /// Run one frame using wall-clock time since the previous call
    pub fn update(&mut self, viewer: &mut Viewer, scene: &mut SceneGraph) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.step(viewer, scene, raw_dt)
    }

    /// Run one frame with an explicit delta
    ///
    /// The delta is capped so a stall (first frame, window focus, debugger)
    /// does not make the shape jump.
    pub fn step(&mut self, viewer: &mut Viewer, scene: &mut SceneGraph, raw_dt: f64) -> SimulationResult {
        let dt = self.cap(raw_dt);
        let outcome = viewer.tick(scene, dt);
        SimulationResult {
            outcome,
            geometry_dirty: scene.has_dirty(),
            dt,
        }
    }

    fn cap(&self, raw_dt: f64) -> f64 {
        if raw_dt > self.max_dt {
            log::debug!("Capping frame delta {:.3}s to {:.3}s", raw_dt, self.max_dt);
            self.max_dt
        } else {
            raw_dt
        }
    }

    /// The delta cap in seconds
    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimview_core::ViewerOptions;

    fn setup() -> (Viewer, SceneGraph) {
        let mut scene = SceneGraph::new();
        let viewer = Viewer::new(&mut scene, ViewerOptions::default()).unwrap();
        (viewer, scene)
    }

    #[test]
    fn test_delta_time_capped() {
        let (mut viewer, mut scene) = setup();
        let mut sim = SimulationSystem::with_max_dt(0.1);
        let result = sim.step(&mut viewer, &mut scene, 3.0);
        assert_eq!(result.dt, 0.1);
        assert!((viewer.state().animation_phase - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_step_marks_geometry_dirty() {
        let (mut viewer, mut scene) = setup();
        viewer.change_dimension(&mut scene, 3).unwrap();
        scene.clear_dirty();

        let mut sim = SimulationSystem::new();
        let result = sim.step(&mut viewer, &mut scene, 1.0 / 60.0);
        assert_eq!(result.outcome, TickOutcome::Updated);
        assert!(result.geometry_dirty);
    }

    #[test]
    fn test_paused_frame_is_clean() {
        let (mut viewer, mut scene) = setup();
        viewer.set_paused(true);
        scene.clear_dirty();

        let mut sim = SimulationSystem::new();
        let result = sim.step(&mut viewer, &mut scene, 1.0 / 60.0);
        assert_eq!(result.outcome, TickOutcome::Paused);
        assert!(!result.geometry_dirty);
    }

    #[test]
    fn test_wall_clock_update() {
        let (mut viewer, mut scene) = setup();
        let mut sim = SimulationSystem::default();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let result = sim.update(&mut viewer, &mut scene);
        assert!(result.dt >= 0.02);
        assert!(result.dt <= sim.max_dt());
    }
}
