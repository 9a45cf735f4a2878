//! Viewer state
//!
//! The [`Viewer`] owns one [`DimensionalShape`] per dimension, keeps exactly
//! one of them visible, and advances the two animation phases each tick.

use dimview_math::{GeometryError, ProjectionChain};

use crate::{DimensionalShape, ProjectedFrame, Scene, ShapeError, ShapeKind, ShapeState};

/// Sizes the application builds its shapes with, indexed by dimension
pub const DEFAULT_SIZES: [f64; 6] = [0.3, 2.5, 2.0, 1.8, 1.2, 1.0];

/// Default rate for both phases, in radians per second before per-shape scaling
pub const DEFAULT_RATE: f64 = 0.5;

/// Slider position that maps to a rate of 1.0
pub const SLIDER_UNITS_PER_RATE: f64 = 50.0;

/// Convert a speed slider position into a rate
#[inline]
pub fn rate_from_slider(value: f64) -> f64 {
    value / SLIDER_UNITS_PER_RATE
}

fn finite_or_default(rate: f64, which: &str) -> f64 {
    if rate.is_finite() {
        rate
    } else {
        log::warn!("Non-finite {} rate {}, using {}", which, rate, DEFAULT_RATE);
        DEFAULT_RATE
    }
}

/// Everything a UI needs to know about the viewer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerState {
    /// Dimension of the visible shape
    pub current_dimension: usize,
    /// Dimension shown before the last change, if any
    pub previous_dimension: Option<usize>,
    /// Phase advance per second for the hyper rotation
    pub animation_rate: f64,
    /// Phase advance per second for the view rotation
    pub rotation_rate: f64,
    /// Whether ticks are ignored
    pub paused: bool,
    /// Accumulated hyper rotation phase
    pub animation_phase: f64,
    /// Accumulated view rotation phase
    pub rotation_phase: f64,
}

/// Construction parameters for a [`Viewer`]
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerOptions {
    /// Side length per dimension
    pub sizes: [f64; 6],
    /// Dimension visible at start
    pub initial_dimension: usize,
    /// Initial hyper rotation rate
    pub animation_rate: f64,
    /// Initial view rotation rate
    pub rotation_rate: f64,
    /// Start paused
    pub paused: bool,
    /// Projection used by every shape
    pub projection: ProjectionChain,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES,
            initial_dimension: 0,
            animation_rate: DEFAULT_RATE,
            rotation_rate: DEFAULT_RATE,
            paused: false,
            projection: ProjectionChain::default(),
        }
    }
}

/// What a call to [`Viewer::tick`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The active shape moved
    Updated,
    /// Paused; nothing changed
    Paused,
    /// Nothing was drawn: the frame failed and the previous geometry is
    /// still shown, or the viewer was disposed
    Skipped,
}

/// Owns the six shapes and the animation state
#[derive(Debug)]
pub struct Viewer {
    shapes: Vec<DimensionalShape>,
    state: ViewerState,
}

impl Viewer {
    /// Create every shape in `scene`, with only the initial dimension visible
    pub fn new<S: Scene + ?Sized>(scene: &mut S, options: ViewerOptions) -> Result<Self, ShapeError> {
        ShapeKind::from_dimension(options.initial_dimension)?;

        let mut shapes: Vec<DimensionalShape> = Vec::with_capacity(ShapeKind::ALL.len());
        for (kind, &size) in ShapeKind::ALL.into_iter().zip(options.sizes.iter()) {
            let mut shape = DimensionalShape::new(kind, size)?.with_projection(options.projection);
            if let Err(e) = shape.attach(scene, kind.dimension() == options.initial_dimension) {
                for created in shapes.iter_mut() {
                    created.dispose(scene);
                }
                return Err(e);
            }
            shapes.push(shape);
        }

        log::info!(
            "Viewer ready with {} shapes, showing {}",
            shapes.len(),
            ShapeKind::ALL[options.initial_dimension].descriptor().title
        );

        Ok(Self {
            shapes,
            state: ViewerState {
                current_dimension: options.initial_dimension,
                previous_dimension: None,
                animation_rate: finite_or_default(options.animation_rate, "animation"),
                rotation_rate: finite_or_default(options.rotation_rate, "rotation"),
                paused: options.paused,
                animation_phase: 0.0,
                rotation_phase: 0.0,
            },
        })
    }

    /// Hide the current shape and show the one for `dimension`
    ///
    /// Selecting the current dimension is a no-op.
    pub fn change_dimension<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        dimension: usize,
    ) -> Result<(), ShapeError> {
        ShapeKind::from_dimension(dimension)?;
        let current = self.state.current_dimension;
        if dimension == current {
            return Ok(());
        }

        log::info!("Dimension change: {} -> {}", current, dimension);
        self.shapes[current].hide(scene)?;
        self.shapes[dimension].show(scene)?;

        self.state.previous_dimension = Some(current);
        self.state.current_dimension = dimension;
        Ok(())
    }

    /// Advance the phases by `dt` seconds and update the visible shape
    ///
    /// Projection failures are logged and the frame is skipped.
    pub fn tick<S: Scene + ?Sized>(&mut self, scene: &mut S, dt: f64) -> TickOutcome {
        if self.state.paused {
            return TickOutcome::Paused;
        }
        if self.current_shape().state() == ShapeState::Disposed {
            log::trace!("Tick after dispose ignored");
            return TickOutcome::Skipped;
        }

        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid frame delta {}", dt);
            0.0
        };
        self.state.animation_phase += self.state.animation_rate * dt;
        self.state.rotation_phase += self.state.rotation_rate * dt;

        let (hyper, view) = self.angles();
        let shape = &mut self.shapes[self.state.current_dimension];
        match shape.update(scene, hyper, view) {
            Ok(()) => TickOutcome::Updated,
            Err(e) => {
                log::error!("{}: skipping frame: {}", shape.title(), e);
                TickOutcome::Skipped
            }
        }
    }

    /// Hyper and view angles of the visible shape at the current phases
    pub fn angles(&self) -> (f64, f64) {
        let descriptor = self.current_shape().descriptor();
        (
            self.state.animation_phase * descriptor.animation_rate_scale,
            self.state.rotation_phase * descriptor.view_rate_scale,
        )
    }

    /// Projected geometry of the visible shape at the current phases
    pub fn current_frame(&self) -> Result<ProjectedFrame, GeometryError> {
        let (hyper, view) = self.angles();
        self.current_shape().frame(hyper, view)
    }

    /// Flip the paused flag, returning the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.state.paused = !self.state.paused;
        log::debug!("Animation {}", if self.state.paused { "paused" } else { "resumed" });
        self.state.paused
    }

    /// Pause or resume
    pub fn set_paused(&mut self, paused: bool) {
        self.state.paused = paused;
    }

    /// Set the hyper rotation rate
    ///
    /// Non-finite rates are ignored. Returns whether the rate was applied.
    pub fn set_animation_rate(&mut self, rate: f64) -> bool {
        if !rate.is_finite() {
            log::warn!("Ignoring non-finite animation rate {}", rate);
            return false;
        }
        self.state.animation_rate = rate;
        true
    }

    /// Set the view rotation rate
    ///
    /// Non-finite rates are ignored. Returns whether the rate was applied.
    pub fn set_rotation_rate(&mut self, rate: f64) -> bool {
        if !rate.is_finite() {
            log::warn!("Ignoring non-finite rotation rate {}", rate);
            return false;
        }
        self.state.rotation_rate = rate;
        true
    }

    /// Set both rates from a speed slider position
    pub fn set_speed_from_slider(&mut self, value: f64) {
        let rate = rate_from_slider(value);
        if self.set_animation_rate(rate) {
            self.set_rotation_rate(rate);
        }
    }

    /// Remove every shape from the scene
    pub fn dispose<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        for shape in &mut self.shapes {
            shape.dispose(scene);
        }
        log::debug!("Viewer disposed");
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// The visible shape
    #[inline]
    pub fn current_shape(&self) -> &DimensionalShape {
        &self.shapes[self.state.current_dimension]
    }

    /// Shape for `dimension`, if it exists
    #[inline]
    pub fn shape(&self, dimension: usize) -> Option<&DimensionalShape> {
        self.shapes.get(dimension)
    }

    /// All shapes, indexed by dimension
    #[inline]
    pub fn shapes(&self) -> &[DimensionalShape] {
        &self.shapes
    }

    /// Title of the visible shape
    #[inline]
    pub fn title(&self) -> &'static str {
        self.current_shape().title()
    }

    /// Description of the visible shape
    #[inline]
    pub fn description(&self) -> &'static str {
        self.current_shape().description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SceneGraph, ShapeState};

    fn viewer(scene: &mut SceneGraph) -> Viewer {
        Viewer::new(scene, ViewerOptions::default()).unwrap()
    }

    #[test]
    fn test_only_initial_shape_visible() {
        let mut scene = SceneGraph::new();
        let viewer = viewer(&mut scene);
        assert_eq!(viewer.state().current_dimension, 0);
        assert_eq!(viewer.title(), "Point (0D)");
        assert_eq!(scene.visible().count(), 1);
        assert_eq!(viewer.shapes().len(), 6);
    }

    #[test]
    fn test_invalid_initial_dimension() {
        let mut scene = SceneGraph::new();
        let options = ViewerOptions { initial_dimension: 9, ..Default::default() };
        assert!(Viewer::new(&mut scene, options).is_err());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_change_dimension() {
        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);

        viewer.change_dimension(&mut scene, 3).unwrap();
        assert_eq!(viewer.state().current_dimension, 3);
        assert_eq!(viewer.state().previous_dimension, Some(0));
        assert_eq!(viewer.shape(0).unwrap().state(), ShapeState::Hidden);
        assert_eq!(viewer.current_shape().state(), ShapeState::Active);
        assert_eq!(scene.visible().count(), 8 + 12 + 1);
    }

    #[test]
    fn test_change_to_same_dimension_is_noop() {
        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);
        viewer.change_dimension(&mut scene, 0).unwrap();
        assert_eq!(viewer.state().previous_dimension, None);
    }

    #[test]
    fn test_change_to_invalid_dimension() {
        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);
        let err = viewer.change_dimension(&mut scene, 6).unwrap_err();
        assert_eq!(err, ShapeError::Geometry(GeometryError::InvalidDimension { dimension: 6 }));
        assert_eq!(viewer.state().current_dimension, 0);
    }

    #[test]
    fn test_tick_advances_phases() {
        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);
        assert_eq!(viewer.tick(&mut scene, 2.0), TickOutcome::Updated);
        assert!((viewer.state().animation_phase - 1.0).abs() < 1e-12);
        assert!((viewer.state().rotation_phase - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pause_freezes_phases() {
        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);
        assert!(viewer.toggle_pause());
        assert_eq!(viewer.tick(&mut scene, 1.0), TickOutcome::Paused);
        assert_eq!(viewer.state().animation_phase, 0.0);
        assert!(!viewer.toggle_pause());
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);
        viewer.tick(&mut scene, f64::NAN);
        viewer.tick(&mut scene, -1.0);
        assert_eq!(viewer.state().animation_phase, 0.0);
    }

    #[test]
    fn test_angles_use_shape_multipliers() {
        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);
        viewer.change_dimension(&mut scene, 4).unwrap();
        viewer.tick(&mut scene, 4.0);
        // phase 2.0 with tesseract multipliers 0.5 and 0.2
        let (hyper, view) = viewer.angles();
        assert!((hyper - 1.0).abs() < 1e-12);
        assert!((view - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_slider_rate() {
        assert_eq!(rate_from_slider(25.0), 0.5);
        assert_eq!(rate_from_slider(0.0), 0.0);

        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);
        viewer.set_speed_from_slider(100.0);
        assert_eq!(viewer.state().animation_rate, 2.0);
        assert_eq!(viewer.state().rotation_rate, 2.0);
    }

    #[test]
    fn test_dispose_clears_scene() {
        let mut scene = SceneGraph::new();
        let mut viewer = viewer(&mut scene);
        viewer.dispose(&mut scene);
        assert!(scene.is_empty());
        assert_eq!(viewer.tick(&mut scene, 0.1), TickOutcome::Skipped);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_non_finite_rates_are_rejected() {
        let mut scene = SceneGraph::new();
        let options = ViewerOptions { initial_dimension: 3, ..Default::default() };
        let mut viewer = Viewer::new(&mut scene, options).unwrap();

        assert!(!viewer.set_rotation_rate(f64::INFINITY));
        assert!(!viewer.set_animation_rate(f64::NAN));
        viewer.set_speed_from_slider(f64::NEG_INFINITY);
        assert_eq!(viewer.state().rotation_rate, DEFAULT_RATE);
        assert_eq!(viewer.state().animation_rate, DEFAULT_RATE);

        assert_eq!(viewer.tick(&mut scene, 0.1), TickOutcome::Updated);
        assert!(scene.iter().all(|p| p.geometry().is_finite()));
    }

    #[test]
    fn test_overflowing_phase_skips_frame() {
        let mut scene = SceneGraph::new();
        let options = ViewerOptions { initial_dimension: 3, ..Default::default() };
        let mut viewer = Viewer::new(&mut scene, options).unwrap();
        scene.clear_dirty();

        assert!(viewer.set_rotation_rate(f64::MAX));
        assert_eq!(viewer.tick(&mut scene, 2.0), TickOutcome::Skipped);
        assert!(!scene.has_dirty());
        assert!(scene.iter().all(|p| p.geometry().is_finite()));
    }

    #[test]
    fn test_non_finite_option_rates_fall_back() {
        let mut scene = SceneGraph::new();
        let options = ViewerOptions { rotation_rate: f64::NAN, ..Default::default() };
        let viewer = Viewer::new(&mut scene, options).unwrap();
        assert_eq!(viewer.state().rotation_rate, DEFAULT_RATE);
    }
}
