//! dimview - Point to Penteract
//!
//! Headless driver: builds every shape, plays the animation for a configured
//! number of frames and keeps the render buffers in sync, logging what a
//! window-backed renderer would upload.

use dimview::config::AppConfig;
use dimview::systems::{RenderSystem, SimulationSystem};
use dimview_core::{SceneGraph, ShapeError, ShapeKind, TickOutcome, Viewer};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Primitives drawn this frame
    scene: SceneGraph,
    /// The six shapes and animation state
    viewer: Viewer,
    simulation: SimulationSystem,
    render: RenderSystem,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, ShapeError> {
        let mut scene = SceneGraph::new();
        let viewer = Viewer::new(&mut scene, config.viewer_options())?;
        let simulation = SimulationSystem::with_max_dt(config.playback.max_dt);

        log::info!("{}: {}", viewer.title(), viewer.description());

        Ok(Self {
            config,
            scene,
            viewer,
            simulation,
            render: RenderSystem::new(),
        })
    }

    /// Dimension to show at `frame` when cycling through all of them
    fn scheduled_dimension(&self, frame: u32) -> Option<usize> {
        let playback = &self.config.playback;
        if !playback.cycle_dimensions {
            return None;
        }
        let per_shape = (playback.frames / ShapeKind::ALL.len() as u32).max(1);
        if frame % per_shape != 0 {
            return None;
        }
        let start = self.config.viewer.initial_dimension;
        Some((start + (frame / per_shape) as usize) % ShapeKind::ALL.len())
    }

    fn run(&mut self) -> Result<(), ShapeError> {
        let frames = self.config.playback.frames;
        let frame_dt = self.config.playback.frame_dt;
        let mut skipped = 0u32;

        for frame in 0..frames {
            if let Some(dimension) = self.scheduled_dimension(frame) {
                if dimension != self.viewer.state().current_dimension {
                    self.viewer.change_dimension(&mut self.scene, dimension)?;
                    log::info!("{}: {}", self.viewer.title(), self.viewer.description());
                }
            }

            let result = self.simulation.step(&mut self.viewer, &mut self.scene, frame_dt);
            if result.outcome == TickOutcome::Skipped {
                skipped += 1;
            }

            if self.render.sync(&mut self.scene) {
                let stats = self.render.stats();
                log::trace!(
                    "Frame {}: {} points, {} segments, {} triangles ({} bytes)",
                    frame, stats.points, stats.segments, stats.triangles, stats.bytes
                );
            }
        }

        let state = self.viewer.state();
        log::info!(
            "Played {} frames ({} skipped, {} buffer rebuilds), ended on {} at phases {:.3}/{:.3}",
            frames,
            skipped,
            self.render.rebuilds(),
            self.viewer.title(),
            state.animation_phase,
            state.rotation_phase
        );
        Ok(())
    }

    fn shutdown(&mut self) {
        self.viewer.dispose(&mut self.scene);
        log::debug!("Scene empty after dispose: {}", self.scene.iter().next().is_none());
    }
}

fn main() {
    // Load configuration before logging so the configured level applies
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG overrides the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting dimview");
    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to build shapes: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run() {
        log::error!("Playback stopped: {}", e);
    }
    app.shutdown();
}
