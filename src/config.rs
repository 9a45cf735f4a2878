//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`DIMVIEW_SECTION__KEY`)

use dimview_core::{Degeneracy, ProjectionChain, ShapeKind, ViewerOptions};
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Viewer start-up state
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Shape sizes
    #[serde(default)]
    pub shapes: ShapesConfig,
    /// Perspective projection
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Headless playback
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`DIMVIEW_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // DIMVIEW_VIEWER__INITIAL_DIMENSION=4 -> viewer.initial_dimension = 4
        figment = figment.merge(Env::prefixed("DIMVIEW_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if ShapeKind::from_dimension(self.viewer.initial_dimension).is_err() {
            return Err(ConfigError::invalid(format!(
                "viewer.initial_dimension must be 0 to 5, got {}",
                self.viewer.initial_dimension
            )));
        }
        if let Some(size) = self.shapes.sizes.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(ConfigError::invalid(format!(
                "shapes.sizes must be positive, got {}",
                size
            )));
        }
        if !(self.shapes.size_factor.is_finite() && self.shapes.size_factor > 0.0) {
            return Err(ConfigError::invalid(format!(
                "shapes.size_factor must be positive, got {}",
                self.shapes.size_factor
            )));
        }
        for (name, speed) in [
            ("viewer.animation_speed", self.viewer.animation_speed),
            ("viewer.rotation_speed", self.viewer.rotation_speed),
        ] {
            if !speed.is_finite() {
                return Err(ConfigError::invalid(format!("{} must be finite, got {}", name, speed)));
            }
        }
        for (name, offset) in [
            ("projection.eye_offset_4d", self.projection.eye_offset_4d),
            ("projection.eye_offset_5d", self.projection.eye_offset_5d),
        ] {
            if !(offset.is_finite() && offset > 0.0) {
                return Err(ConfigError::invalid(format!("{} must be positive, got {}", name, offset)));
            }
        }
        if !(self.playback.frame_dt.is_finite() && self.playback.frame_dt >= 0.0) {
            return Err(ConfigError::invalid(format!(
                "playback.frame_dt must be finite and non-negative, got {}",
                self.playback.frame_dt
            )));
        }
        if !(self.playback.max_dt > 0.0) {
            return Err(ConfigError::invalid(format!(
                "playback.max_dt must be positive, got {}",
                self.playback.max_dt
            )));
        }
        Ok(())
    }

    /// Build the viewer options this configuration describes
    pub fn viewer_options(&self) -> ViewerOptions {
        let factor = self.shapes.size_factor;
        ViewerOptions {
            sizes: self.shapes.sizes.map(|size| size * factor),
            initial_dimension: self.viewer.initial_dimension,
            animation_rate: self.viewer.animation_speed,
            rotation_rate: self.viewer.rotation_speed,
            paused: self.viewer.paused,
            projection: self.projection.chain(),
        }
    }
}

/// Viewer start-up state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Dimension shown at start (0-5)
    pub initial_dimension: usize,
    /// Hyper rotation rate
    pub animation_speed: f64,
    /// View rotation rate
    pub rotation_speed: f64,
    /// Start paused
    pub paused: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_dimension: 0,
            animation_speed: 0.5,
            rotation_speed: 0.5,
            paused: false,
        }
    }
}

/// Shape sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapesConfig {
    /// Side length per dimension, point through penteract
    pub sizes: [f64; 6],
    /// Multiplier applied to every size (1.2 suits small screens)
    pub size_factor: f64,
}

impl Default for ShapesConfig {
    fn default() -> Self {
        Self {
            sizes: dimview_core::DEFAULT_SIZES,
            size_factor: 1.0,
        }
    }
}

/// Perspective projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Eye distance for the 4D -> 3D stage
    pub eye_offset_4d: f64,
    /// Eye distance for the 5D -> 4D stage
    pub eye_offset_5d: f64,
    /// Clamp near-zero denominators instead of skipping the frame
    pub clamp_degenerate: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            eye_offset_4d: 2.0,
            eye_offset_5d: 2.0,
            clamp_degenerate: false,
        }
    }
}

impl ProjectionConfig {
    /// The projection chain for these settings
    pub fn chain(&self) -> ProjectionChain {
        let degeneracy = if self.clamp_degenerate { Degeneracy::Clamp } else { Degeneracy::Reject };
        ProjectionChain::new(self.eye_offset_4d, self.eye_offset_5d).with_degeneracy(degeneracy)
    }
}

/// Headless playback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Number of frames to run
    pub frames: u32,
    /// Simulated time per frame in seconds
    pub frame_dt: f64,
    /// Longest frame delta passed to the viewer, in seconds
    pub max_dt: f64,
    /// Step through every dimension during playback
    pub cycle_dimensions: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_dt: 1.0 / 60.0,
            max_dt: 0.25,
            cycle_dimensions: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
