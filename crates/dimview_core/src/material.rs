//! Material type
//!
//! A material is the color/opacity attribute carried by every primitive.

use serde::{Serialize, Deserialize};

/// A simple material with just a base color
///
/// The alpha channel doubles as opacity; renderers treat anything below 1.0
/// as transparent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
        }
    }

    /// Create a new opaque material with the given RGB color
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque material from a `0xRRGGBB` value
    pub fn from_hex(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Self::from_rgb(channel(16), channel(8), channel(0))
    }

    /// Opaque gray with the given level (0 = black, 1 = white)
    pub fn gray(level: f32) -> Self {
        let level = level.clamp(0.0, 1.0);
        Self::from_rgb(level, level, level)
    }

    /// The same color with a different opacity, clamped to `0.0..=1.0`
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.base_color[3] = opacity.clamp(0.0, 1.0);
        self
    }

    /// Opacity (the alpha channel)
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.base_color[3]
    }

    /// Whether the renderer must blend this material
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.opacity() < 1.0
    }

    /// Black material
    pub const BLACK: Self = Self { base_color: [0.0, 0.0, 0.0, 1.0] };

    /// White material
    pub const WHITE: Self = Self { base_color: [1.0, 1.0, 1.0, 1.0] };

    /// Amber (`#ffaa00`) material
    pub const AMBER: Self = Self { base_color: [1.0, 170.0 / 255.0, 0.0, 1.0] };

    /// Translucent black used for square faces
    pub const FACE: Self = Self { base_color: [0.0, 0.0, 0.0, 0.1] };
}
