//! dimview - geometric objects from 0 to 5 dimensions
//!
//! The library side of the application: configuration loading and the
//! per-frame systems. Geometry lives in `dimview_math`, shapes and the viewer
//! in `dimview_core`, GPU buffers in `dimview_render`.

pub mod config;
pub mod systems;
