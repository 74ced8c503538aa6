//! Shared types for the planeview viewer.
//!
//! # Invariants
//! - Viewport state is owned by a viewer instance, never process-wide.
//! - The applied pixel ratio never exceeds the configured cap.

pub mod config;
pub mod types;

pub use config::{
    CameraConfig, ConfigError, ControlsConfig, GuiConfig, RendererConfig, ViewerConfig,
    WindowConfig,
};
pub use types::{ColorSpace, Viewport, capped_pixel_ratio, srgb_to_linear};
