//! Render surface interface.
//!
//! # Invariants
//! - A renderer reads the scene and camera; it never mutates them.
//! - Setting the pixel ratio re-applies the current logical size.
//!
//! The trait is implemented by the wgpu backend and by [`DebugTextRenderer`],
//! which needs no GPU and backs the CLI and the headless tests.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderError, Renderer, drawing_buffer_size};
