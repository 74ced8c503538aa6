//! wgpu render backend for the viewer.
//!
//! Draws every mesh of the scene with a pipeline compiled from its shader
//! material, then the debug panel through egui, into a window surface.
//!
//! # Invariants
//! - Renderer never mutates the scene or camera.
//! - The surface is configured at the drawing buffer size, never the raw
//!   window size.
//!
//! # Shader interface
//! Materials see one uniform block at group 0, binding 0:
//! `projection: mat4x4<f32>, model_view: mat4x4<f32>, ambient: vec4<f32>, time: f32`.
//! Vertex attributes: `@location(0) position: vec3<f32>`,
//! `@location(1) normal: vec3<f32>`, `@location(2) uv: vec2<f32>`.

mod gpu;
mod material;
mod overlay;

pub use gpu::WgpuRenderer;
