//! Developer tooling: the debug panel overlay and a read-only scene inspector.
//!
//! # Invariants
//! - Tools never mutate the scene or the camera.

mod inspector;
mod panel;

pub use inspector::{SceneInspector, SceneSummary};
pub use panel::DebugPanel;
