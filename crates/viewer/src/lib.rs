//! Viewer application: one camera, one scene, one renderer, one controls
//! instance and one clock, driven one frame at a time by its host.
//!
//! # Invariants
//! - Construction runs its setup steps strictly in order.
//! - Each `tick` updates the controls once, renders once and requests
//!   exactly one further frame.
//! - Resizing with unchanged host dimensions changes nothing.

mod error;
mod host;
pub mod shaders;
mod viewer;

pub use error::ViewerError;
pub use host::{HeadlessHost, Host};
pub use viewer::{FrameState, Viewer};
