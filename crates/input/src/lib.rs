//! Pointer input mapped to camera control inputs.
//!
//! # Invariants
//! - Controls consume `ControlInput`, never raw window events.
//! - Drag deltas are in logical pixels.

pub mod action;
pub mod pointer;

pub use action::ControlInput;
pub use pointer::{PointerButton, PointerTracker};
