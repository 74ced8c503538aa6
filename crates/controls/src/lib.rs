//! Orbit camera controls.
//!
//! The camera orbits a target point on a sphere. Pointer input accumulates
//! spherical and pan deltas; `update` applies them once per frame.
//!
//! # Invariants
//! - Controls never own the camera; it is passed to every `update`.
//! - With damping, each `update` applies `damping_factor` of the pending
//!   motion and keeps the rest for later frames.

mod orbit;
mod spherical;

pub use orbit::OrbitControls;
pub use spherical::Spherical;
