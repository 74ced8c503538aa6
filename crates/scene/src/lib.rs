//! Scene model for the viewer: one camera, one scene root, one clock.
//!
//! # Invariants
//! - The scene root owns its children directly; there is no hierarchy.
//! - Camera projection changes only take effect after `update_projection_matrix`.

mod camera;
mod clock;
mod geometry;
mod graph;
mod material;

pub use camera::PerspectiveCamera;
pub use clock::Clock;
pub use geometry::{PlaneGeometry, PlaneVertex};
pub use graph::{AmbientLight, Mesh, Scene, SceneNode};
pub use material::{MaterialUniforms, ShaderMaterial};
