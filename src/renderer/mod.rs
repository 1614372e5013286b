//! Rendering module
//!
//! `scene` turns game state into a backend-neutral frame description;
//! `shapes` + `pipeline` draw its geometry with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Scene, Sprite, Tooltip, Visual, ZoneView, build_scene};
pub use vertex::Vertex;
