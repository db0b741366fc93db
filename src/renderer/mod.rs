//! Rendering module
//!
//! `draw` fixes what is drawn and in which order; `shapes` and `text` turn that
//! into colored triangles; `pipeline` pushes them through WebGPU.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use draw::{Canvas, DrawCommand, DrawList, render_scene};
pub use pipeline::RenderState;
pub use shapes::QuadBatch;
pub use vertex::Vertex;
