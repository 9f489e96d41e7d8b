//! WebGPU rendering module
//!
//! The scene is built as flat-colored triangles in board coordinates and
//! mapped to the viewport in `pipeline`.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
