//! Colored vertices for the board quads

use bytemuck::{Pod, Zeroable};

/// Board-space position plus RGBA
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Layout matching `vs_main` in `shader.wgsl`
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub mod colors {
    pub const BOARD: [f32; 4] = [0.05, 0.25, 0.12, 1.0];
    pub const BOARD_LINE: [f32; 4] = [0.85, 0.9, 0.85, 1.0];
    pub const PADDLE: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    pub const BALL: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
