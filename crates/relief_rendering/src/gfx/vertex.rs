//! Raster vertex format shared by the prepare and shade programs.

use bytemuck::{Pod, Zeroable};

/// Vertex of a raster quad: tile-local position plus texture position, both
/// in `0..=EXTENT` units.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RasterVertex {
    /// Tile-local position [x, y]
    pub pos: [i16; 2],
    /// Texture position [u, v], divided by EXTENT in the shader
    pub texture_pos: [u16; 2],
}

impl RasterVertex {
    /// Creates a vertex.
    #[must_use]
    pub const fn new(pos: [i16; 2], texture_pos: [u16; 2]) -> Self {
        Self { pos, texture_pos }
    }

    /// Vertex buffer layout for WGPU
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Sint16x2,  // a_pos
        1 => Uint16x2,  // a_texture_pos
    ];
}
