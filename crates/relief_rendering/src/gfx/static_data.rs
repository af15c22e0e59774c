//! Geometry shared by every tile: the full-tile raster quad.
//!
//! Uploaded once per device and borrowed by every draw that covers a whole
//! tile.

use relief_shared::EXTENT;

use super::device::{GraphicsDevice, IndexBufferId, Segment, VertexBufferId};
use super::vertex::RasterVertex;
use crate::error::GfxResult;

/// Corners of the full tile, in `EXTENT` units.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn raster_vertices() -> [RasterVertex; 4] {
    let e = EXTENT as i16;
    let t = EXTENT as u16;
    [
        RasterVertex::new([0, 0], [0, 0]),
        RasterVertex::new([e, 0], [t, 0]),
        RasterVertex::new([0, e], [0, t]),
        RasterVertex::new([e, e], [t, t]),
    ]
}

/// Two triangles over [`raster_vertices`].
#[must_use]
pub const fn quad_triangle_indices() -> [u16; 6] {
    [0, 1, 2, 1, 2, 3]
}

/// Device-resident full-tile geometry.
#[derive(Debug)]
pub struct RenderStaticData {
    /// Full-tile quad vertices
    pub raster_vertex_buffer: VertexBufferId,
    /// Full-tile quad indices
    pub quad_triangle_index_buffer: IndexBufferId,
    /// Single segment spanning the quad
    pub raster_segments: Vec<Segment>,
}

impl RenderStaticData {
    /// Uploads the shared quad.
    ///
    /// # Errors
    /// Returns the device error if a buffer cannot be allocated.
    pub fn upload<D: GraphicsDevice + ?Sized>(device: &mut D) -> GfxResult<Self> {
        let vertices = raster_vertices();
        let indices = quad_triangle_indices();

        let raster_vertex_buffer = device.create_vertex_buffer(bytemuck::cast_slice(&vertices))?;
        let quad_triangle_index_buffer = match device.create_index_buffer(&indices) {
            Ok(buffer) => buffer,
            Err(err) => {
                device.release_vertex_buffer(raster_vertex_buffer);
                return Err(err);
            }
        };

        Ok(Self {
            raster_vertex_buffer,
            quad_triangle_index_buffer,
            raster_segments: vec![Segment {
                vertex_offset: 0,
                index_offset: 0,
                vertex_length: vertices.len(),
                index_length: indices.len(),
            }],
        })
    }

    /// Frees the shared buffers.
    pub fn release<D: GraphicsDevice + ?Sized>(self, device: &mut D) {
        device.release_vertex_buffer(self.raster_vertex_buffer);
        device.release_index_buffer(self.quad_triangle_index_buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_extent() {
        let vertices = raster_vertices();
        assert_eq!(vertices[0].pos, [0, 0]);
        assert_eq!(vertices[3].pos, [8192, 8192]);
        assert_eq!(vertices[3].texture_pos, [8192, 8192]);
    }

    #[test]
    fn test_indices_reference_all_corners() {
        let indices = quad_triangle_indices();
        for corner in 0..4u16 {
            assert!(indices.contains(&corner));
        }
    }
}
