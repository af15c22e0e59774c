//! Graphics abstraction consumed by the hillshade layer.
//!
//! The device itself is an external collaborator; this module defines its
//! contract plus the small amount of GPU-facing data the layer owns.

mod device;
mod offscreen;
mod static_data;
mod vertex;

pub use device::{
    ColorMode, CullFaceMode, DepthFunction, DepthMask, DepthMode, DrawCall, FramebufferId,
    GraphicsDevice, IndexBufferId, OffscreenTarget, Primitive, ProgramDescriptor, ProgramId,
    Segment, Size, StencilMode, Texture, TextureBinding, TextureFilter, TextureId,
    VertexBufferId,
};
pub use offscreen::OffscreenTexture;
pub use static_data::{quad_triangle_indices, raster_vertices, RenderStaticData};
pub use vertex::RasterVertex;
