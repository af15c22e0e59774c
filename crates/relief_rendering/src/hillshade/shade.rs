//! Shade pass: composites a prepared bucket into the current framebuffer.

use relief_shared::UnwrappedTileId;

use super::bucket::HillshadeBucket;
use super::properties::EvaluatedPaintProperties;
use super::shaders::HILLSHADE_PROGRAM;
use super::uniforms::{derive_lat_range, derive_light, HillshadeUniforms};
use crate::error::{HillshadeError, HillshadeResult};
use crate::gfx::{
    CullFaceMode, DepthMask, DrawCall, GraphicsDevice, Primitive, StencilMode, TextureBinding,
    TextureFilter,
};
use crate::pipeline::{PaintParameters, RenderPass};

/// Geometry a shade draw used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawGeometry {
    /// The bucket's own sub-tile geometry
    Partial,
    /// The shared full-tile quad
    FullTile,
}

/// Issues the compositing draw for one prepared bucket.
///
/// # Errors
/// Device failures propagate unchanged. An unprepared bucket or a pass
/// other than [`RenderPass::Translucent`] asserts in debug builds and
/// returns [`HillshadeError::Precondition`] otherwise.
pub fn shade_bucket<D: GraphicsDevice + ?Sized>(
    parameters: &mut PaintParameters<'_, D>,
    tile: &UnwrappedTileId,
    bucket: &HillshadeBucket,
    evaluated: &EvaluatedPaintProperties,
    label: &str,
) -> HillshadeResult<DrawGeometry> {
    let precondition = |reason| HillshadeError::Precondition { tile: *tile, reason };

    debug_assert_eq!(parameters.pass, RenderPass::Translucent, "shade outside the translucent pass");
    if parameters.pass != RenderPass::Translucent {
        return Err(precondition("shade requires the translucent pass"));
    }
    debug_assert!(bucket.is_prepared(), "tile {tile} shaded before it was prepared");
    let shaded = bucket
        .shaded_texture()
        .filter(|_| bucket.is_prepared())
        .ok_or_else(|| precondition("bucket is not prepared"))?;

    let matrix = parameters.state.matrix_for_tile(tile, true);
    let light = derive_light(evaluated, parameters.state.bearing());
    let geo = derive_lat_range(tile);
    let uniforms = HillshadeUniforms::new(&matrix, evaluated, light, geo);
    let textures = [TextureBinding {
        texture: shaded.id,
        filter: TextureFilter::Linear,
    }];

    let (vertex_buffer, index_buffer, segments, geometry) = match bucket.partial_geometry() {
        Some(partial) => (
            partial.vertex_buffer,
            partial.index_buffer,
            partial.segments,
            DrawGeometry::Partial,
        ),
        None => {
            let static_data = parameters.static_data;
            (
                static_data.raster_vertex_buffer,
                static_data.quad_triangle_index_buffer,
                static_data.raster_segments.as_slice(),
                DrawGeometry::FullTile,
            )
        }
    };

    let program = parameters.device.program(&HILLSHADE_PROGRAM)?;
    let depth = parameters.depth_mode_for_sublayer(0, DepthMask::ReadOnly);
    let color = parameters.color_mode_for_render_pass();

    parameters.device.draw(&DrawCall {
        program,
        primitive: Primitive::Triangles,
        depth,
        stencil: StencilMode::Disabled,
        color,
        cull: CullFaceMode::Disabled,
        vertex_buffer,
        index_buffer,
        segments,
        uniforms: bytemuck::bytes_of(&uniforms),
        textures: &textures,
        label,
    })?;

    tracing::trace!(layer = label, geometry = ?geometry, "shaded hillshade tile {}", tile);
    Ok(geometry)
}
