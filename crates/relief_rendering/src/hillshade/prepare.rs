//! Prepare pass: DEM texture in, shaded derivative texture out.
//!
//! Runs once per bucket. The offscreen target lives only for the duration
//! of [`prepare_bucket`]; its color texture is moved into the bucket, and
//! everything else goes back to the device on every exit path.

use relief_shared::UnwrappedTileId;

use super::bucket::HillshadeBucket;
use super::shaders::HILLSHADE_PREPARE_PROGRAM;
use super::uniforms::{prepare_matrix, HillshadePrepareUniforms};
use crate::error::{HillshadeError, HillshadeResult};
use crate::gfx::{
    CullFaceMode, DepthMode, DrawCall, GraphicsDevice, OffscreenTexture, Primitive, Size,
    StencilMode, TextureBinding, TextureFilter,
};
use crate::pipeline::{PaintParameters, RenderPass};

/// Renders the shaded texture of `bucket` and marks it prepared.
///
/// `max_zoom` is the native max zoom of the elevation source.
///
/// # Errors
/// Device failures propagate unchanged. Calling this on a bucket without
/// data, on a prepared bucket, or outside [`RenderPass::Pass3D`] is a
/// programming error: it asserts in debug builds and returns
/// [`HillshadeError::Precondition`] otherwise.
#[allow(clippy::cast_precision_loss)]
pub fn prepare_bucket<D: GraphicsDevice + ?Sized>(
    parameters: &mut PaintParameters<'_, D>,
    tile: &UnwrappedTileId,
    bucket: &mut HillshadeBucket,
    max_zoom: u8,
    label: &str,
) -> HillshadeResult<()> {
    let precondition = |reason| HillshadeError::Precondition { tile: *tile, reason };

    debug_assert_eq!(parameters.pass, RenderPass::Pass3D, "prepare outside the 3D pass");
    if parameters.pass != RenderPass::Pass3D {
        return Err(precondition("prepare requires the 3d pass"));
    }
    debug_assert!(!bucket.is_prepared(), "tile {tile} prepared twice");
    if bucket.is_prepared() {
        return Err(precondition("bucket is already prepared"));
    }
    debug_assert!(bucket.has_data(), "tile {tile} prepared without elevation data");
    let dem = bucket.dem().ok_or_else(|| precondition("bucket has no elevation data"))?;

    let dim = dem.dim();
    let stride = dem.stride() as f32;
    let uniforms = HillshadePrepareUniforms {
        matrix: prepare_matrix().to_cols_f32(),
        dimension: [stride, stride],
        zoom: f32::from(tile.zoom()),
        maxzoom: f32::from(max_zoom),
        unpack: dem.encoding().unpack(),
    };
    let textures = [TextureBinding {
        texture: dem.texture().id,
        filter: TextureFilter::Nearest,
    }];

    let program = parameters.device.program(&HILLSHADE_PREPARE_PROGRAM)?;
    let color = parameters.color_mode_for_render_pass();
    let static_data = parameters.static_data;

    let mut target = OffscreenTexture::new(&mut *parameters.device, Size::square(dim))?;
    target.bind()?;
    target.device().draw(&DrawCall {
        program,
        primitive: Primitive::Triangles,
        depth: DepthMode::disabled(),
        stencil: StencilMode::Disabled,
        color,
        cull: CullFaceMode::Disabled,
        vertex_buffer: static_data.raster_vertex_buffer,
        index_buffer: static_data.quad_triangle_index_buffer,
        segments: &static_data.raster_segments,
        uniforms: bytemuck::bytes_of(&uniforms),
        textures: &textures,
        label,
    })?;
    let texture = target.into_texture()?;

    if let Some(stale) = bucket.attach_shaded_texture(texture) {
        parameters.device.release_texture(stale);
    }
    bucket.mark_prepared();

    tracing::debug!(layer = label, "prepared hillshade tile {} ({}px)", tile, dim);
    Ok(())
}
