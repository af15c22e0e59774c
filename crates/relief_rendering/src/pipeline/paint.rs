//! Per-pass draw context handed to layers by the scheduler.

use relief_shared::{Mat4, UnwrappedTileId};

use super::RenderPass;
use crate::gfx::{ColorMode, DepthFunction, DepthMask, DepthMode, GraphicsDevice, RenderStaticData};

/// Depth units separating two sublayers.
pub const DEPTH_EPSILON: f32 = 1.0 / (1 << 16) as f32;

/// Sublayers reserved per style layer.
pub const NUM_SUBLAYERS: u32 = 3;

/// Camera state supplied by the viewport collaborator.
pub trait ViewportState {
    /// Map bearing in radians, clockwise from north.
    fn bearing(&self) -> f64;

    /// Tile-local to clip-space matrix.
    ///
    /// `aligned` snaps the matrix to the pixel grid of the tile pyramid so
    /// neighboring tiles meet without seams.
    fn matrix_for_tile(&self, tile: &UnwrappedTileId, aligned: bool) -> Mat4;
}

/// Everything a layer needs to issue draws for one render pass.
pub struct PaintParameters<'a, D: GraphicsDevice + ?Sized> {
    /// Device receiving the draws
    pub device: &'a mut D,
    /// Pass being rendered
    pub pass: RenderPass,
    /// Camera
    pub state: &'a dyn ViewportState,
    /// Shared full-tile geometry
    pub static_data: &'a RenderStaticData,
    /// Index of the layer being drawn, 0 at the bottom
    pub layer_index: u32,
    /// Total number of style layers
    pub layer_count: u32,
}

impl<D: GraphicsDevice + ?Sized> PaintParameters<'_, D> {
    /// Depth state placing a sublayer of the current layer in the shared
    /// depth buffer.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn depth_mode_for_sublayer(&self, n: u32, mask: DepthMask) -> DepthMode {
        let depth_range_size =
            1.0 - (self.layer_count + 2) as f32 * NUM_SUBLAYERS as f32 * DEPTH_EPSILON;
        let depth = depth_range_size
            + ((1 + self.layer_index) * NUM_SUBLAYERS + n) as f32 * DEPTH_EPSILON;
        DepthMode {
            func: DepthFunction::LessEqual,
            mask,
            range: [depth, depth],
        }
    }

    /// Blending for the current pass.
    #[must_use]
    pub fn color_mode_for_render_pass(&self) -> ColorMode {
        match self.pass {
            RenderPass::Translucent => ColorMode::AlphaBlended,
            RenderPass::Opaque | RenderPass::Pass3D => ColorMode::Unblended,
        }
    }
}
