//! What the tile pyramid hands the layer each pass.

use relief_shared::UnwrappedTileId;

use super::bucket::HillshadeBucket;

/// Elevation source capability.
pub trait DemSource {
    /// Native max zoom, or `None` if the source does not report one.
    fn max_zoom(&self) -> Option<u8>;
}

/// A visible tile and its bucket for this layer, if one was built.
#[derive(Debug)]
pub struct RenderTile<'a> {
    /// Tile position
    pub id: UnwrappedTileId,
    /// Render data, owned by the tile
    pub bucket: Option<&'a mut HillshadeBucket>,
}

impl<'a> RenderTile<'a> {
    /// Creates a render tile.
    #[must_use]
    pub fn new(id: UnwrappedTileId, bucket: Option<&'a mut HillshadeBucket>) -> Self {
        Self { id, bucket }
    }
}
