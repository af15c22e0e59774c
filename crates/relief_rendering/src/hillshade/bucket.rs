//! Per-tile hillshade render data.
//!
//! A bucket holds the uploaded DEM texture, the shaded texture produced by
//! the prepare pass, and optional partial geometry limiting the shade draw
//! to the part of the tile no other visible tile covers.
//!
//! The bucket is owned by the tile collaborator. It is never reset: an
//! invalidated tile gets a new bucket.

use relief_shared::{full_tile_mask, TileMask, DEM_BORDER, EXTENT};
use serde::{Deserialize, Serialize};

use crate::error::{GfxResult, HillshadeError, HillshadeResult};
use crate::gfx::{GraphicsDevice, IndexBufferId, RasterVertex, Segment, Texture, VertexBufferId};

/// Vertices added per masked sub-tile.
const QUAD_VERTICES: usize = 4;

/// Preparation state. The only edge is `Unprepared -> Prepared`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketState {
    /// Waiting for the prepare pass
    Unprepared,
    /// Shaded texture attached; ready for the shade pass
    Prepared,
}

/// How elevation is packed into the RGB channels of a DEM image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemEncoding {
    /// `-10000 + (R * 65536 + G * 256 + B) * 0.1`
    #[default]
    Mapbox,
    /// `(R * 256 + G + B / 256) - 32768`
    Terrarium,
}

impl DemEncoding {
    /// Weights applied to `[R, G, B, -1]` (channels in `0..=255`) to get
    /// meters.
    #[must_use]
    pub const fn unpack(self) -> [f32; 4] {
        match self {
            Self::Mapbox => [6553.6, 25.6, 0.1, 10000.0],
            Self::Terrarium => [256.0, 1.0, 1.0 / 256.0, 32768.0],
        }
    }
}

/// An uploaded DEM image with its border.
#[derive(Debug)]
pub struct DemData {
    dim: u32,
    stride: u32,
    encoding: DemEncoding,
    texture: Texture,
}

impl DemData {
    /// Wraps an uploaded DEM texture.
    ///
    /// `dim` is the tile dimension without border; the texture must be
    /// `dim + 2 * DEM_BORDER` on each side.
    ///
    /// # Errors
    /// Returns [`HillshadeError::InvalidDem`] if the texture size disagrees.
    pub fn new(dim: u32, encoding: DemEncoding, texture: Texture) -> HillshadeResult<Self> {
        let stride = dim + 2 * u32::from(DEM_BORDER);
        let size = texture.size;
        if size.width != stride || size.height != stride {
            return Err(HillshadeError::InvalidDem {
                expected: stride,
                actual: size.width,
            });
        }
        Ok(Self {
            dim,
            stride,
            encoding,
            texture,
        })
    }

    /// Tile dimension, border excluded.
    #[must_use]
    pub const fn dim(&self) -> u32 {
        self.dim
    }

    /// Row stride, border included.
    #[must_use]
    pub const fn stride(&self) -> u32 {
        self.stride
    }

    /// Channel packing.
    #[must_use]
    pub const fn encoding(&self) -> DemEncoding {
        self.encoding
    }

    /// The DEM texture.
    #[must_use]
    pub const fn texture(&self) -> &Texture {
        &self.texture
    }
}

/// Uploaded partial geometry, ready to draw.
#[derive(Clone, Copy, Debug)]
pub struct PartialGeometry<'a> {
    /// Vertex source
    pub vertex_buffer: VertexBufferId,
    /// Index source
    pub index_buffer: IndexBufferId,
    /// Ranges to draw
    pub segments: &'a [Segment],
}

/// Hillshade render data of one tile.
#[derive(Debug)]
pub struct HillshadeBucket {
    dem: Option<DemData>,
    shaded_texture: Option<Texture>,
    state: BucketState,
    mask: TileMask,
    vertices: Vec<RasterVertex>,
    indices: Vec<u16>,
    segments: Vec<Segment>,
    vertex_buffer: Option<VertexBufferId>,
    index_buffer: Option<IndexBufferId>,
    uploaded: bool,
}

impl HillshadeBucket {
    /// Creates an unprepared bucket. `dem` is `None` when the source has
    /// no data for the tile.
    #[must_use]
    pub fn new(dem: Option<DemData>) -> Self {
        Self {
            dem,
            shaded_texture: None,
            state: BucketState::Unprepared,
            mask: full_tile_mask(),
            vertices: Vec::new(),
            indices: Vec::new(),
            segments: Vec::new(),
            vertex_buffer: None,
            index_buffer: None,
            uploaded: true,
        }
    }

    /// Returns true if an elevation texture is present.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.dem.is_some()
    }

    /// Returns true once the prepare pass has run.
    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.state == BucketState::Prepared
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BucketState {
        self.state
    }

    /// The elevation data, if any.
    #[must_use]
    pub const fn dem(&self) -> Option<&DemData> {
        self.dem.as_ref()
    }

    /// The prepared texture, present once prepared.
    #[must_use]
    pub const fn shaded_texture(&self) -> Option<&Texture> {
        self.shaded_texture.as_ref()
    }

    /// Takes ownership of the texture produced by the prepare pass.
    ///
    /// Must happen once per bucket. A texture attached earlier is handed
    /// back so the caller can release it.
    #[must_use]
    pub fn attach_shaded_texture(&mut self, texture: Texture) -> Option<Texture> {
        debug_assert!(
            self.shaded_texture.is_none(),
            "shaded texture attached twice"
        );
        self.shaded_texture.replace(texture)
    }

    /// Moves the bucket to [`BucketState::Prepared`].
    pub fn mark_prepared(&mut self) {
        debug_assert!(
            self.shaded_texture.is_some(),
            "bucket marked prepared without a shaded texture"
        );
        self.state = BucketState::Prepared;
    }

    /// The mask the partial geometry was built from.
    #[must_use]
    pub const fn mask(&self) -> &TileMask {
        &self.mask
    }

    /// Rebuilds the partial geometry for a new mask.
    ///
    /// The full mask clears the geometry so the shared full-tile quad is
    /// used. Any other mask produces one quad per masked sub-tile, and at
    /// least one (possibly empty) segment so an empty mask still uploads
    /// and draws nothing.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn set_mask(&mut self, mask: TileMask) {
        if self.mask == mask {
            return;
        }
        self.mask = mask;
        self.vertices.clear();
        self.indices.clear();
        self.segments.clear();
        self.uploaded = false;

        if self.mask == full_tile_mask() {
            return;
        }

        self.segments.push(Segment::new(0, 0));

        for id in &self.mask {
            let vertex_extent = EXTENT >> id.z;
            let tl = [id.x as i32 * vertex_extent, id.y as i32 * vertex_extent];
            let br = [tl[0] + vertex_extent, tl[1] + vertex_extent];

            let needs_split = self
                .segments
                .last()
                .map_or(true, |segment| segment.vertex_length + QUAD_VERTICES > usize::from(u16::MAX));
            if needs_split {
                self.segments.push(Segment::new(self.vertices.len(), self.indices.len()));
            }

            for [x, y] in [[tl[0], tl[1]], [br[0], tl[1]], [tl[0], br[1]], [br[0], br[1]]] {
                self.vertices.push(RasterVertex::new([x as i16, y as i16], [x as u16, y as u16]));
            }

            if let Some(segment) = self.segments.last_mut() {
                let offset = segment.vertex_length as u16;
                self.indices.extend_from_slice(&[
                    offset,
                    offset + 1,
                    offset + 2,
                    offset + 1,
                    offset + 2,
                    offset + 3,
                ]);
                segment.vertex_length += QUAD_VERTICES;
                segment.index_length += 6;
            }
        }
    }

    /// CPU-side partial vertices.
    #[must_use]
    pub fn vertices(&self) -> &[RasterVertex] {
        &self.vertices
    }

    /// CPU-side partial indices.
    #[must_use]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Partial segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the partial geometry changed since the last upload.
    #[must_use]
    pub const fn needs_upload(&self) -> bool {
        !self.uploaded
    }

    /// Uploads pending partial geometry, replacing any previous buffers.
    ///
    /// # Errors
    /// Returns the device error if a buffer cannot be allocated.
    pub fn upload<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D) -> GfxResult<()> {
        if self.uploaded {
            return Ok(());
        }
        self.release_geometry(device);

        if !self.segments.is_empty() {
            self.vertex_buffer = Some(device.create_vertex_buffer(bytemuck::cast_slice(&self.vertices))?);
            self.index_buffer = Some(device.create_index_buffer(&self.indices)?);
        }
        self.uploaded = true;
        Ok(())
    }

    /// Uploaded partial geometry, or `None` to draw the full tile.
    ///
    /// Also `None` while a mask change is pending upload: the old buffers no
    /// longer match the current segments.
    #[must_use]
    pub fn partial_geometry(&self) -> Option<PartialGeometry<'_>> {
        if !self.uploaded {
            return None;
        }
        match (self.vertex_buffer, self.index_buffer) {
            (Some(vertex_buffer), Some(index_buffer)) if !self.segments.is_empty() => Some(PartialGeometry {
                vertex_buffer,
                index_buffer,
                segments: &self.segments,
            }),
            _ => None,
        }
    }

    /// Frees every GPU resource the bucket owns.
    pub fn release<D: GraphicsDevice + ?Sized>(mut self, device: &mut D) {
        self.release_geometry(device);
        if let Some(texture) = self.shaded_texture.take() {
            device.release_texture(texture);
        }
        if let Some(dem) = self.dem.take() {
            device.release_texture(dem.texture);
        }
    }

    fn release_geometry<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D) {
        if let Some(buffer) = self.vertex_buffer.take() {
            device.release_vertex_buffer(buffer);
        }
        if let Some(buffer) = self.index_buffer.take() {
            device.release_index_buffer(buffer);
        }
    }
}
