//! Shared fixtures: a device that records instead of rendering, and a
//! fixed camera.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use relief_rendering::error::{GfxError, GfxResult};
use relief_rendering::gfx::{
    ColorMode, DepthMode, DrawCall, FramebufferId, GraphicsDevice, IndexBufferId, OffscreenTarget,
    ProgramDescriptor, ProgramId, Segment, Size, Texture, TextureBinding, TextureId,
    VertexBufferId,
};
use relief_rendering::hillshade::{DemData, DemEncoding, DemSource, HillshadeBucket};
use relief_rendering::{
    HillshadeLayerConfig, HillshadePaintProperties, HillshadeResult, HillshadeStats,
    IlluminationAnchor, PaintParameters, RenderHillshadeLayer, RenderPass, RenderStaticData,
    RenderTile, ViewportState,
};
use relief_shared::{Mat4, UnwrappedTileId};

/// A draw as the device saw it.
#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub program: &'static str,
    pub target: Option<FramebufferId>,
    pub color: ColorMode,
    pub depth: DepthMode,
    pub vertex_buffer: VertexBufferId,
    pub index_buffer: IndexBufferId,
    pub segments: Vec<Segment>,
    pub uniforms: Vec<u8>,
    pub textures: Vec<TextureBinding>,
    pub label: String,
}

impl DrawRecord {
    /// Reads the uniform block back.
    pub fn uniforms<T: bytemuck::Pod>(&self) -> T {
        bytemuck::pod_read_unaligned(&self.uniforms)
    }
}

/// Records every call; fails on request.
#[derive(Debug)]
pub struct RecordingDevice {
    next_id: u32,
    programs: HashMap<&'static str, ProgramId>,
    program_names: HashMap<ProgramId, &'static str>,
    bound: Option<FramebufferId>,
    pub draws: Vec<DrawRecord>,
    pub offscreen_targets: Vec<(FramebufferId, TextureId, Size)>,
    pub live_framebuffers: HashSet<FramebufferId>,
    pub live_textures: HashSet<TextureId>,
    pub live_vertex_buffers: HashSet<VertexBufferId>,
    pub live_index_buffers: HashSet<IndexBufferId>,
    pub max_attributes: u32,
    pub fail_draws: bool,
    pub fail_offscreen: bool,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self {
            next_id: 1,
            programs: HashMap::new(),
            program_names: HashMap::new(),
            bound: None,
            draws: Vec::new(),
            offscreen_targets: Vec::new(),
            live_framebuffers: HashSet::new(),
            live_textures: HashSet::new(),
            live_vertex_buffers: HashSet::new(),
            live_index_buffers: HashSet::new(),
            max_attributes: 16,
            fail_draws: false,
            fail_offscreen: false,
        }
    }
}

impl RecordingDevice {
    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Stands in for a DEM upload done by the tile collaborator.
    pub fn create_texture(&mut self, size: Size) -> Texture {
        let id = TextureId(self.next());
        self.live_textures.insert(id);
        Texture { id, size }
    }

    pub fn draws_of(&self, program: &str) -> Vec<&DrawRecord> {
        self.draws.iter().filter(|draw| draw.program == program).collect()
    }
}

impl GraphicsDevice for RecordingDevice {
    fn program(&mut self, descriptor: &ProgramDescriptor) -> GfxResult<ProgramId> {
        if let Some(id) = self.programs.get(descriptor.name) {
            return Ok(*id);
        }
        let id = ProgramId(self.next());
        self.programs.insert(descriptor.name, id);
        self.program_names.insert(id, descriptor.name);
        Ok(id)
    }

    fn create_offscreen_target(&mut self, size: Size) -> GfxResult<OffscreenTarget> {
        if self.fail_offscreen {
            return Err(GfxError::OffscreenTarget("out of memory".to_owned()));
        }
        let framebuffer = FramebufferId(self.next());
        let texture = self.create_texture(size);
        self.live_framebuffers.insert(framebuffer);
        self.offscreen_targets.push((framebuffer, texture.id, size));
        Ok(OffscreenTarget { framebuffer, texture })
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferId, _size: Size) -> GfxResult<()> {
        assert!(self.live_framebuffers.contains(&framebuffer), "bound a released framebuffer");
        self.bound = Some(framebuffer);
        Ok(())
    }

    fn release_framebuffer(&mut self, framebuffer: FramebufferId) {
        assert!(self.live_framebuffers.remove(&framebuffer), "framebuffer released twice");
        if self.bound == Some(framebuffer) {
            self.bound = None;
        }
    }

    fn release_texture(&mut self, texture: Texture) {
        assert!(self.live_textures.remove(&texture.id), "texture released twice");
    }

    fn create_vertex_buffer(&mut self, _bytes: &[u8]) -> GfxResult<VertexBufferId> {
        let id = VertexBufferId(self.next());
        self.live_vertex_buffers.insert(id);
        Ok(id)
    }

    fn create_index_buffer(&mut self, _indices: &[u16]) -> GfxResult<IndexBufferId> {
        let id = IndexBufferId(self.next());
        self.live_index_buffers.insert(id);
        Ok(id)
    }

    fn release_vertex_buffer(&mut self, buffer: VertexBufferId) {
        assert!(self.live_vertex_buffers.remove(&buffer), "vertex buffer released twice");
    }

    fn release_index_buffer(&mut self, buffer: IndexBufferId) {
        assert!(self.live_index_buffers.remove(&buffer), "index buffer released twice");
    }

    fn max_vertex_attributes(&self) -> u32 {
        self.max_attributes
    }

    fn draw(&mut self, call: &DrawCall<'_>) -> GfxResult<()> {
        if self.fail_draws {
            return Err(GfxError::Draw {
                label: call.label.to_owned(),
                reason: "device rejected draw".to_owned(),
            });
        }
        let program = self.program_names.get(&call.program).copied().unwrap_or("unknown");
        self.draws.push(DrawRecord {
            program,
            target: self.bound,
            color: call.color,
            depth: call.depth,
            vertex_buffer: call.vertex_buffer,
            index_buffer: call.index_buffer,
            segments: call.segments.to_vec(),
            uniforms: call.uniforms.to_vec(),
            textures: call.textures.to_vec(),
            label: call.label.to_owned(),
        });
        Ok(())
    }
}

/// Camera with a fixed bearing; counts aligned matrix requests.
#[derive(Debug, Default)]
pub struct FixedViewport {
    pub bearing: f64,
    pub aligned_requests: Cell<u32>,
}

impl ViewportState for FixedViewport {
    fn bearing(&self) -> f64 {
        self.bearing
    }

    fn matrix_for_tile(&self, _tile: &UnwrappedTileId, aligned: bool) -> Mat4 {
        if aligned {
            self.aligned_requests.set(self.aligned_requests.get() + 1);
        }
        Mat4::IDENTITY
    }
}

/// Elevation source with a known max zoom.
pub struct FixedSource(pub Option<u8>);

impl DemSource for FixedSource {
    fn max_zoom(&self) -> Option<u8> {
        self.0
    }
}

/// A bucket with a `dim` x `dim` Mapbox-encoded DEM.
pub fn dem_bucket(device: &mut RecordingDevice, dim: u32) -> HillshadeBucket {
    let texture = device.create_texture(Size::square(dim + 2));
    let dem = DemData::new(dim, DemEncoding::Mapbox, texture).expect("padded DEM");
    HillshadeBucket::new(Some(dem))
}

/// An evaluated layer with the light anchored to the map.
pub fn evaluated_layer(exaggeration: f32) -> RenderHillshadeLayer {
    let paint = HillshadePaintProperties {
        exaggeration,
        illumination_direction: 315.0,
        illumination_anchor: IlluminationAnchor::Map,
        ..Default::default()
    };
    let mut layer = RenderHillshadeLayer::new("hillshade", paint, HillshadeLayerConfig::default());
    layer.evaluate(&Default::default());
    layer
}

/// Owns everything a pass borrows.
pub struct Harness {
    pub device: RecordingDevice,
    pub static_data: RenderStaticData,
    pub viewport: FixedViewport,
}

impl Harness {
    pub fn new() -> Self {
        let mut device = RecordingDevice::default();
        let static_data = RenderStaticData::upload(&mut device).expect("static data");
        Self {
            device,
            static_data,
            viewport: FixedViewport::default(),
        }
    }

    pub fn run(
        &mut self,
        layer: &mut RenderHillshadeLayer,
        pass: RenderPass,
        source: Option<&dyn DemSource>,
        tiles: &mut [RenderTile<'_>],
    ) -> HillshadeResult<HillshadeStats> {
        let mut parameters = PaintParameters {
            device: &mut self.device,
            pass,
            state: &self.viewport,
            static_data: &self.static_data,
            layer_index: 0,
            layer_count: 1,
        };
        layer.render(&mut parameters, source, tiles)
    }

    /// Pass3D then Translucent, as the scheduler runs a frame.
    pub fn frame(
        &mut self,
        layer: &mut RenderHillshadeLayer,
        tiles: &mut [RenderTile<'_>],
    ) -> HillshadeResult<HillshadeStats> {
        let mut stats = self.run(layer, RenderPass::Pass3D, None, tiles)?;
        stats.accumulate(&self.run(layer, RenderPass::Translucent, None, tiles)?);
        Ok(stats)
    }
}

pub fn tile(z: u8, x: i64, y: u32) -> UnwrappedTileId {
    UnwrappedTileId::new(z, x, y)
}
