//! The graphics device seam.
//!
//! The hillshade layer never talks to a GPU API directly. Everything it
//! needs - programs, offscreen targets, buffers, draws - goes through
//! [`GraphicsDevice`]. Handles are opaque ids owned by whoever holds them;
//! the device only frees what it is explicitly told to release.

use crate::error::GfxResult;

/// Opaque texture id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque framebuffer id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FramebufferId(pub u32);

/// Opaque vertex buffer id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexBufferId(pub u32);

/// Opaque index buffer id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexBufferId(pub u32);

/// Opaque compiled program id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square size.
    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// A GPU texture.
///
/// Not `Clone`: exactly one owner may hold a texture, and moving it is how
/// ownership is handed over.
#[derive(Debug, PartialEq, Eq)]
pub struct Texture {
    /// Device id
    pub id: TextureId,
    /// Pixel size
    pub size: Size,
}

/// A freshly created offscreen render target.
#[derive(Debug)]
pub struct OffscreenTarget {
    /// Framebuffer rendering into `texture`
    pub framebuffer: FramebufferId,
    /// Color attachment
    pub texture: Texture,
}

/// Primitive assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// Indexed triangle list
    Triangles,
}

impl Primitive {
    /// WGPU topology
    #[must_use]
    pub const fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// Depth comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthFunction {
    /// Never passes
    Never,
    /// Passes when closer
    Less,
    /// Passes when closer or equal
    LessEqual,
    /// Always passes
    Always,
}

/// Whether a draw writes depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthMask {
    /// Test only
    ReadOnly,
    /// Test and write
    ReadWrite,
}

/// Depth state of a draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthMode {
    /// Comparison
    pub func: DepthFunction,
    /// Write mask
    pub mask: DepthMask,
    /// Depth range `[near, far]`
    pub range: [f32; 2],
}

impl DepthMode {
    /// Depth testing off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            func: DepthFunction::Always,
            mask: DepthMask::ReadOnly,
            range: [0.0, 1.0],
        }
    }

    /// WGPU compare function
    #[must_use]
    pub const fn compare(&self) -> wgpu::CompareFunction {
        match self.func {
            DepthFunction::Never => wgpu::CompareFunction::Never,
            DepthFunction::Less => wgpu::CompareFunction::Less,
            DepthFunction::LessEqual => wgpu::CompareFunction::LessEqual,
            DepthFunction::Always => wgpu::CompareFunction::Always,
        }
    }
}

/// Stencil state of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilMode {
    /// Stencil testing off
    Disabled,
}

/// Blending of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Overwrite the destination
    Unblended,
    /// Premultiplied source-over
    AlphaBlended,
}

impl ColorMode {
    /// WGPU blend state, `None` when blending is off.
    #[must_use]
    pub const fn to_wgpu(self) -> Option<wgpu::BlendState> {
        match self {
            Self::Unblended => None,
            Self::AlphaBlended => Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
        }
    }
}

/// Face culling of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CullFaceMode {
    /// Both faces drawn
    Disabled,
}

impl CullFaceMode {
    /// WGPU cull face
    #[must_use]
    pub const fn to_wgpu(self) -> Option<wgpu::Face> {
        match self {
            Self::Disabled => None,
        }
    }
}

/// Sampler filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFilter {
    /// Nearest texel
    Nearest,
    /// Bilinear
    Linear,
}

impl TextureFilter {
    /// WGPU filter mode
    #[must_use]
    pub const fn to_wgpu(self) -> wgpu::FilterMode {
        match self {
            Self::Nearest => wgpu::FilterMode::Nearest,
            Self::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// A texture bound to a program sampler slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureBinding {
    /// Texture to sample
    pub texture: TextureId,
    /// Filter
    pub filter: TextureFilter,
}

/// A contiguous range of vertices and indices drawn together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    /// First vertex
    pub vertex_offset: usize,
    /// First index
    pub index_offset: usize,
    /// Vertex count
    pub vertex_length: usize,
    /// Index count
    pub index_length: usize,
}

impl Segment {
    /// Empty segment starting at the given offsets.
    #[must_use]
    pub const fn new(vertex_offset: usize, index_offset: usize) -> Self {
        Self {
            vertex_offset,
            index_offset,
            vertex_length: 0,
            index_length: 0,
        }
    }
}

/// Everything a device needs to compile a program.
#[derive(Clone, Copy, Debug)]
pub struct ProgramDescriptor {
    /// Program name, also the cache key
    pub name: &'static str,
    /// WGSL source
    pub source: &'static str,
    /// Vertex entry point
    pub vertex_entry: &'static str,
    /// Fragment entry point
    pub fragment_entry: &'static str,
    /// Vertex attributes the program reads
    pub attributes: &'static [wgpu::VertexAttribute],
    /// Size of the uniform block in bytes
    pub uniform_size: usize,
}

impl ProgramDescriptor {
    /// Number of vertex attributes bound by this program.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn attribute_count(&self) -> u32 {
        self.attributes.len() as u32
    }
}

/// One draw submission.
#[derive(Clone, Copy, Debug)]
pub struct DrawCall<'a> {
    /// Compiled program
    pub program: ProgramId,
    /// Primitive assembly
    pub primitive: Primitive,
    /// Depth state
    pub depth: DepthMode,
    /// Stencil state
    pub stencil: StencilMode,
    /// Blending
    pub color: ColorMode,
    /// Face culling
    pub cull: CullFaceMode,
    /// Vertex source
    pub vertex_buffer: VertexBufferId,
    /// Index source
    pub index_buffer: IndexBufferId,
    /// Ranges to draw
    pub segments: &'a [Segment],
    /// Uniform block bytes
    pub uniforms: &'a [u8],
    /// Sampler bindings
    pub textures: &'a [TextureBinding],
    /// Debug label, the layer id
    pub label: &'a str,
}

/// The graphics capability consumed by the hillshade layer.
///
/// Implementations submit asynchronously to the GPU; none of these calls
/// wait for the GPU to finish.
pub trait GraphicsDevice {
    /// Compiles (or fetches from cache) a program.
    ///
    /// # Errors
    /// Returns an error if compilation fails.
    fn program(&mut self, descriptor: &ProgramDescriptor) -> GfxResult<ProgramId>;

    /// Creates an offscreen color target of the given size.
    ///
    /// # Errors
    /// Returns an error if the target cannot be allocated.
    fn create_offscreen_target(&mut self, size: Size) -> GfxResult<OffscreenTarget>;

    /// Makes a framebuffer the destination of subsequent draws.
    ///
    /// # Errors
    /// Returns an error if the framebuffer cannot be bound.
    fn bind_framebuffer(&mut self, framebuffer: FramebufferId, size: Size) -> GfxResult<()>;

    /// Frees a framebuffer. Its color texture is not affected.
    fn release_framebuffer(&mut self, framebuffer: FramebufferId);

    /// Frees a texture.
    fn release_texture(&mut self, texture: Texture);

    /// Uploads vertex data.
    ///
    /// # Errors
    /// Returns an error if the buffer cannot be allocated.
    fn create_vertex_buffer(&mut self, bytes: &[u8]) -> GfxResult<VertexBufferId>;

    /// Uploads 16-bit indices.
    ///
    /// # Errors
    /// Returns an error if the buffer cannot be allocated.
    fn create_index_buffer(&mut self, indices: &[u16]) -> GfxResult<IndexBufferId>;

    /// Frees a vertex buffer.
    fn release_vertex_buffer(&mut self, buffer: VertexBufferId);

    /// Frees an index buffer.
    fn release_index_buffer(&mut self, buffer: IndexBufferId);

    /// Maximum vertex attributes a program may bind.
    fn max_vertex_attributes(&self) -> u32;

    /// Submits a draw.
    ///
    /// # Errors
    /// Returns an error if submission fails.
    fn draw(&mut self, call: &DrawCall<'_>) -> GfxResult<()>;
}
