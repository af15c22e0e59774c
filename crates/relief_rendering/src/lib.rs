//! # Relief Rendering
//!
//! Hillshade (shaded relief) layer for tiled raster DEM maps.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PASS SCHEDULER (external)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  transition → evaluate → render(Pass3D) → render(Translucent)│
//! │                              ↓                  ↓            │
//! │                     prepare_bucket        shade_bucket       │
//! │                              ↓                  ↓            │
//! │                   OffscreenTexture        framebuffer        │
//! │                              ↓                  ↓            │
//! │                        GraphicsDevice (external)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - The layer never decides tile visibility or loads elevation data
//! - Every GPU resource has exactly one owner
//! - Device failures propagate; missing data is skipped, not an error

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod gfx;
pub mod hillshade;
pub mod pipeline;

pub use error::{GfxError, GfxResult, HillshadeError, HillshadeResult};
pub use gfx::{GraphicsDevice, OffscreenTexture, RasterVertex, RenderStaticData, Texture};
pub use hillshade::{
    DemData, DemEncoding, DemSource, EvaluatedPaintProperties, HillshadeBucket,
    HillshadeLayerConfig, HillshadePaint, HillshadePaintProperties, HillshadeStyleLayer,
    IlluminationAnchor, RenderHillshadeLayer, RenderTile,
};
pub use pipeline::{HillshadeStats, PaintParameters, RenderPass, RenderPasses, ViewportState};
