//! Shaded relief over raster DEM tiles.
//!
//! ## Two passes
//!
//! ```text
//! Pass3D       DEM texture --Sobel--> offscreen target --move--> bucket
//! Translucent  bucket texture + light + latitude range --> framebuffer
//! ```
//!
//! The first pass runs once per bucket; the result is cached for the
//! bucket's lifetime. The second runs every frame.

mod bucket;
mod layer;
mod prepare;
mod properties;
mod shade;
mod shaders;
mod source;
mod uniforms;

pub use bucket::{BucketState, DemData, DemEncoding, HillshadeBucket, PartialGeometry};
pub use layer::{HillshadeLayerConfig, RenderHillshadeLayer};
pub use prepare::prepare_bucket;
pub use properties::{
    EvaluatedPaintProperties, HillshadePaint, HillshadePaintProperties, HillshadeStyleLayer,
    IlluminationAnchor, PropertyEvaluationParameters, TransitionOptions, TransitionParameters,
};
pub use shade::{shade_bucket, DrawGeometry};
pub use shaders::{HILLSHADE_PREPARE_PROGRAM, HILLSHADE_PROGRAM};
pub use source::{DemSource, RenderTile};
pub use uniforms::{
    derive_lat_range, derive_light, prepare_matrix, GeoUniforms, HillshadePrepareUniforms,
    HillshadeUniforms, LightingUniforms,
};
