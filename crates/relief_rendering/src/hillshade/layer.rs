//! The hillshade render layer: the entry point of the pass scheduler.
//!
//! Per frame the scheduler calls, in order:
//!
//! ```text
//! transition(now)          advance property transitions
//! evaluate(zoom, now)      -> passes this layer takes part in
//! render(Pass3D, tiles)    prepare every unprepared bucket
//! render(Translucent, ..)  shade every prepared bucket
//! ```
//!
//! Buckets not prepared by the time the translucent pass runs are skipped
//! and picked up on a later frame.

use serde::Deserialize;

use relief_shared::TERRAIN_RGB_MAXZOOM;

use super::bucket::HillshadeBucket;
use super::prepare::prepare_bucket;
use super::properties::{
    EvaluatedPaintProperties, HillshadePaint, HillshadePaintProperties, HillshadeStyleLayer,
    PropertyEvaluationParameters, TransitionParameters,
};
use super::shade::shade_bucket;
use super::shaders::{HILLSHADE_PREPARE_PROGRAM, HILLSHADE_PROGRAM};
use super::source::{DemSource, RenderTile};
use crate::error::HillshadeResult;
use crate::gfx::{GraphicsDevice, ProgramDescriptor};
use crate::pipeline::{HillshadeStats, PaintParameters, RenderPass, RenderPasses};

/// Layer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HillshadeLayerConfig {
    /// Max zoom assumed when the source does not report one
    pub fallback_max_zoom: u8,
    /// Warn when a program needs more vertex attributes than the device has
    pub check_renderability: bool,
}

impl Default for HillshadeLayerConfig {
    fn default() -> Self {
        Self {
            fallback_max_zoom: TERRAIN_RGB_MAXZOOM,
            check_renderability: true,
        }
    }
}

/// Renders a hillshade style layer over a set of DEM tiles.
#[derive(Debug)]
pub struct RenderHillshadeLayer<P: HillshadePaint = HillshadePaintProperties> {
    id: String,
    config: HillshadeLayerConfig,
    paint: P,
    evaluated: EvaluatedPaintProperties,
    passes: RenderPasses,
    has_render_failures: bool,
}

impl RenderHillshadeLayer<HillshadePaintProperties> {
    /// Creates a layer from its style declaration.
    #[must_use]
    pub fn from_style(layer: HillshadeStyleLayer, config: HillshadeLayerConfig) -> Self {
        Self::new(layer.id, layer.paint, config)
    }
}

impl<P: HillshadePaint> RenderHillshadeLayer<P> {
    /// Creates a layer. It takes part in no pass until the first
    /// [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn new(id: impl Into<String>, paint: P, config: HillshadeLayerConfig) -> Self {
        Self {
            id: id.into(),
            config,
            paint,
            evaluated: EvaluatedPaintProperties::default(),
            passes: RenderPasses::NONE,
            has_render_failures: false,
        }
    }

    /// Layer id, also the debug label of every draw.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &HillshadeLayerConfig {
        &self.config
    }

    /// Advances in-flight property transitions.
    pub fn transition(&mut self, parameters: &TransitionParameters) {
        self.paint.transition(parameters);
    }

    /// Re-evaluates paint properties and returns the passes to schedule.
    pub fn evaluate(&mut self, parameters: &PropertyEvaluationParameters) -> RenderPasses {
        self.evaluated = self.paint.evaluate(parameters);
        self.passes = if self.evaluated.exaggeration > 0.0 {
            RenderPass::Translucent | RenderPass::Pass3D
        } else {
            RenderPasses::NONE
        };
        self.passes
    }

    /// Returns true while any paint property is transitioning.
    #[must_use]
    pub fn has_transition(&self) -> bool {
        self.paint.has_transition()
    }

    /// Hillshade layers never cross-fade.
    #[must_use]
    pub const fn has_crossfade(&self) -> bool {
        false
    }

    /// Passes from the last evaluation.
    #[must_use]
    pub const fn passes(&self) -> RenderPasses {
        self.passes
    }

    /// Values from the last evaluation.
    #[must_use]
    pub const fn evaluated(&self) -> &EvaluatedPaintProperties {
        &self.evaluated
    }

    /// Renders one pass over the visible tiles.
    ///
    /// `source` is the elevation source of the layer, if the tile pyramid
    /// has one.
    ///
    /// # Errors
    /// The first device failure aborts the pass and is returned as is.
    pub fn render<D: GraphicsDevice + ?Sized>(
        &mut self,
        parameters: &mut PaintParameters<'_, D>,
        source: Option<&dyn DemSource>,
        tiles: &mut [RenderTile<'_>],
    ) -> HillshadeResult<HillshadeStats> {
        let mut stats = HillshadeStats::default();
        let pass = parameters.pass;
        if !matches!(pass, RenderPass::Translucent | RenderPass::Pass3D) || !self.passes.contains(pass) {
            return Ok(stats);
        }

        let max_zoom = source
            .and_then(|source| source.max_zoom())
            .unwrap_or(self.config.fallback_max_zoom);

        for tile in tiles.iter_mut() {
            let Some(bucket) = tile.bucket.as_deref_mut() else {
                stats.skipped_missing_bucket += 1;
                tracing::trace!(layer = %self.id, "tile {} has no hillshade bucket", tile.id);
                continue;
            };
            if !bucket.has_data() {
                stats.skipped_no_data += 1;
                tracing::trace!(layer = %self.id, "tile {} has no elevation data", tile.id);
                continue;
            }

            match pass {
                RenderPass::Pass3D => {
                    if bucket.is_prepared() {
                        continue;
                    }
                    self.check_renderability(&*parameters.device, &HILLSHADE_PREPARE_PROGRAM);
                    prepare_bucket(parameters, &tile.id, bucket, max_zoom, &self.id)?;
                    stats.prepared += 1;
                    stats.draw_calls += 1;
                }
                RenderPass::Translucent => {
                    if !bucket.is_prepared() {
                        stats.deferred += 1;
                        tracing::trace!(layer = %self.id, "tile {} not prepared yet", tile.id);
                        continue;
                    }
                    Self::upload_geometry(parameters, bucket)?;
                    self.check_renderability(&*parameters.device, &HILLSHADE_PROGRAM);
                    shade_bucket(parameters, &tile.id, bucket, &self.evaluated, &self.id)?;
                    stats.shaded += 1;
                    stats.draw_calls += 1;
                }
                RenderPass::Opaque => {}
            }
        }

        tracing::debug!(
            layer = %self.id,
            pass = %pass,
            prepared = stats.prepared,
            shaded = stats.shaded,
            skipped = stats.skipped(),
            "hillshade pass complete"
        );
        Ok(stats)
    }

    fn upload_geometry<D: GraphicsDevice + ?Sized>(
        parameters: &mut PaintParameters<'_, D>,
        bucket: &mut HillshadeBucket,
    ) -> HillshadeResult<()> {
        if bucket.needs_upload() {
            bucket.upload(&mut *parameters.device)?;
        }
        Ok(())
    }

    /// Warns once per layer if `program` binds more attributes than the
    /// device supports. The draw is still attempted.
    fn check_renderability<D: GraphicsDevice + ?Sized>(&mut self, device: &D, program: &ProgramDescriptor) {
        if !self.config.check_renderability || self.has_render_failures {
            return;
        }
        let required = program.attribute_count();
        let available = device.max_vertex_attributes();
        if required > available {
            tracing::warn!(
                layer = %self.id,
                "program {} uses {} vertex attributes but the device supports {}",
                program.name,
                required,
                available
            );
            self.has_render_failures = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hillshade::IlluminationAnchor;

    fn layer(exaggeration: f32) -> RenderHillshadeLayer {
        let paint = HillshadePaintProperties {
            exaggeration,
            illumination_anchor: IlluminationAnchor::Map,
            ..Default::default()
        };
        RenderHillshadeLayer::new("hillshade", paint, HillshadeLayerConfig::default())
    }

    #[test]
    fn test_no_passes_before_evaluation() {
        let layer = layer(0.5);
        assert!(layer.passes().is_empty());
        assert!(!layer.has_crossfade());
        assert!(!layer.has_transition());
    }

    #[test]
    fn test_active_layer_takes_both_passes() {
        let mut layer = layer(0.5);
        let passes = layer.evaluate(&PropertyEvaluationParameters::default());
        assert!(passes.contains(RenderPass::Pass3D));
        assert!(passes.contains(RenderPass::Translucent));
        assert!(!passes.contains(RenderPass::Opaque));
        assert_eq!(layer.evaluated().exaggeration, 0.5);
    }

    #[test]
    fn test_zero_exaggeration_disables_layer() {
        let mut layer = layer(0.0);
        assert!(layer.evaluate(&PropertyEvaluationParameters::default()).is_empty());
    }

    #[test]
    fn test_config_defaults_and_overrides() {
        let config = HillshadeLayerConfig::default();
        assert_eq!(config.fallback_max_zoom, 15);
        assert!(config.check_renderability);

        let config: HillshadeLayerConfig = serde_json::from_str(r#"{"fallback_max_zoom": 12}"#).unwrap();
        assert_eq!(config.fallback_max_zoom, 12);
        assert!(config.check_renderability);
    }

    #[test]
    fn test_from_style_uses_layer_id() {
        let style = HillshadeStyleLayer::from_json(r#"{"id": "relief", "type": "hillshade", "source": "dem"}"#).unwrap();
        let layer = RenderHillshadeLayer::from_style(style, HillshadeLayerConfig::default());
        assert_eq!(layer.id(), "relief");
    }
}
