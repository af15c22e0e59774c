//! Hillshade paint properties and the seam to the property system.
//!
//! Transitions and easing live in the external property system. The layer
//! only ever reads an [`EvaluatedPaintProperties`] snapshot.

use std::time::Duration;

use relief_shared::Color;
use serde::{Deserialize, Serialize};

use crate::error::{HillshadeError, HillshadeResult};

/// What the illumination direction is measured against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IlluminationAnchor {
    /// Fixed to map north; rotates on screen with the map.
    Map,
    /// Fixed to the screen; stays put while the map rotates.
    #[default]
    Viewport,
}

/// Paint properties after evaluation for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvaluatedPaintProperties {
    /// Shading intensity, `0` disables the layer.
    pub exaggeration: f32,
    /// Sun azimuth in degrees, `[0, 360)`.
    pub illumination_direction: f32,
    /// Reference frame of `illumination_direction`.
    pub illumination_anchor: IlluminationAnchor,
    /// Color of slopes facing the light.
    pub highlight_color: Color,
    /// Color of slopes facing away from the light.
    pub shadow_color: Color,
    /// Color of steep terrain regardless of light.
    pub accent_color: Color,
}

impl Default for EvaluatedPaintProperties {
    fn default() -> Self {
        HillshadePaintProperties::default().evaluated()
    }
}

/// Transition options applied when a property value changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionOptions {
    /// Transition length
    pub duration: Option<Duration>,
    /// Delay before the transition starts
    pub delay: Option<Duration>,
}

/// Input of a transition tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionParameters {
    /// Current time
    pub now: Duration,
    /// Style-wide transition defaults
    pub transition: TransitionOptions,
}

/// Input of an evaluation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PropertyEvaluationParameters {
    /// Camera zoom
    pub zoom: f32,
    /// Current time
    pub now: Duration,
}

/// The property system as seen by the hillshade layer.
pub trait HillshadePaint {
    /// Advances in-flight transitions. No GPU work.
    fn transition(&mut self, parameters: &TransitionParameters);

    /// Produces the values to draw with.
    fn evaluate(&self, parameters: &PropertyEvaluationParameters) -> EvaluatedPaintProperties;

    /// Returns true while any property is still transitioning.
    fn has_transition(&self) -> bool;
}

/// Paint block of a hillshade style layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HillshadePaintProperties {
    /// Shading intensity, `0..=1`.
    #[serde(rename = "hillshade-exaggeration")]
    pub exaggeration: f32,
    /// Sun azimuth in degrees.
    #[serde(rename = "hillshade-illumination-direction")]
    pub illumination_direction: f32,
    /// Reference frame of the azimuth.
    #[serde(rename = "hillshade-illumination-anchor")]
    pub illumination_anchor: IlluminationAnchor,
    /// Highlight color.
    #[serde(rename = "hillshade-highlight-color")]
    pub highlight_color: Color,
    /// Shadow color.
    #[serde(rename = "hillshade-shadow-color")]
    pub shadow_color: Color,
    /// Accent color.
    #[serde(rename = "hillshade-accent-color")]
    pub accent_color: Color,
}

impl Default for HillshadePaintProperties {
    fn default() -> Self {
        Self {
            exaggeration: 0.5,
            illumination_direction: 335.0,
            illumination_anchor: IlluminationAnchor::Viewport,
            highlight_color: Color::WHITE,
            shadow_color: Color::BLACK,
            accent_color: Color::BLACK,
        }
    }
}

impl HillshadePaintProperties {
    /// Constant evaluation: exaggeration clamped to `0..=1`, direction
    /// wrapped into `[0, 360)`.
    #[must_use]
    pub fn evaluated(&self) -> EvaluatedPaintProperties {
        EvaluatedPaintProperties {
            exaggeration: self.exaggeration.clamp(0.0, 1.0),
            illumination_direction: self.illumination_direction.rem_euclid(360.0),
            illumination_anchor: self.illumination_anchor,
            highlight_color: self.highlight_color,
            shadow_color: self.shadow_color,
            accent_color: self.accent_color,
        }
    }
}

impl HillshadePaint for HillshadePaintProperties {
    fn transition(&mut self, _parameters: &TransitionParameters) {}

    fn evaluate(&self, _parameters: &PropertyEvaluationParameters) -> EvaluatedPaintProperties {
        self.evaluated()
    }

    fn has_transition(&self) -> bool {
        false
    }
}

/// A `"type": "hillshade"` layer of a style document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HillshadeStyleLayer {
    /// Layer id
    pub id: String,
    /// Layer type, always `"hillshade"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Id of the raster-dem source
    pub source: String,
    /// Paint block
    #[serde(default)]
    pub paint: HillshadePaintProperties,
}

impl HillshadeStyleLayer {
    /// Parses a single style layer.
    ///
    /// # Errors
    /// Returns [`HillshadeError::Style`] if the JSON is malformed or the
    /// layer is not a hillshade layer.
    pub fn from_json(text: &str) -> HillshadeResult<Self> {
        let layer: Self =
            serde_json::from_str(text).map_err(|err| HillshadeError::Style(err.to_string()))?;
        if layer.kind != "hillshade" {
            return Err(HillshadeError::Style(format!(
                "layer {} has type {:?}, expected \"hillshade\"",
                layer.id, layer.kind
            )));
        }
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults() {
        let evaluated = EvaluatedPaintProperties::default();
        assert_eq!(evaluated.exaggeration, 0.5);
        assert_eq!(evaluated.illumination_direction, 335.0);
        assert_eq!(evaluated.illumination_anchor, IlluminationAnchor::Viewport);
        assert_eq!(evaluated.highlight_color, Color::WHITE);
        assert_eq!(evaluated.shadow_color, Color::BLACK);
    }

    #[test]
    fn test_evaluation_normalizes() {
        let paint = HillshadePaintProperties {
            exaggeration: 3.0,
            illumination_direction: -45.0,
            ..Default::default()
        };
        let evaluated = paint.evaluate(&PropertyEvaluationParameters::default());
        assert_eq!(evaluated.exaggeration, 1.0);
        assert_eq!(evaluated.illumination_direction, 315.0);
        assert!(!paint.has_transition());
    }

    #[test]
    fn test_style_layer_from_json() {
        let layer = HillshadeStyleLayer::from_json(
            r##"{
                "id": "relief",
                "type": "hillshade",
                "source": "terrain",
                "paint": {
                    "hillshade-exaggeration": 0.8,
                    "hillshade-illumination-anchor": "map",
                    "hillshade-shadow-color": "#473B24"
                }
            }"##,
        )
        .unwrap();

        assert_eq!(layer.id, "relief");
        assert_eq!(layer.source, "terrain");
        assert_eq!(layer.paint.exaggeration, 0.8);
        assert_eq!(layer.paint.illumination_anchor, IlluminationAnchor::Map);
        assert_eq!(layer.paint.illumination_direction, 335.0);
        assert_eq!(layer.paint.shadow_color, Color::parse("#473B24").unwrap());
    }

    #[test]
    fn test_paint_properties_json_reads_back() {
        let paint = HillshadePaintProperties {
            exaggeration: 0.8,
            illumination_anchor: IlluminationAnchor::Map,
            shadow_color: Color::parse("#473B24").unwrap(),
            accent_color: Color::parse("#00000080").unwrap(),
            ..Default::default()
        };
        for original in [HillshadePaintProperties::default(), paint] {
            let json = serde_json::to_string(&original).unwrap();
            let back: HillshadePaintProperties = serde_json::from_str(&json).unwrap();
            assert_eq!(back, original, "{json}");
        }
    }

    #[test]
    fn test_style_layer_rejects_other_types() {
        let err = HillshadeStyleLayer::from_json(r#"{"id": "r", "type": "raster", "source": "s"}"#)
            .unwrap_err();
        assert!(matches!(err, HillshadeError::Style(_)));

        let err = HillshadeStyleLayer::from_json(
            r#"{"id": "r", "type": "hillshade", "source": "s", "paint": {"hillshade-blur": 1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, HillshadeError::Style(_)));
    }
}
