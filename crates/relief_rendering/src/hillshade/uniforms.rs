//! Lighting and geographic uniforms, and the uniform blocks of both
//! hillshade programs.
//!
//! Derivation is pure: evaluated properties plus viewport state in,
//! shader-ready values out.

use bytemuck::{Pod, Zeroable};
use relief_shared::{tile_y_to_latitude, Mat4, UnwrappedTileId, DEG2RAD, EXTENT};

use super::properties::{EvaluatedPaintProperties, IlluminationAnchor};

/// Light parameters of the shade program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingUniforms {
    /// Shading intensity
    pub exaggeration: f32,
    /// Azimuth in radians, relative to the chosen anchor
    pub azimuth: f32,
}

impl LightingUniforms {
    /// `[exaggeration, azimuth]`, the `light` uniform.
    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.exaggeration, self.azimuth]
    }
}

/// Latitudes bounding a tile, for Mercator slope correction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoUniforms {
    /// Latitude of the north edge, degrees
    pub lat_north: f32,
    /// Latitude of the south edge, degrees
    pub lat_south: f32,
}

impl GeoUniforms {
    /// `[north, south]`, the `latrange` uniform.
    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.lat_north, self.lat_south]
    }
}

/// Converts the illumination direction to radians, removing the map
/// bearing when the light is anchored to the viewport.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn derive_light(evaluated: &EvaluatedPaintProperties, bearing: f64) -> LightingUniforms {
    let mut azimuth = f64::from(evaluated.illumination_direction) * DEG2RAD;
    if evaluated.illumination_anchor == IlluminationAnchor::Viewport {
        azimuth -= bearing;
    }
    LightingUniforms {
        exaggeration: evaluated.exaggeration,
        azimuth: azimuth as f32,
    }
}

/// Latitudes of the north edge of `tile` and of the row below it.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn derive_lat_range(tile: &UnwrappedTileId) -> GeoUniforms {
    let z = tile.canonical.z;
    let y = f64::from(tile.canonical.y);
    GeoUniforms {
        lat_north: tile_y_to_latitude(z, y) as f32,
        lat_south: tile_y_to_latitude(z, y + 1.0) as f32,
    }
}

/// Projection used by the prepare pass: tile-local `0..EXTENT` onto the
/// full offscreen target.
#[must_use]
pub fn prepare_matrix() -> Mat4 {
    let extent = f64::from(EXTENT);
    Mat4::ortho(0.0, extent, -extent, 0.0, 0.0, 1.0).translate(0.0, -extent, 0.0)
}

/// Uniform block of the prepare program.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct HillshadePrepareUniforms {
    /// Tile to target projection
    pub matrix: [[f32; 4]; 4],
    /// DEM stride (dimension plus border), both axes
    pub dimension: [f32; 2],
    /// Tile zoom
    pub zoom: f32,
    /// Native max zoom of the elevation source
    pub maxzoom: f32,
    /// Elevation decoding weights
    pub unpack: [f32; 4],
}

/// Uniform block of the shade program.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct HillshadeUniforms {
    /// Tile to clip-space projection
    pub matrix: [[f32; 4]; 4],
    /// Highlight color, premultiplied
    pub highlight: [f32; 4],
    /// Shadow color, premultiplied
    pub shadow: [f32; 4],
    /// Accent color, premultiplied
    pub accent: [f32; 4],
    /// `[exaggeration, azimuth]`
    pub light: [f32; 2],
    /// `[lat_north, lat_south]`
    pub latrange: [f32; 2],
}

impl HillshadeUniforms {
    /// Assembles the block for one tile.
    #[must_use]
    pub fn new(
        matrix: &Mat4,
        evaluated: &EvaluatedPaintProperties,
        light: LightingUniforms,
        geo: GeoUniforms,
    ) -> Self {
        Self {
            matrix: matrix.to_cols_f32(),
            highlight: evaluated.highlight_color.to_array(),
            shadow: evaluated.shadow_color.to_array(),
            accent: evaluated.accent_color.to_array(),
            light: light.to_array(),
            latrange: geo.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn properties(direction: f32, anchor: IlluminationAnchor, exaggeration: f32) -> EvaluatedPaintProperties {
        EvaluatedPaintProperties {
            exaggeration,
            illumination_direction: direction,
            illumination_anchor: anchor,
            ..Default::default()
        }
    }

    #[test]
    fn test_map_anchor_ignores_bearing() {
        let evaluated = properties(315.0, IlluminationAnchor::Map, 0.5);
        let light = derive_light(&evaluated, 1.2);
        assert_eq!(light.exaggeration, 0.5);
        assert!((light.azimuth - 5.497_787).abs() < 1e-4);
        assert!((light.azimuth - 315.0 * PI / 180.0).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_anchor_subtracts_bearing() {
        let bearing = std::f64::consts::FRAC_PI_2;
        let map = derive_light(&properties(120.0, IlluminationAnchor::Map, 1.0), bearing);
        let viewport = derive_light(&properties(120.0, IlluminationAnchor::Viewport, 1.0), bearing);
        assert!((map.azimuth - viewport.azimuth - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_zero_lat_range_spans_mercator() {
        let geo = derive_lat_range(&UnwrappedTileId::new(0, 0, 0));
        assert!((geo.lat_north - 85.051_13).abs() < 1e-3);
        assert!((geo.lat_south + 85.051_13).abs() < 1e-3);
    }

    #[test]
    fn test_lat_range_bottom_row_reaches_world_edge() {
        let geo = derive_lat_range(&UnwrappedTileId::new(4, 2, 15));
        assert!(geo.lat_north > geo.lat_south);
        assert!((geo.lat_south + 85.051_13).abs() < 1e-3);
    }

    #[test]
    fn test_lat_range_is_row_local() {
        let geo = derive_lat_range(&UnwrappedTileId::new(1, 0, 0));
        assert!((geo.lat_north - 85.051_13).abs() < 1e-3);
        assert!(geo.lat_south.abs() < 1e-3);
    }

    #[test]
    fn test_uniform_block_sizes() {
        assert_eq!(std::mem::size_of::<HillshadePrepareUniforms>(), 96);
        assert_eq!(std::mem::size_of::<HillshadeUniforms>(), 128);
    }

    #[test]
    fn test_prepare_matrix_corners() {
        let mat = prepare_matrix();
        let extent = f64::from(EXTENT);
        let far = mat.transform_point(extent, extent, 0.0);
        assert!((far[0] - 1.0).abs() < 1e-9);
        assert!((far[1] - 1.0).abs() < 1e-9);
    }
}
