//! # Tile & Projection Constants
//!
//! Values baked into every shader and every piece of tile geometry.
//!
//! **CRITICAL:** `EXTENT` is mirrored in the WGSL sources. Change both or
//! neither.

// =============================================================================
// TILE GEOMETRY
// =============================================================================

/// Tile-local coordinate extent. Vertex positions span `0..=EXTENT`.
pub const EXTENT: i32 = 8192;

/// Border (in texels) padded around every DEM image for neighbor sampling.
pub const DEM_BORDER: u16 = 1;

/// Native max zoom assumed when the elevation source does not report one.
pub const TERRAIN_RGB_MAXZOOM: u8 = 15;

// =============================================================================
// PROJECTION
// =============================================================================

/// Degrees to radians.
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees.
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

/// Latitude of the north edge of the zoom 0 tile in Web Mercator.
pub const LATITUDE_MAX: f64 = 85.051_128_779_806_6;
