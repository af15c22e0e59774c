//! # Relief Shared
//!
//! GPU-free types used by the relief renderer and by the tile and style
//! collaborators that feed it.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `wgpu`
//! - Any GPU or window-related crate
//!
//! If you need graphics types, put them in `relief_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;
pub mod tile;

pub use color::{Color, ColorParseError};
pub use constants::{DEG2RAD, DEM_BORDER, EXTENT, LATITUDE_MAX, RAD2DEG, TERRAIN_RGB_MAXZOOM};
pub use math::Mat4;
pub use tile::{full_tile_mask, tile_y_to_latitude, CanonicalTileId, TileMask, UnwrappedTileId};
