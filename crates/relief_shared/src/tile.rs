//! Tile identifiers and their Web Mercator geography.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::RAD2DEG;

/// A tile inside the `0..2^z` grid of its zoom level.
///
/// Ordering is `(z, x, y)`, which keeps tile masks deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanonicalTileId {
    /// Zoom level
    pub z: u8,
    /// Column
    pub x: u32,
    /// Row, counted from the north edge
    pub y: u32,
}

impl CanonicalTileId {
    /// Creates a canonical tile id.
    #[must_use]
    pub const fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along one axis at this zoom.
    #[must_use]
    pub fn dim(self) -> f64 {
        f64::from(self.z).exp2()
    }
}

/// A canonical tile plus the world copy it is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnwrappedTileId {
    /// World copy; 0 is the primary world, negative copies lie to the west.
    pub wrap: i16,
    /// Position inside the world copy
    pub canonical: CanonicalTileId,
}

impl UnwrappedTileId {
    /// Creates an unwrapped id from a zoom and an unbounded column.
    ///
    /// `x` is folded into `0..2^z` and the overflow recorded as `wrap`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(z: u8, x: i64, y: u32) -> Self {
        let dim = 1i64 << z;
        let wrap = x.div_euclid(dim);
        Self {
            wrap: wrap as i16,
            canonical: CanonicalTileId::new(z, x.rem_euclid(dim) as u32, y),
        }
    }

    /// Zoom level
    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.canonical.z
    }
}

impl std::fmt::Display for UnwrappedTileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.canonical.z, self.canonical.x, self.canonical.y)?;
        if self.wrap != 0 {
            write!(f, "@{}", self.wrap)?;
        }
        Ok(())
    }
}

/// Latitude of the horizontal tile edge at row `y` of zoom `z`.
///
/// Defined for every `y`, including `y == 2^z` (the south edge of the world).
#[must_use]
pub fn tile_y_to_latitude(z: u8, y: f64) -> f64 {
    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * y / f64::from(z).exp2();
    n.sinh().atan() * RAD2DEG
}

/// Set of sub-tiles (relative to a tile) that the tile alone is responsible
/// for drawing.
pub type TileMask = BTreeSet<CanonicalTileId>;

/// The mask that covers the whole tile.
#[must_use]
pub fn full_tile_mask() -> TileMask {
    TileMask::from([CanonicalTileId::new(0, 0, 0)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LATITUDE_MAX;

    #[test]
    fn test_world_edges() {
        assert!((tile_y_to_latitude(0, 0.0) - LATITUDE_MAX).abs() < 1e-9);
        assert!((tile_y_to_latitude(0, 1.0) + LATITUDE_MAX).abs() < 1e-9);
        assert!(tile_y_to_latitude(3, 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unwrapped_id_folds_columns() {
        let west = UnwrappedTileId::new(2, -1, 1);
        assert_eq!(west.wrap, -1);
        assert_eq!(west.canonical, CanonicalTileId::new(2, 3, 1));

        let east = UnwrappedTileId::new(2, 9, 1);
        assert_eq!(east.wrap, 2);
        assert_eq!(east.canonical.x, 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(UnwrappedTileId::new(4, 2, 3).to_string(), "4/2/3");
        assert_eq!(UnwrappedTileId::new(1, 3, 0).to_string(), "1/1/0@1");
    }

    #[test]
    fn test_mask_ordering() {
        let mask: TileMask = [
            CanonicalTileId::new(1, 1, 0),
            CanonicalTileId::new(1, 0, 1),
            CanonicalTileId::new(0, 0, 0),
        ]
        .into_iter()
        .collect();
        let first = mask.iter().next().copied();
        assert_eq!(first, Some(CanonicalTileId::new(0, 0, 0)));
        assert!(full_tile_mask().contains(&CanonicalTileId::new(0, 0, 0)));
    }
}
