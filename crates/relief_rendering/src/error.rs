//! # Rendering Error Types
//!
//! Device failures and contract violations. Missing data and buckets that
//! are not prepared yet are NOT errors: they are counted in
//! [`crate::pipeline::HillshadeStats`] and skipped.

use relief_shared::UnwrappedTileId;
use thiserror::Error;

/// Failures reported by the graphics device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GfxError {
    /// Offscreen render target could not be created or bound.
    #[error("offscreen target failed: {0}")]
    OffscreenTarget(String),

    /// Program compilation or linking failed.
    #[error("program {name} failed to compile: {reason}")]
    ProgramCompile {
        /// Program name.
        name: &'static str,
        /// Driver message.
        reason: String,
    },

    /// Vertex or index buffer allocation failed.
    #[error("buffer allocation of {bytes} bytes failed")]
    BufferAllocation {
        /// Requested size.
        bytes: usize,
    },

    /// Draw submission failed.
    #[error("draw {label} failed: {reason}")]
    Draw {
        /// Label of the draw call.
        label: String,
        /// Driver message.
        reason: String,
    },

    /// The device is gone.
    #[error("device lost")]
    DeviceLost,
}

/// Result type for device operations.
pub type GfxResult<T> = Result<T, GfxError>;

/// Errors raised by the hillshade layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HillshadeError {
    /// Device failure, propagated unmodified.
    #[error(transparent)]
    Device(#[from] GfxError),

    /// A driver was invoked on a bucket in the wrong state.
    #[error("precondition violated for tile {tile}: {reason}")]
    Precondition {
        /// Tile whose bucket was in the wrong state.
        tile: UnwrappedTileId,
        /// What was expected.
        reason: &'static str,
    },

    /// A DEM texture disagrees with its declared dimension.
    #[error("DEM texture is {actual}px wide, expected stride {expected}px")]
    InvalidDem {
        /// Expected stride (dimension plus border on both sides).
        expected: u32,
        /// Actual texture width.
        actual: u32,
    },

    /// The style document could not be read.
    #[error("invalid hillshade style: {0}")]
    Style(String),
}

/// Result type for hillshade operations.
pub type HillshadeResult<T> = Result<T, HillshadeError>;
