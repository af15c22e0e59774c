//! Render pass taxonomy and per-pass draw context.
//!
//! The external scheduler decides pass order; layers only declare which
//! passes they take part in and react when called.

mod paint;
mod stats;

pub use paint::{PaintParameters, ViewportState, DEPTH_EPSILON, NUM_SUBLAYERS};
pub use stats::HillshadeStats;

/// A named render pass of the owning scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// Opaque geometry, front to back
    Opaque,
    /// Blended compositing, back to front
    Translucent,
    /// Offscreen pre-processing before the visible passes
    Pass3D,
}

impl RenderPass {
    const fn bit(self) -> u8 {
        match self {
            Self::Opaque => 1 << 0,
            Self::Translucent => 1 << 1,
            Self::Pass3D => 1 << 2,
        }
    }
}

impl std::fmt::Display for RenderPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Opaque => "opaque",
            Self::Translucent => "translucent",
            Self::Pass3D => "3d",
        };
        f.write_str(name)
    }
}

/// Set of render passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RenderPasses(u8);

impl RenderPasses {
    /// No passes
    pub const NONE: Self = Self(0);

    /// Returns true if `pass` is in the set.
    #[must_use]
    pub const fn contains(self, pass: RenderPass) -> bool {
        self.0 & pass.bit() != 0
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<RenderPass> for RenderPasses {
    fn from(pass: RenderPass) -> Self {
        Self(pass.bit())
    }
}

impl std::ops::BitOr for RenderPass {
    type Output = RenderPasses;
    fn bitor(self, rhs: Self) -> RenderPasses {
        RenderPasses(self.bit() | rhs.bit())
    }
}

impl std::ops::BitOr<RenderPass> for RenderPasses {
    type Output = Self;
    fn bitor(self, rhs: RenderPass) -> Self {
        Self(self.0 | rhs.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_set() {
        let passes = RenderPass::Translucent | RenderPass::Pass3D;
        assert!(passes.contains(RenderPass::Translucent));
        assert!(passes.contains(RenderPass::Pass3D));
        assert!(!passes.contains(RenderPass::Opaque));
        assert!(RenderPasses::NONE.is_empty());
        assert!(!RenderPasses::from(RenderPass::Opaque).is_empty());
    }

    #[test]
    fn test_pass_names() {
        assert_eq!(RenderPass::Pass3D.to_string(), "3d");
        assert_eq!((RenderPasses::NONE | RenderPass::Opaque), RenderPasses::from(RenderPass::Opaque));
    }
}
