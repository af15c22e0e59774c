//! Rendering statistics.

/// Statistics from one `render` call of a hillshade layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HillshadeStats {
    /// Buckets prepared (offscreen draws).
    pub prepared: u32,
    /// Buckets shaded (framebuffer draws).
    pub shaded: u32,
    /// Tiles without a bucket for this layer.
    pub skipped_missing_bucket: u32,
    /// Tiles whose bucket has no elevation data.
    pub skipped_no_data: u32,
    /// Tiles not shaded because they are not prepared yet.
    pub deferred: u32,
    /// Number of draw calls issued.
    pub draw_calls: u32,
}

impl HillshadeStats {
    /// Tiles skipped for any reason.
    #[must_use]
    pub const fn skipped(&self) -> u32 {
        self.skipped_missing_bucket + self.skipped_no_data + self.deferred
    }

    /// Returns true if nothing was drawn.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.draw_calls == 0
    }

    /// Adds another pass's counters to this one.
    pub fn accumulate(&mut self, other: &Self) {
        self.prepared += other.prepared;
        self.shaded += other.shaded;
        self.skipped_missing_bucket += other.skipped_missing_bucket;
        self.skipped_no_data += other.skipped_no_data;
        self.deferred += other.deferred;
        self.draw_calls += other.draw_calls;
    }
}
