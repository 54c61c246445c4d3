//! Viewport mode detection

/// Narrow-viewport detector
///
/// Snapping is a narrow-viewport behavior by default. The flag is
/// recomputed synchronously from each resize signal — the controller never
/// polls — and starts out wide until the host delivers its first
/// measurement.
pub struct ViewportMode {
    breakpoint: f32,
    narrow: bool,
}

impl ViewportMode {
    pub fn new(breakpoint: f32) -> Self {
        Self {
            breakpoint,
            narrow: false,
        }
    }

    /// Recompute the mode from a width measurement; strictly below the
    /// breakpoint counts as narrow. Returns true when the flag flipped.
    pub fn measure(&mut self, width: f32) -> bool {
        let narrow = width < self.breakpoint;
        let changed = narrow != self.narrow;
        self.narrow = narrow;
        if changed {
            tracing::debug!(
                "viewport mode changed: {} (width {width}, breakpoint {})",
                if narrow { "narrow" } else { "wide" },
                self.breakpoint
            );
        }
        changed
    }

    pub fn is_narrow(&self) -> bool {
        self.narrow
    }

    pub fn breakpoint(&self) -> f32 {
        self.breakpoint
    }
}
