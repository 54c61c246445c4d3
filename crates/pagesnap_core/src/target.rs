//! Snap target handles
//!
//! The controller never touches the hosting page directly. Each section
//! registers an opaque handle through which the controller can measure the
//! section's position and request the host's animated scroll.

use std::sync::Arc;

/// Handle to one navigable section of the hosting page.
///
/// Implementations wrap whatever the hosting environment uses to address a
/// visual element. Both operations are cheap and non-blocking:
/// `offset_top` is a fresh measurement (the controller never caches it) and
/// `align_to_top` is fire-and-forget — the host animates the move on its
/// own schedule and the controller bounds the move with a fixed duration
/// window instead of awaiting completion.
pub trait SnapTarget: Send + Sync {
    /// Current vertical offset of the section's top edge from the viewport
    /// top, in logical units. Negative once the section has scrolled past
    /// the top.
    fn offset_top(&self) -> f32;

    /// Ask the host to smooth-scroll the viewport so this section's top
    /// edge aligns with the viewport's top edge.
    fn align_to_top(&self);
}

/// Shared section handle as supplied by the embedding page.
///
/// Handle identity is pointer identity: registering the same `Arc` twice
/// is idempotent, while two handles for the same visual element are two
/// sections.
pub type SharedSnapTarget = Arc<dyn SnapTarget>;
