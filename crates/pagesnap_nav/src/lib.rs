//! Pagesnap Navigation
//!
//! Debounced, guarded section snapping for scrollable pages.
//!
//! A `SnapController` watches the host's scroll and resize signals. When a
//! scroll burst goes quiet it decides a target section — back to the
//! nearest one for small, corrective displacements, one section in the
//! scroll direction past the threshold — and asks the host to animate
//! there. While that move is in flight a guard drops every incoming
//! observation, so the controller never mistakes its own motion for the
//! user's.
//!
//! # Features
//!
//! - **Debounced decisions**: A whole burst of observations becomes one
//!   decision with the burst's net displacement
//! - **Re-entrancy guard**: The animated move's scroll echo cannot trigger
//!   another decision
//! - **Narrow-viewport gating**: Snapping activates below a configurable
//!   breakpoint (or everywhere with `SnapConfig::unrestricted()`)
//! - **Host-driven time**: Entry points take `now`; timers fire from
//!   `tick(now)` — deterministic to embed and to test
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//! use pagesnap_nav::prelude::*;
//!
//! struct Hero;
//! impl SnapTarget for Hero {
//!     fn offset_top(&self) -> f32 { 0.0 }
//!     fn align_to_top(&self) { /* host animated scroll */ }
//! }
//!
//! let controller = SnapController::with_defaults();
//! controller.on_resize(480.0); // phone-sized: snapping active
//! controller.register_section(Arc::new(Hero));
//!
//! let now = Instant::now();
//! controller.on_scroll(0.0, now);
//! controller.tick(now + Duration::from_millis(150));
//! assert_eq!(controller.current_section_index(), 0);
//! ```

pub mod controller;
pub mod debounce;
pub mod decider;
pub mod executor;
pub mod registry;
pub mod viewport;

pub use controller::{NavHandle, NavObserver, NavSnapshot, NavTask, SnapController};
pub use debounce::ScrollDebouncer;
pub use decider::decide_target;
pub use executor::SnapExecutor;
pub use registry::{Section, SectionRegistry};
pub use viewport::ViewportMode;

/// Common imports for embedding pages
pub mod prelude {
    pub use crate::controller::{NavHandle, NavSnapshot, SnapController};
    pub use pagesnap_core::{SharedSnapTarget, SnapConfig, SnapTarget, ViewportSignal};
}
