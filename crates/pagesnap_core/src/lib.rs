//! Pagesnap Core
//!
//! Foundational primitives for the pagesnap section-navigation controller:
//!
//! - **Snap Targets**: The opaque handle an embedding page supplies per
//!   section — measure its offset, ask the host to scroll to it
//! - **Event Codes**: Inbound viewport signals and the event vocabulary of
//!   the navigation state machine
//! - **State Machine**: The Idle / Accumulating / Snapping phase machine
//!   expressed through `StateTransitions`
//! - **Configuration**: `SnapConfig` with defaults, presets, validation,
//!   and TOML loading
//!
//! # Example
//!
//! ```rust
//! use pagesnap_core::{NavPhase, SnapConfig, StateTransitions};
//! use pagesnap_core::events::event_types;
//!
//! let config = SnapConfig::default();
//! assert!(config.mobile_only);
//!
//! let phase = NavPhase::Idle;
//! let phase = phase.on_event(event_types::SCROLL).unwrap();
//! assert!(phase.is_accumulating());
//! ```

pub mod config;
pub mod events;
pub mod fsm;
pub mod target;

pub use config::{ConfigError, SnapConfig};
pub use events::ViewportSignal;
pub use fsm::{NavPhase, StateTransitions};
pub use target::{SharedSnapTarget, SnapTarget};
