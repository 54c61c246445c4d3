//! Navigation phase state machine
//!
//! The controller's lifecycle is a three-phase machine:
//!
//! ```text
//!                SCROLL
//!     Idle ─────────────────► Accumulating ──┐
//!       ▲  ▲                       │         │ SCROLL (timer reset)
//!       │  │                       │ ◄───────┘
//!       │  │ SCROLL_SETTLED        │
//!       │  └───────────────────────┤
//!       │                          │ SNAP_START
//!       │ SNAP_RELEASE             ▼
//!       └─────────────────────  Snapping ◄── SNAP_START (from Idle,
//!                                  │          external navigation)
//!                                  └── SCROLL ignored (guard)
//! ```
//!
//! While `Snapping`, every scroll observation is the echo of the
//! controller's own animated move and must not feed the debouncer; the
//! guard is checked before any state is touched.

use std::hash::Hash;

use crate::events::event_types::*;

/// Trait for state types that advance on event codes.
///
/// Implement on a state enum to define which events cause which
/// transitions; `None` means "no transition" and callers leave the state
/// untouched.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Phases of the section-navigation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavPhase {
    /// No pending timer, no move in flight. Initial state.
    #[default]
    Idle,
    /// A scroll burst is being debounced; the settle timer is pending.
    Accumulating,
    /// An animated move is in flight; observations are ignored until the
    /// duration window elapses.
    Snapping,
}

impl NavPhase {
    /// True while a scroll burst is being accumulated.
    pub fn is_accumulating(&self) -> bool {
        matches!(self, NavPhase::Accumulating)
    }

    /// True while an animated move is in flight (the guard is up).
    pub fn is_snapping(&self) -> bool {
        matches!(self, NavPhase::Snapping)
    }

    /// True when nothing is pending or in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self, NavPhase::Idle)
    }
}

impl StateTransitions for NavPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            // Idle -> Accumulating: first accepted observation of a burst
            (NavPhase::Idle, SCROLL) => Some(NavPhase::Accumulating),

            // Accumulating -> Accumulating: further observations only reset
            // the timer (no transition)
            (NavPhase::Accumulating, SCROLL) => None,

            // Accumulating -> Idle: settle produced no decision
            (NavPhase::Accumulating, SCROLL_SETTLED) => Some(NavPhase::Idle),

            // A decision or an external navigation starts a move
            (NavPhase::Accumulating, SNAP_START) => Some(NavPhase::Snapping),
            (NavPhase::Idle, SNAP_START) => Some(NavPhase::Snapping),

            // Snapping -> Snapping: retarget keeps the guard up
            (NavPhase::Snapping, SNAP_START) => None,

            // Snapping -> Idle: duration window elapsed
            (NavPhase::Snapping, SNAP_RELEASE) => Some(NavPhase::Idle),

            // Guard: observations during a move never transition
            (NavPhase::Snapping, SCROLL) => None,

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(phase: NavPhase, event: u32) -> NavPhase {
        phase.on_event(event).unwrap_or(phase)
    }

    #[test]
    fn test_burst_lifecycle() {
        let mut phase = NavPhase::Idle;

        phase = step(phase, SCROLL);
        assert!(phase.is_accumulating());

        // Further observations keep accumulating (timer reset, no change)
        assert_eq!(phase.on_event(SCROLL), None);

        phase = step(phase, SNAP_START);
        assert!(phase.is_snapping());

        phase = step(phase, SNAP_RELEASE);
        assert!(phase.is_idle());
    }

    #[test]
    fn test_guard_ignores_scroll_while_snapping() {
        let phase = NavPhase::Snapping;
        assert_eq!(phase.on_event(SCROLL), None);
    }

    #[test]
    fn test_retarget_keeps_guard_up() {
        let phase = NavPhase::Snapping;
        assert_eq!(phase.on_event(SNAP_START), None);
    }

    #[test]
    fn test_external_navigation_from_idle() {
        let phase = NavPhase::Idle;
        assert_eq!(phase.on_event(SNAP_START), Some(NavPhase::Snapping));
    }

    #[test]
    fn test_settle_without_decision_returns_to_idle() {
        let phase = NavPhase::Accumulating;
        assert_eq!(phase.on_event(SCROLL_SETTLED), Some(NavPhase::Idle));
    }

    #[test]
    fn test_release_only_leaves_snapping() {
        // SNAP_RELEASE is meaningless outside Snapping
        assert_eq!(NavPhase::Idle.on_event(SNAP_RELEASE), None);
        assert_eq!(NavPhase::Accumulating.on_event(SNAP_RELEASE), None);
    }
}
