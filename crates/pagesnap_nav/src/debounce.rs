//! Scroll burst debouncing
//!
//! A burst of scroll observations becomes exactly one decision: each
//! accepted observation extends the quiet window, and the displacements of
//! the whole burst accumulate into one net delta handed out at settle.
//!
//! The debouncer holds burst state only. Gating (the snapping guard,
//! viewport mode, registry emptiness) happens before an observation
//! reaches it, and the pending settle task lives in the owner's scheduler —
//! this struct just remembers which task id currently represents the
//! burst, so the owner can cancel-before-reschedule.

use pagesnap_timing::TaskId;

/// Accumulates one scroll burst between settles
pub struct ScrollDebouncer {
    /// Last accepted scroll offset; displacement baseline.
    last_position: f32,
    /// Net displacement accumulated since the previous settle.
    accumulated: f32,
    /// Set after a snap release: the next accepted observation re-bases
    /// the baseline instead of contributing the programmatic displacement
    /// as user scrolling.
    needs_reseed: bool,
    scrolling: bool,
    pending: Option<TaskId>,
}

impl Default for ScrollDebouncer {
    fn default() -> Self {
        Self {
            last_position: 0.0,
            accumulated: 0.0,
            needs_reseed: false,
            scrolling: false,
            pending: None,
        }
    }
}

impl ScrollDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an accepted observation into the current burst and return the
    /// displacement it contributed.
    ///
    /// The first accepted observation after [`reseed`](Self::reseed) only
    /// re-bases the baseline and contributes zero.
    pub fn observe(&mut self, position: f32) -> f32 {
        self.scrolling = true;

        if self.needs_reseed {
            self.needs_reseed = false;
            self.last_position = position;
            return 0.0;
        }

        let delta = position - self.last_position;
        self.last_position = position;
        self.accumulated += delta;
        delta
    }

    /// Close the burst: hand out the net delta and reset for the next one.
    pub fn settle(&mut self) -> f32 {
        let net = self.accumulated;
        self.accumulated = 0.0;
        self.scrolling = false;
        self.pending = None;
        net
    }

    /// Discard the burst without a decision (teardown, mode exit, or an
    /// explicit navigation superseding the gesture). The caller cancels
    /// the pending task; this clears the burst state.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        self.scrolling = false;
        self.pending = None;
    }

    /// Mark the baseline stale. Called at snap release: the guard dropped
    /// this move's scroll echo, so `last_position` no longer matches the
    /// real viewport offset.
    pub fn reseed(&mut self) {
        self.needs_reseed = true;
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn last_position(&self) -> f32 {
        self.last_position
    }

    /// Task id of the pending settle, if a burst is open.
    pub fn pending(&self) -> Option<TaskId> {
        self.pending
    }

    /// Remember the settle task just scheduled for this burst.
    pub fn set_pending(&mut self, id: TaskId) {
        self.pending = Some(id);
    }

    /// Take the pending settle task for cancel-before-reschedule.
    pub fn take_pending(&mut self) -> Option<TaskId> {
        self.pending.take()
    }
}
