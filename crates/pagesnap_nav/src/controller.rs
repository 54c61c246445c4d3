//! Section-navigation controller
//!
//! The composition root. One `SnapController` per page view owns the
//! registry, the viewport mode, the debouncer, the executor, and the task
//! scheduler, and exposes the public contract:
//!
//! - `register_section` / `scroll_to_section` for the page's components
//! - `on_scroll` / `on_resize` (or `handle_signal`) for the host's event
//!   streams
//! - `tick` to drive the deferred timers from the host's clock
//! - `handle` / `subscribe` for indicator UI reading `NavSnapshot`
//!
//! Every runtime input is either valid or absorbed as a no-op; nothing in
//! this module returns an error or panics on bad indices, missing
//! sections, or late timers.

use std::sync::{Arc, Mutex, Weak};
use std::time::Instant;

use pagesnap_core::events::event_types;
use pagesnap_core::{NavPhase, SharedSnapTarget, SnapConfig, StateTransitions, ViewportSignal};
use pagesnap_timing::TaskScheduler;

use crate::debounce::ScrollDebouncer;
use crate::decider::decide_target;
use crate::executor::SnapExecutor;
use crate::registry::SectionRegistry;
use crate::viewport::ViewportMode;

// ============================================================================
// Tasks and Observable State
// ============================================================================

/// Deferred actions owned by the controller's scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTask {
    /// The quiet interval elapsed; compute a decision.
    Settle,
    /// The snap duration window elapsed; drop the guard.
    Release,
}

/// Read-only projection of controller state for consumers
/// (e.g. a dot indicator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSnapshot {
    /// Index of the last section explicitly navigated to.
    pub current_index: usize,
    /// True between the first observation of a burst and its settle.
    pub is_scrolling: bool,
    /// True while the viewport measures narrower than the breakpoint.
    pub is_mobile: bool,
}

/// Observer invoked with a fresh snapshot whenever it changes.
///
/// Observers run after the controller's lock is released, so they are free
/// to read back through a [`NavHandle`].
pub type NavObserver = Arc<dyn Fn(NavSnapshot) + Send + Sync>;

// ============================================================================
// Controller Internals
// ============================================================================

struct ControllerInner {
    config: SnapConfig,
    registry: SectionRegistry,
    viewport: ViewportMode,
    debouncer: ScrollDebouncer,
    executor: SnapExecutor,
    scheduler: TaskScheduler<NavTask>,
    phase: NavPhase,
    current_index: usize,
    observers: Vec<NavObserver>,
    detached: bool,
}

impl ControllerInner {
    fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            current_index: self.current_index,
            is_scrolling: self.phase.is_accumulating(),
            is_mobile: self.viewport.is_narrow(),
        }
    }

    fn on_scroll(&mut self, position: f32, now: Instant) {
        if self.detached {
            return;
        }

        // Hard precondition: while a move is in flight, every observation
        // is the echo of our own animated scroll.
        if self.phase.is_snapping() {
            tracing::trace!("scroll observation at {position} dropped: snap in flight");
            return;
        }

        if self.config.mobile_only && !self.viewport.is_narrow() {
            tracing::trace!("scroll observation at {position} ignored: wide viewport");
            return;
        }

        if self.registry.is_empty() {
            return;
        }

        // Cancel-before-reschedule: the burst's settle tracks its last
        // observation
        if let Some(prev) = self.debouncer.take_pending() {
            self.scheduler.cancel(prev);
        }

        let delta = self.debouncer.observe(position);
        let pending = self
            .scheduler
            .schedule(now, self.config.debounce_interval(), NavTask::Settle);
        self.debouncer.set_pending(pending);

        if let Some(next) = self.phase.on_event(event_types::SCROLL) {
            self.phase = next;
        }

        tracing::trace!("scroll observation at {position} (delta {delta})");
    }

    fn on_resize(&mut self, width: f32) {
        if self.detached {
            return;
        }

        let changed = self.viewport.measure(width);

        // Leaving narrow mode aborts an accumulating burst: its decision
        // would realign against a reflowed layout.
        if changed
            && self.config.mobile_only
            && !self.viewport.is_narrow()
            && self.phase.is_accumulating()
        {
            if let Some(prev) = self.debouncer.take_pending() {
                self.scheduler.cancel(prev);
            }
            self.debouncer.reset();
            if let Some(next) = self.phase.on_event(event_types::SCROLL_SETTLED) {
                self.phase = next;
            }
        }
    }

    fn scroll_to(&mut self, index: usize, now: Instant) {
        if self.detached {
            return;
        }

        if index >= self.registry.len() {
            tracing::trace!("scroll_to_section({index}) out of range; ignoring");
            return;
        }

        // An explicit navigation supersedes an unfinished gesture
        if let Some(prev) = self.debouncer.take_pending() {
            self.scheduler.cancel(prev);
            self.debouncer.reset();
        }

        self.begin_move(index, now);
    }

    /// Callers have validated `index` against the registry.
    fn begin_move(&mut self, index: usize, now: Instant) {
        // Guard goes up before the animated call; its echo must find it
        // already raised
        if let Some(next) = self.phase.on_event(event_types::SNAP_START) {
            self.phase = next;
        }
        self.current_index = index;
        self.executor.move_to(
            index,
            &self.registry,
            &mut self.scheduler,
            now,
            self.config.snap_duration(),
        );
    }

    fn handle_settle(&mut self, now: Instant) {
        // Decisions are only computed with the guard down. The pending
        // settle is cancelled whenever a move begins; this check holds the
        // invariant even if a settle and a move land on the same tick.
        if self.phase.is_snapping() {
            tracing::trace!("settle dropped: snap in flight");
            return;
        }

        let net = self.debouncer.settle();
        let count = self.registry.len();
        match decide_target(net, self.registry.closest(), count, self.config.threshold) {
            Some(target) => {
                tracing::debug!("burst settled: net delta {net}, target section {target}");
                self.begin_move(target, now);
            }
            None => {
                if let Some(next) = self.phase.on_event(event_types::SCROLL_SETTLED) {
                    self.phase = next;
                }
            }
        }
    }

    fn handle_release(&mut self) {
        self.executor.on_release();
        if let Some(next) = self.phase.on_event(event_types::SNAP_RELEASE) {
            self.phase = next;
        }
        // The guard swallowed this move's echo; re-base before the next
        // burst
        self.debouncer.reseed();
        tracing::debug!("snap window elapsed; guard released");
    }

    fn tick(&mut self, now: Instant) {
        if self.detached {
            return;
        }
        for task in self.scheduler.fire_due(now) {
            match task {
                NavTask::Settle => self.handle_settle(now),
                NavTask::Release => self.handle_release(),
            }
        }
    }

    fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.scheduler.clear();
        self.debouncer.reset();
        self.executor.on_release();
        self.phase = NavPhase::Idle;
        self.observers.clear();
        tracing::debug!("controller detached");
    }
}

/// Run an operation under the lock, then notify observers outside it.
///
/// Observers are collected while locked and called after release; an
/// observer reading back through a handle must not deadlock on the
/// controller's own mutex.
fn with_inner_notified<R>(
    inner: &Mutex<ControllerInner>,
    f: impl FnOnce(&mut ControllerInner) -> R,
) -> R {
    let (result, pending_notify) = {
        let mut guard = inner.lock().unwrap();
        let before = guard.snapshot();
        let result = f(&mut guard);
        let after = guard.snapshot();
        let pending_notify =
            (after != before && !guard.observers.is_empty()).then(|| (guard.observers.clone(), after));
        (result, pending_notify)
    };

    if let Some((observers, snapshot)) = pending_notify {
        for observer in observers {
            observer(snapshot);
        }
    }
    result
}

// ============================================================================
// Public Controller
// ============================================================================

/// The section-navigation controller owning one page view's snap state
///
/// Constructed with the view and detached (or dropped) with it. All entry
/// points return immediately; the animated move is fire-and-forget with a
/// time-based completion bound, and the host drives pending timers through
/// [`tick`](Self::tick).
pub struct SnapController {
    inner: Arc<Mutex<ControllerInner>>,
}

impl SnapController {
    pub fn new(config: SnapConfig) -> Self {
        let viewport = ViewportMode::new(config.breakpoint);
        Self {
            inner: Arc::new(Mutex::new(ControllerInner {
                config,
                registry: SectionRegistry::new(),
                viewport,
                debouncer: ScrollDebouncer::new(),
                executor: SnapExecutor::new(),
                scheduler: TaskScheduler::new(),
                phase: NavPhase::Idle,
                current_index: 0,
                observers: Vec::new(),
                detached: false,
            })),
        }
    }

    /// Controller with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SnapConfig::default())
    }

    /// Register a section handle. Safe to call repeatedly; duplicates are
    /// ignored (see [`SectionRegistry::register`]).
    pub fn register_section(&self, target: SharedSnapTarget) {
        with_inner_notified(&self.inner, |inner| {
            if !inner.detached {
                inner.registry.register(target);
            }
        });
    }

    /// Feed a scroll-position observation from the host.
    pub fn on_scroll(&self, position: f32, now: Instant) {
        with_inner_notified(&self.inner, |inner| inner.on_scroll(position, now));
    }

    /// Feed a viewport width measurement from the host.
    pub fn on_resize(&self, width: f32) {
        with_inner_notified(&self.inner, |inner| inner.on_resize(width));
    }

    /// Dispatch a piped host signal to `on_scroll`/`on_resize`.
    pub fn handle_signal(&self, signal: ViewportSignal, now: Instant) {
        match signal {
            ViewportSignal::Scroll { position } => self.on_scroll(position, now),
            ViewportSignal::Resize { width } => self.on_resize(width),
        }
    }

    /// Navigate to a section explicitly (e.g. from a dot indicator).
    ///
    /// Out-of-range indices are silently ignored. Issued mid-snap, the new
    /// target wins: index and release window reset immediately.
    pub fn scroll_to_section(&self, index: usize, now: Instant) {
        with_inner_notified(&self.inner, |inner| inner.scroll_to(index, now));
    }

    /// Fire every deferred task whose deadline has passed.
    pub fn tick(&self, now: Instant) {
        with_inner_notified(&self.inner, |inner| inner.tick(now));
    }

    /// Earliest pending deadline, for hosts scheduling their own wakeups.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.lock().unwrap().scheduler.next_deadline()
    }

    /// Current observable state.
    pub fn snapshot(&self) -> NavSnapshot {
        self.inner.lock().unwrap().snapshot()
    }

    pub fn current_section_index(&self) -> usize {
        self.snapshot().current_index
    }

    pub fn is_scrolling(&self) -> bool {
        self.snapshot().is_scrolling
    }

    pub fn is_mobile(&self) -> bool {
        self.snapshot().is_mobile
    }

    /// Register an observer for snapshot changes. Observers live until the
    /// controller detaches; a page-lifetime subscription needs no handle.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(NavSnapshot) + Send + Sync + 'static,
    {
        self.inner.lock().unwrap().observers.push(Arc::new(observer));
    }

    /// Get a cloneable read/tick handle to this controller.
    pub fn handle(&self) -> NavHandle {
        NavHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Teardown: cancel every pending timer and turn all entry points into
    /// no-ops. Called automatically on drop.
    pub fn detach(&self) {
        with_inner_notified(&self.inner, |inner| inner.detach());
    }
}

impl Drop for SnapController {
    fn drop(&mut self) {
        self.detach();
    }
}

// ============================================================================
// Shared Handle
// ============================================================================

/// A weak handle to a [`SnapController`]
///
/// Handed to indicator UI and tick drivers. It does not keep the
/// controller alive; once the owning view drops it, reads answer inert
/// defaults and ticks do nothing.
#[derive(Clone)]
pub struct NavHandle {
    inner: Weak<Mutex<ControllerInner>>,
}

impl NavHandle {
    /// Observable state, or None once the controller is gone.
    pub fn snapshot(&self) -> Option<NavSnapshot> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().snapshot())
    }

    /// Index of the last section navigated to (0 when the controller is
    /// gone).
    pub fn current_section_index(&self) -> usize {
        self.snapshot().map(|s| s.current_index).unwrap_or(0)
    }

    /// True while a burst is accumulating (false when the controller is
    /// gone).
    pub fn is_scrolling(&self) -> bool {
        self.snapshot().map(|s| s.is_scrolling).unwrap_or(false)
    }

    /// True in narrow-viewport mode (false when the controller is gone).
    pub fn is_mobile(&self) -> bool {
        self.snapshot().map(|s| s.is_mobile).unwrap_or(false)
    }

    /// Drive pending timers through the handle. A dead handle ticks
    /// nothing.
    pub fn tick(&self, now: Instant) {
        if let Some(inner) = self.inner.upgrade() {
            with_inner_notified(&inner, |inner| inner.tick(now));
        }
    }

    /// Earliest pending deadline, or None when idle or gone.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().scheduler.next_deadline())
    }
}
