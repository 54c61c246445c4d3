//! Snap execution
//!
//! Fires the host's animated scroll for a decided target and bounds the
//! move with a fixed-duration release task. The executor does not wait for
//! a completion signal — the host owns the animation; the release task is
//! the configured upper bound on its length.

use std::time::{Duration, Instant};

use pagesnap_timing::{TaskId, TaskScheduler};

use crate::controller::NavTask;
use crate::registry::SectionRegistry;

/// Performs animated moves and tracks the in-flight release window
#[derive(Default)]
pub struct SnapExecutor {
    release: Option<TaskId>,
}

impl SnapExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin an animated move to `index`.
    ///
    /// Out-of-range indices are silently ignored. A move issued while one
    /// is already in flight cancels the prior release task and opens a
    /// fresh full-duration window for the new target — the most recent
    /// intent wins.
    ///
    /// Returns true when a move was initiated.
    pub fn move_to(
        &mut self,
        index: usize,
        registry: &SectionRegistry,
        scheduler: &mut TaskScheduler<NavTask>,
        now: Instant,
        duration: Duration,
    ) -> bool {
        let Some(section) = registry.get(index) else {
            tracing::trace!("move_to({index}) out of range; ignoring");
            return false;
        };

        if let Some(prev) = self.release.take() {
            scheduler.cancel(prev);
        }

        section.target().align_to_top();
        self.release = Some(scheduler.schedule(now, duration, NavTask::Release));
        tracing::debug!("snap to section {index} begun ({duration:?} window)");
        true
    }

    /// The release task fired; the window is over.
    pub fn on_release(&mut self) {
        self.release = None;
    }

    /// True while a move's duration window is open.
    pub fn is_in_flight(&self) -> bool {
        self.release.is_some()
    }

    /// Cancel the release window (teardown).
    pub fn cancel(&mut self, scheduler: &mut TaskScheduler<NavTask>) {
        if let Some(id) = self.release.take() {
            scheduler.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesnap_core::{SharedSnapTarget, SnapTarget};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingTarget {
        align_calls: AtomicUsize,
    }

    impl CountingTarget {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                align_calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.align_calls.load(Ordering::Relaxed)
        }
    }

    impl SnapTarget for CountingTarget {
        fn offset_top(&self) -> f32 {
            0.0
        }

        fn align_to_top(&self) {
            self.align_calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    const WINDOW: Duration = Duration::from_millis(600);

    fn registry_of(targets: &[Arc<CountingTarget>]) -> SectionRegistry {
        let mut registry = SectionRegistry::new();
        for target in targets {
            registry.register(Arc::clone(target) as SharedSnapTarget);
        }
        registry
    }

    #[test]
    fn test_move_fires_align_and_schedules_release() {
        let target = CountingTarget::new();
        let registry = registry_of(&[Arc::clone(&target)]);
        let mut scheduler = TaskScheduler::new();
        let mut executor = SnapExecutor::new();
        let t0 = Instant::now();

        assert!(executor.move_to(0, &registry, &mut scheduler, t0, WINDOW));
        assert!(executor.is_in_flight());
        assert_eq!(target.calls(), 1);
        assert_eq!(scheduler.next_deadline(), Some(t0 + WINDOW));
    }

    #[test]
    fn test_out_of_range_is_silent_noop() {
        let registry = registry_of(&[]);
        let mut scheduler = TaskScheduler::new();
        let mut executor = SnapExecutor::new();

        assert!(!executor.move_to(0, &registry, &mut scheduler, Instant::now(), WINDOW));
        assert!(!executor.is_in_flight());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_retarget_replaces_release_window() {
        let first = CountingTarget::new();
        let second = CountingTarget::new();
        let registry = registry_of(&[Arc::clone(&first), Arc::clone(&second)]);
        let mut scheduler = TaskScheduler::new();
        let mut executor = SnapExecutor::new();
        let t0 = Instant::now();

        executor.move_to(0, &registry, &mut scheduler, t0, WINDOW);
        let mid = t0 + WINDOW / 2;
        executor.move_to(1, &registry, &mut scheduler, mid, WINDOW);

        // One release pending, timed from the retarget
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(mid + WINDOW));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[test]
    fn test_cancel_closes_window() {
        let target = CountingTarget::new();
        let registry = registry_of(&[target]);
        let mut scheduler = TaskScheduler::new();
        let mut executor = SnapExecutor::new();

        executor.move_to(0, &registry, &mut scheduler, Instant::now(), WINDOW);
        executor.cancel(&mut scheduler);

        assert!(!executor.is_in_flight());
        assert!(scheduler.is_empty());
    }
}
