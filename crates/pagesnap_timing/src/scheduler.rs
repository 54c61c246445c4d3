//! Deferred task scheduler
//!
//! Holds one-shot tasks with absolute deadlines and hands their payloads
//! back once the owner's clock passes them. The scheduler never sleeps and
//! never spawns: the owner supplies `now` to both `schedule` and
//! `fire_due`, which keeps every timing property a matter of call order.
//!
//! Cancellation is structural. Task ids are versioned slotmap keys, so a
//! cancelled (or already fired) id refers to nothing — there is no window
//! in which a stale callback can fire after its cancellation.

use slotmap::{new_key_type, SlotMap};
use std::time::{Duration, Instant};

new_key_type! {
    /// Handle to a scheduled task
    pub struct TaskId;
}

struct Entry<T> {
    deadline: Instant,
    payload: T,
}

/// One-shot deadline tasks with explicit cancellation
///
/// `T` is the payload handed back when a task fires; controllers typically
/// use a small enum naming the deferred action.
pub struct TaskScheduler<T> {
    tasks: SlotMap<TaskId, Entry<T>>,
}

impl<T> TaskScheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
        }
    }

    /// Schedule a payload to fire once `delay` has elapsed past `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> TaskId {
        let deadline = now + delay;
        let id = self.tasks.insert(Entry { deadline, payload });
        tracing::trace!("scheduled task {:?} (+{:?})", id, delay);
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns false when the id has already fired or been cancelled —
    /// both are no-ops, never errors.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let cancelled = self.tasks.remove(id).is_some();
        if cancelled {
            tracing::trace!("cancelled task {:?}", id);
        }
        cancelled
    }

    /// Drop every pending task (teardown).
    pub fn clear(&mut self) {
        if !self.tasks.is_empty() {
            tracing::trace!("clearing {} pending task(s)", self.tasks.len());
        }
        self.tasks.clear();
    }

    /// True while the id refers to a pending task.
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Earliest pending deadline, for hosts that schedule their own wakeups.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.values().map(|entry| entry.deadline).min()
    }

    /// Remove and return the payloads of every task whose deadline has
    /// passed, in deadline order.
    ///
    /// A late `now` merely stretches the window; tasks still fire in
    /// deadline order relative to each other.
    pub fn fire_due(&mut self, now: Instant) -> Vec<T> {
        let mut due: Vec<(Instant, TaskId)> = self
            .tasks
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(id, entry)| (entry.deadline, id))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        due.into_iter()
            .filter_map(|(_, id)| self.tasks.remove(id).map(|entry| entry.payload))
            .collect()
    }
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_in_deadline_order() {
        let mut scheduler = TaskScheduler::new();
        let t0 = Instant::now();

        scheduler.schedule(t0, 30 * MS, "c");
        scheduler.schedule(t0, 10 * MS, "a");
        scheduler.schedule(t0, 20 * MS, "b");

        assert_eq!(scheduler.fire_due(t0 + 40 * MS), vec!["a", "b", "c"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_fires_only_past_deadlines() {
        let mut scheduler = TaskScheduler::new();
        let t0 = Instant::now();

        scheduler.schedule(t0, 10 * MS, "due");
        scheduler.schedule(t0, 50 * MS, "later");

        assert_eq!(scheduler.fire_due(t0 + 10 * MS), vec!["due"]);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.fire_due(t0 + 50 * MS), vec!["later"]);
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut scheduler = TaskScheduler::new();
        let t0 = Instant::now();

        let id = scheduler.schedule(t0, 10 * MS, "settle");
        assert!(scheduler.cancel(id));
        assert!(scheduler.fire_due(t0 + 20 * MS).is_empty());
    }

    #[test]
    fn test_stale_id_is_inert() {
        let mut scheduler = TaskScheduler::new();
        let t0 = Instant::now();

        let id = scheduler.schedule(t0, 10 * MS, "settle");
        assert_eq!(scheduler.fire_due(t0 + 10 * MS), vec!["settle"]);

        // Fired id: cancel is a no-op, not an error
        assert!(!scheduler.cancel(id));
        assert!(!scheduler.is_scheduled(id));

        // Slot reuse must not resurrect the old id
        let fresh = scheduler.schedule(t0, 10 * MS, "fresh");
        assert!(!scheduler.is_scheduled(id));
        assert!(scheduler.is_scheduled(fresh));
    }

    #[test]
    fn test_cancel_before_reschedule() {
        let mut scheduler = TaskScheduler::new();
        let t0 = Instant::now();

        // Debounce pattern: each observation replaces the pending settle
        let mut pending = scheduler.schedule(t0, 15 * MS, "settle");
        for i in 1u32..=3 {
            let now = t0 + i * 5 * MS;
            assert!(scheduler.cancel(pending));
            pending = scheduler.schedule(now, 15 * MS, "settle");
        }

        // Only the last reschedule survives
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.fire_due(t0 + 29 * MS).is_empty());
        assert_eq!(scheduler.fire_due(t0 + 30 * MS), vec!["settle"]);
    }

    #[test]
    fn test_next_deadline() {
        let mut scheduler = TaskScheduler::new();
        let t0 = Instant::now();

        assert_eq!(scheduler.next_deadline(), None);
        scheduler.schedule(t0, 30 * MS, "b");
        scheduler.schedule(t0, 10 * MS, "a");
        assert_eq!(scheduler.next_deadline(), Some(t0 + 10 * MS));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut scheduler = TaskScheduler::new();
        let t0 = Instant::now();

        scheduler.schedule(t0, 10 * MS, "a");
        scheduler.schedule(t0, 20 * MS, "b");
        scheduler.clear();

        assert!(scheduler.is_empty());
        assert!(scheduler.fire_due(t0 + 60 * MS).is_empty());
    }
}
