//! Pagesnap Timing
//!
//! Deferred, cancellable, host-driven timers.
//!
//! # Features
//!
//! - **TaskScheduler**: One-shot deadline tasks keyed by versioned slotmap
//!   ids — a cancelled or fired task can never fire again
//! - **Host-driven**: Nothing sleeps inside the scheduler; the owner calls
//!   `fire_due(now)` and decides where `now` comes from
//! - **Ticker**: An optional background thread for hosts without their own
//!   frame loop, stopping on drop
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use pagesnap_timing::TaskScheduler;
//!
//! let mut scheduler: TaskScheduler<&str> = TaskScheduler::new();
//! let t0 = Instant::now();
//!
//! let id = scheduler.schedule(t0, Duration::from_millis(150), "settle");
//! scheduler.cancel(id);
//! assert!(scheduler.fire_due(t0 + Duration::from_millis(200)).is_empty());
//! ```

pub mod scheduler;
pub mod ticker;

pub use scheduler::{TaskId, TaskScheduler};
pub use ticker::Ticker;
