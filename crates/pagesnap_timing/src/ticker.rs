//! Background tick driver
//!
//! Hosts with their own event loop call the controller's `tick(now)`
//! themselves. Hosts without one (headless embeddings, simulations) can
//! attach a `Ticker`: a background thread that invokes a callback at a
//! fixed period until stopped or dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A background thread driving a periodic tick callback
pub struct Ticker {
    stop_flag: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the tick thread.
    ///
    /// The callback receives the instant the period started; late wakeups
    /// stretch the period rather than bunching calls.
    pub fn spawn<F>(period: Duration, on_tick: F) -> Self
    where
        F: Fn(Instant) + Send + 'static,
    {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop_flag);

        let thread_handle = thread::spawn(move || {
            tracing::debug!("ticker started (period {:?})", period);
            while !thread_stop.load(Ordering::Relaxed) {
                let start = Instant::now();
                on_tick(start);

                // Sleep for remaining period time
                let elapsed = start.elapsed();
                if elapsed < period {
                    thread::sleep(period - elapsed);
                }
            }
            tracing::debug!("ticker stopped");
        });

        Self {
            stop_flag,
            thread_handle: Some(thread_handle),
        }
    }

    /// Stop the tick thread and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }

    /// Check if the tick thread is running
    pub fn is_running(&self) -> bool {
        self.thread_handle.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_ticks_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = Arc::clone(&count);

        let mut ticker = Ticker::spawn(Duration::from_millis(5), move |_now| {
            tick_count.fetch_add(1, Ordering::Relaxed);
        });
        assert!(ticker.is_running());

        thread::sleep(Duration::from_millis(60));
        ticker.stop();
        assert!(!ticker.is_running());

        let after_stop = count.load(Ordering::Relaxed);
        assert!(after_stop >= 2, "expected ticks before stop, got {after_stop}");

        // No further ticks once stopped
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::Relaxed), after_stop);
    }

    #[test]
    fn test_drop_stops_thread() {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = Arc::clone(&count);

        let ticker = Ticker::spawn(Duration::from_millis(5), move |_now| {
            tick_count.fetch_add(1, Ordering::Relaxed);
        });
        thread::sleep(Duration::from_millis(20));
        drop(ticker);

        let after_drop = count.load(Ordering::Relaxed);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::Relaxed), after_drop);
    }
}
