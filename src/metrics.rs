// Run-loop metrics
//
// Lightweight counters for what the run loop did: iterations, ticks, posted
// callbacks, background tasks and window teardown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Run-loop counters
///
/// Uses atomic operations so that `MainThreadPoster` clones on other threads can
/// count posts without taking the queue lock twice.
#[derive(Debug)]
pub struct RunLoopMetrics {
    /// Steady-state ticks processed
    pub iterations: AtomicU64,

    /// Periodic tick dispatches (each delivers to every live window)
    pub periodic_ticks: AtomicU64,

    /// Callbacks appended to the posted queue, from any thread
    pub callbacks_posted: AtomicU64,

    /// Callbacks invoked on the main thread
    pub callbacks_run: AtomicU64,

    /// Callbacks dropped because their target window was gone
    pub callbacks_skipped: AtomicU64,

    pub tasks_started: AtomicU64,

    /// Finished tasks joined and released
    pub tasks_reaped: AtomicU64,

    pub windows_added: AtomicU64,

    pub windows_destroyed: AtomicU64,

    start_time: Instant,
}

impl RunLoopMetrics {
    pub fn new() -> Self {
        Self {
            iterations: AtomicU64::new(0),
            periodic_ticks: AtomicU64::new(0),
            callbacks_posted: AtomicU64::new(0),
            callbacks_run: AtomicU64::new(0),
            callbacks_skipped: AtomicU64::new(0),
            tasks_started: AtomicU64::new(0),
            tasks_reaped: AtomicU64::new(0),
            windows_added: AtomicU64::new(0),
            windows_destroyed: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_iteration(&self) {
        self.iterations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_periodic_tick(&self) {
        self.periodic_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_posted(&self) {
        self.callbacks_posted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_callback_run(&self) {
        self.callbacks_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_callback_skipped(&self) {
        self.callbacks_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_task_started(&self) {
        self.tasks_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tasks_reaped(&self, count: usize) {
        self.tasks_reaped.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_window_added(&self) {
        self.windows_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_window_destroyed(&self) {
        self.windows_destroyed.fetch_add(1, Ordering::Relaxed);
    }

    /// Callbacks posted but not yet run or skipped
    pub fn callbacks_pending(&self) -> u64 {
        let posted = self.callbacks_posted.load(Ordering::Relaxed);
        let handled = self.callbacks_run.load(Ordering::Relaxed)
            + self.callbacks_skipped.load(Ordering::Relaxed);
        posted.saturating_sub(handled)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Run Loop Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Iterations: {}, periodic ticks: {}",
            self.iterations.load(Ordering::Relaxed),
            self.periodic_ticks.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Callbacks: {} posted, {} run, {} skipped",
            self.callbacks_posted.load(Ordering::Relaxed),
            self.callbacks_run.load(Ordering::Relaxed),
            self.callbacks_skipped.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Tasks: {} started, {} reaped; windows: {} added, {} destroyed",
            self.tasks_started.load(Ordering::Relaxed),
            self.tasks_reaped.load(Ordering::Relaxed),
            self.windows_added.load(Ordering::Relaxed),
            self.windows_destroyed.load(Ordering::Relaxed)
        );
    }
}

impl Default for RunLoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}
