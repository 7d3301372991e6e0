// Main-thread posting - hands work from any thread to the run loop
//
// Producers on any thread append (target window, callback) pairs under a mutex.
// The run loop takes the whole queue once per tick and runs the entries on the
// main thread in the order they were posted.
//
// The mutex is only ever held for a push or a swap. It is never held while a
// callback runs or while the run loop re-acquires a host lock; see
// `window_system` for the full lock-ordering rule.

use crate::metrics::RunLoopMetrics;
use crate::ui::controller::Application;
use crate::ui::window::WindowId;
use std::sync::{Arc, Mutex, PoisonError};

/// Work executed on the main thread with access to the controller
pub type MainThreadCallback = Box<dyn FnOnce(&mut Application) + Send + 'static>;

/// One queued callback
pub struct Posted {
    /// When set, the callback is skipped if this window is no longer live
    pub window: Option<WindowId>,
    pub callback: MainThreadCallback,
}

impl std::fmt::Debug for Posted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Posted")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// FIFO of posted callbacks shared between producers and the run loop
#[derive(Debug, Default)]
pub struct PostedQueue {
    entries: Mutex<Vec<Posted>>,
}

impl PostedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, posted: Posted) {
        self.lock().push(posted);
    }

    /// Swap out everything queued so far, leaving the queue empty
    pub fn take_all(&self) -> Vec<Posted> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hold the queue lock from a test, to make a producer and the drain contend
    #[cfg(test)]
    pub(crate) fn lock_entries(&self) -> std::sync::MutexGuard<'_, Vec<Posted>> {
        self.lock()
    }

    // A producer that panicked mid-push cannot leave the Vec inconsistent, so
    // a poisoned lock is still safe to use.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Posted>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable, thread-safe handle for posting work to the main thread
///
/// Obtained from [`Application::poster`]. Posting never blocks on the run loop
/// beyond the short queue lock, and posted work is never dropped: it runs on the
/// next tick unless its target window has been removed in the meantime.
///
/// # Example
/// ```ignore
/// let poster = app.poster();
/// std::thread::spawn(move || {
///     let result = expensive_computation();
///     poster.post(Some(window_id), move |app| {
///         app.remove_window(window_id);
///         drop(result);
///     });
/// });
/// ```
#[derive(Clone)]
pub struct MainThreadPoster {
    queue: Arc<PostedQueue>,
    metrics: Arc<RunLoopMetrics>,
}

impl MainThreadPoster {
    pub(crate) fn new(queue: Arc<PostedQueue>, metrics: Arc<RunLoopMetrics>) -> Self {
        Self { queue, metrics }
    }

    /// Queue `callback` for the main thread
    ///
    /// With `window` set, the callback runs with that window's drawing context
    /// current and the window is redrawn afterwards.
    pub fn post<F>(&self, window: Option<WindowId>, callback: F)
    where
        F: FnOnce(&mut Application) + Send + 'static,
    {
        self.queue.push(Posted {
            window,
            callback: Box::new(callback),
        });
        self.metrics.record_posted();
    }

    /// Number of callbacks waiting for the next tick
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl std::fmt::Debug for MainThreadPoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainThreadPoster")
            .field("pending", &self.pending())
            .finish()
    }
}
