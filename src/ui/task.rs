// Background tasks started from the main thread
//
// A Task runs one closure on its own OS thread. The run loop polls
// `is_finished()` once per tick and drops finished tasks; dropping a Task
// joins its thread, so releasing a task never leaks a running thread.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Sets the finished flag when the worker exits, including by panic.
struct FinishGuard(Arc<AtomicBool>);

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// A unit of background work owned by the run loop until it completes
pub struct Task {
    id: TaskId,
    func: Option<Box<dyn FnOnce() + Send + 'static>>,
    handle: Option<JoinHandle<()>>,
    finished: Arc<AtomicBool>,
}

impl Task {
    pub fn new<F>(id: TaskId, func: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            id,
            func: Some(Box::new(func)),
            handle: None,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Start the closure on a new thread. Calling `run` twice is a no-op.
    pub fn run(&mut self) {
        let Some(func) = self.func.take() else {
            return;
        };

        // Moved into the closure so the flag is also set if the closure is
        // dropped without running.
        let guard = FinishGuard(Arc::clone(&self.finished));
        let spawned = std::thread::Builder::new()
            .name(format!("tickloop-{}", self.id))
            .spawn(move || {
                let _guard = guard;
                func();
            });

        match spawned {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => tracing::error!("Failed to spawn thread for {}: {}", self.id, e),
        }
    }

    /// Non-blocking poll of the completion flag
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Wait for the worker thread to exit
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("{} panicked", self.id);
            }
        }
    }
}

impl Drop for Task {
    fn drop(&mut self) {
        self.join();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("started", &self.func.is_none())
            .field("finished", &self.is_finished())
            .finish()
    }
}
