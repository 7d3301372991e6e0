// Run-loop state and lifecycle events
//
// This module provides the small state enums the run loop moves through and the
// EventBus that broadcasts lifecycle changes (windows added/destroyed, loop
// started/stopped, tasks finished) to interested listeners.

use crate::ui::task::TaskId;
use crate::ui::window::WindowId;
use tokio::sync::broadcast;

/// Whether the run loop has performed its entry transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not started, or fully stopped after the last window closed
    #[default]
    NotStarted,
    /// Backends prepared; ticks are being processed
    Running,
}

/// Outcome of one steady-state tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Continue,
    Done,
}

/// Lifecycle events emitted by the [`Application`](crate::ui::Application)
///
/// These are notifications only; nothing in the run loop waits for a listener.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    /// A window was shown and joined the live set
    WindowAdded { id: WindowId, uid: String },

    /// A window left the live set and is waiting for destruction
    WindowRemoved { id: WindowId },

    /// A window was torn down inside the run loop
    WindowDestroyed { id: WindowId },

    /// The last live window was removed
    QuitRequested,

    /// Backends prepared, first tick about to run
    RunLoopStarted,

    /// Tasks joined and backends torn down
    RunLoopStopped,

    TaskStarted { id: TaskId },

    TaskFinished { id: TaskId },

    /// `on_terminate()` completed
    Terminated,
}

/// Broadcast channel for [`AppEvent`]s
///
/// Cloning shares the same channel, so a clone handed to another thread sees the
/// same stream as the original.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// Create a bus buffering up to 256 events per lagging receiver
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    /// Emit an event. It's OK if no one is listening.
    pub fn emit(&self, event: AppEvent) {
        tracing::trace!("event: {:?}", event);
        let _ = self.tx.send(event);
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
