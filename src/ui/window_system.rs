//! Backend contracts consumed by the run loop.
//!
//! - [`WindowSystem`]: the native event pump, with an optional
//!   [`RemoteWindowSystem`] capability for streaming backends
//! - [`RenderEngine`]: process-wide rendering engine lifecycle
//! - [`EnvUnlocker`]: the cooperative lock of an embedding host runtime
//!
//! # Lock ordering
//!
//! The run loop releases the host lock (via [`EnvUnlocker::unlock`]) before it
//! blocks in [`WindowSystem::wait_events_timeout`] and before it waits on the
//! posted-callback mutex. The posted-callback mutex is released again before the
//! host lock is re-acquired and before any callback runs. A producer may therefore
//! hold its host lock while posting without ever deadlocking against the loop.

use crate::error::WindowSystemError;
use crate::models::MouseEvent;
use crate::ui::window::OsWindowHandle;
use camino::Utf8Path;
use std::time::Duration;

/// Called by a remote backend with the target window uid and the event.
pub type MouseEventCallback = Box<dyn Fn(&str, MouseEvent) + Send + Sync + 'static>;

/// Called by a remote backend to force a redraw of the window with the given uid.
pub type RedrawCallback = Box<dyn Fn(&str) + Send + Sync + 'static>;

/// Native event pump
pub trait WindowSystem {
    fn initialize(&mut self) -> Result<(), WindowSystemError>;

    fn uninitialize(&mut self);

    /// Pump native events, blocking for at most `timeout` when none are queued
    fn wait_events_timeout(&mut self, timeout: Duration);

    /// Streaming capability, `None` for native backends
    fn as_remote(&mut self) -> Option<&mut dyn RemoteWindowSystem> {
        None
    }

    /// Short name for logs
    fn name(&self) -> &str {
        "native"
    }
}

/// A window system that renders to remote clients
///
/// Clients send input addressed by window uid; the controller translates the
/// uid to an OS window on the main thread and injects the event back here.
pub trait RemoteWindowSystem: WindowSystem {
    fn set_mouse_event_callback(&mut self, callback: MouseEventCallback);

    fn set_redraw_callback(&mut self, callback: RedrawCallback);

    /// Start serving clients. Must be a no-op if already started.
    fn start_server(&mut self);

    fn post_mouse_event(&mut self, window: OsWindowHandle, event: MouseEvent);

    fn post_redraw_event(&mut self, window: OsWindowHandle);
}

/// Process-wide rendering engine
pub trait RenderEngine {
    fn set_resource_path(&mut self, path: &Utf8Path);

    /// Select and create the rendering backend before the first frame
    fn select_backend(&mut self);

    /// Destroy the engine instance. Windows created afterwards need a new `select_backend`.
    fn destroy_instance(&mut self);
}

/// Rendering engine used when the embedder does not install one
#[derive(Debug, Default)]
pub struct NullRenderEngine;

impl RenderEngine for NullRenderEngine {
    fn set_resource_path(&mut self, path: &Utf8Path) {
        tracing::debug!("NullRenderEngine resource path: {}", path);
    }

    fn select_backend(&mut self) {}

    fn destroy_instance(&mut self) {}
}

/// Cooperative lock held by an embedding host runtime (e.g. an interpreter lock)
///
/// `unlock` and `relock` always come in pairs within one run-loop step.
pub trait EnvUnlocker {
    fn unlock(&mut self);

    fn relock(&mut self);
}

/// Unlocker for hosts without a global lock, used by [`Application::run`](crate::ui::Application::run)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopUnlocker;

impl EnvUnlocker for NoopUnlocker {
    fn unlock(&mut self) {}

    fn relock(&mut self) {}
}
