//! Headless window system and window.
//!
//! Used as the default backend when the embedder installs none, and by the
//! `tickloop` binary. There is no OS event source, so a wait simply sleeps for
//! the bounded interval, which keeps periodic ticks on schedule.

use crate::error::WindowSystemError;
use crate::models::TickEvent;
use crate::ui::window::{OsWindowHandle, Window};
use crate::ui::window_system::WindowSystem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_OS_HANDLE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Default)]
pub struct HeadlessWindowSystem {
    initialized: bool,
}

impl HeadlessWindowSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl WindowSystem for HeadlessWindowSystem {
    fn initialize(&mut self) -> Result<(), WindowSystemError> {
        tracing::debug!("Headless window system initialized");
        self.initialized = true;
        Ok(())
    }

    fn uninitialize(&mut self) {
        tracing::debug!("Headless window system uninitialized");
        self.initialized = false;
    }

    fn wait_events_timeout(&mut self, timeout: Duration) {
        std::thread::sleep(timeout);
    }

    fn name(&self) -> &str {
        "headless"
    }
}

/// A window with no OS surface that counts what the run loop delivered to it
#[derive(Debug)]
pub struct HeadlessWindow {
    uid: String,
    os_window: OsWindowHandle,
    visible: bool,
    ticks: u64,
    redraws: u64,
    last_tick: Option<TickEvent>,
}

impl HeadlessWindow {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            os_window: OsWindowHandle(NEXT_OS_HANDLE.fetch_add(1, Ordering::Relaxed)),
            visible: false,
            ticks: 0,
            redraws: 0,
            last_tick: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn last_tick(&self) -> Option<TickEvent> {
        self.last_tick
    }
}

impl Window for HeadlessWindow {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn os_window(&self) -> OsWindowHandle {
        self.os_window
    }

    fn show(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn on_resize(&mut self) {}

    fn on_tick_event(&mut self, event: &TickEvent) {
        self.ticks += 1;
        self.last_tick = Some(*event);
    }

    fn post_redraw(&mut self) {
        self.redraws += 1;
    }

    fn destroy_window(&mut self) {
        tracing::debug!(
            "Destroying headless window '{}' after {} ticks",
            self.uid,
            self.ticks
        );
        self.visible = false;
    }
}
