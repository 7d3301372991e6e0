//! The window contract consumed by the run loop.
//!
//! The controller never looks inside a window. It only needs identity, visibility,
//! the tick/resize/redraw hooks, drawing-context switching for posted callbacks,
//! and an explicit teardown hook it calls at the one safe point in the loop.

use crate::models::{MenuItemId, TickEvent};
use std::fmt;

/// Opaque identity assigned by [`Application::add_window`](crate::ui::Application::add_window).
///
/// Ids are never reused, so a stale id cannot refer to a newer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub(crate) u64);

impl WindowId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Native handle of the OS window backing a [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OsWindowHandle(pub u64);

/// Whatever drawing context was current before a window made its own current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawContextToken(pub Option<u64>);

/// A UI surface managed by the [`Application`](crate::ui::Application)
///
/// Implementations own their OS resources. `destroy_window` is called exactly once,
/// from inside the run loop, and the box is dropped right after.
pub trait Window {
    /// Stable identity string, e.g. what a remote client uses to address the window
    fn uid(&self) -> &str;

    fn os_window(&self) -> OsWindowHandle;

    fn show(&mut self, visible: bool);

    fn on_resize(&mut self);

    fn on_tick_event(&mut self, event: &TickEvent);

    fn post_redraw(&mut self);

    /// Release OS resources. Never called while a callback of this window is on the stack.
    fn destroy_window(&mut self);

    fn make_draw_context_current(&mut self) -> DrawContextToken {
        DrawContextToken::default()
    }

    fn restore_draw_context(&mut self, _previous: DrawContextToken) {}

    fn is_active_window(&self) -> bool {
        false
    }

    fn on_menu_item_selected(&mut self, _item: MenuItemId) {}

    fn set_needs_layout(&mut self) {}
}
