//! Data models for tickloop.
//!
//! This module contains the plain data structures shared between the run loop,
//! the configuration layer and the window-system backends:
//! - [`AppSettings`]: Run-loop timing, resource location and logging options loaded from `tickloop.yaml`
//! - [`MouseEvent`] / [`TickEvent`]: Events delivered to windows or injected by a remote backend
//! - [`UserFontInfo`]: Extra fonts registered for a language or a set of code points
//! - [`Menubar`]: The application-wide menubar description
//!
//! # Architecture Note
//!
//! The models carry no behavior of their own. Everything that mutates them lives in
//! [`Application`](crate::ui::Application), which is only ever touched from the main thread.

pub mod events;
pub mod fonts;
pub mod menu;
pub mod settings;

pub use events::{MouseButton, MouseEvent, MouseEventKind, TickEvent};
pub use fonts::UserFontInfo;
pub use menu::{MenuItem, MenuItemId, Menubar};
pub use settings::{AppSettings, LoggingSettings, ResourceSettings, RunLoopSettings};
