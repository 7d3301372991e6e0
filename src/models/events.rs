use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Periodic notification delivered to every live window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickEvent {
    /// Time since process start at which the tick was dispatched
    pub timestamp: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseEventKind {
    Move,
    ButtonDown,
    ButtonUp,
    Drag,
    Wheel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Middle,
    Right,
}

/// Mouse input, either from the native pump or injected by a remote client.
///
/// Serializable because the streaming backend receives these as JSON messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub button: MouseButton,
    #[serde(default)]
    pub modifiers: u32,
    /// Wheel delta, only meaningful for [`MouseEventKind::Wheel`]
    #[serde(default)]
    pub wheel_dy: f32,
}

impl MouseEvent {
    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            kind: MouseEventKind::Move,
            x,
            y,
            button: MouseButton::None,
            modifiers: 0,
            wheel_dy: 0.0,
        }
    }
}
