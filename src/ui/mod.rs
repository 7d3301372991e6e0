// UI module - run loop, windows and cross-thread posting
//
// This module contains:
// - Application: The controller that owns windows, tasks and backends and runs the loop
// - MainThreadPoster: Hands callbacks from any thread to the next tick
// - Window / WindowSystem / RenderEngine: The contracts a GUI backend implements
// - Task: Background work started from the main thread
// - Headless backend used when no native backend is installed

pub mod bridge;
pub mod controller;
pub mod headless;
pub mod task;
pub mod window;
pub mod window_system;

pub use bridge::{MainThreadCallback, MainThreadPoster};
pub use controller::{Application, process_time};
pub use headless::{HeadlessWindow, HeadlessWindowSystem};
pub use task::{Task, TaskId};
pub use window::{DrawContextToken, OsWindowHandle, Window, WindowId};
pub use window_system::{
    EnvUnlocker, MouseEventCallback, NoopUnlocker, NullRenderEngine, RedrawCallback,
    RemoteWindowSystem, RenderEngine, WindowSystem,
};
