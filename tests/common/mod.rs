//! Shared fakes for the integration tests
//!
//! The application owns its windows and window system as boxed trait objects, so
//! every fake here shares a log with the test through `Rc<RefCell<..>>` (main
//! thread only) or `Arc<Mutex<..>>` (touched from other threads).

#![allow(dead_code)]

use camino::Utf8PathBuf;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tickloop::error::WindowSystemError;
use tickloop::models::{AppSettings, MenuItemId, MouseEvent, TickEvent};
use tickloop::services::NativeAlert;
use tickloop::ui::{
    Application, DrawContextToken, EnvUnlocker, MouseEventCallback, OsWindowHandle,
    RedrawCallback, RemoteWindowSystem, Window, WindowSystem,
};

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// Everything the run loop did to a [`RecordingWindow`]
#[derive(Debug, Default)]
pub struct WindowLog {
    pub visible: bool,
    pub shows: Vec<bool>,
    pub resizes: u32,
    pub ticks: Vec<TickEvent>,
    pub redraws: u32,
    pub destroyed: u32,
    pub context_switches: u32,
    pub context_restores: u32,
    pub menu_items: Vec<MenuItemId>,
    pub layouts: u32,
}

pub type SharedLog = Rc<RefCell<WindowLog>>;

pub struct RecordingWindow {
    uid: String,
    os_window: OsWindowHandle,
    active: bool,
    log: SharedLog,
}

impl RecordingWindow {
    pub fn new(uid: &str, os_window: u64) -> (Box<Self>, SharedLog) {
        let log = SharedLog::default();
        let window = Box::new(Self {
            uid: uid.to_string(),
            os_window: OsWindowHandle(os_window),
            active: false,
            log: Rc::clone(&log),
        });
        (window, log)
    }

    pub fn active(uid: &str, os_window: u64) -> (Box<Self>, SharedLog) {
        let (mut window, log) = Self::new(uid, os_window);
        window.active = true;
        (window, log)
    }
}

impl Window for RecordingWindow {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn os_window(&self) -> OsWindowHandle {
        self.os_window
    }

    fn show(&mut self, visible: bool) {
        let mut log = self.log.borrow_mut();
        log.visible = visible;
        log.shows.push(visible);
    }

    fn on_resize(&mut self) {
        self.log.borrow_mut().resizes += 1;
    }

    fn on_tick_event(&mut self, event: &TickEvent) {
        self.log.borrow_mut().ticks.push(*event);
    }

    fn post_redraw(&mut self) {
        self.log.borrow_mut().redraws += 1;
    }

    fn destroy_window(&mut self) {
        self.log.borrow_mut().destroyed += 1;
    }

    fn make_draw_context_current(&mut self) -> DrawContextToken {
        self.log.borrow_mut().context_switches += 1;
        DrawContextToken(Some(self.os_window.0))
    }

    fn restore_draw_context(&mut self, previous: DrawContextToken) {
        assert_eq!(previous, DrawContextToken(Some(self.os_window.0)));
        self.log.borrow_mut().context_restores += 1;
    }

    fn is_active_window(&self) -> bool {
        self.active
    }

    fn on_menu_item_selected(&mut self, item: MenuItemId) {
        self.log.borrow_mut().menu_items.push(item);
    }

    fn set_needs_layout(&mut self) {
        self.log.borrow_mut().layouts += 1;
    }
}

// ---------------------------------------------------------------------------
// Window systems
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct BackendLog {
    pub initialized: u32,
    pub uninitialized: u32,
    pub waits: u32,
}

/// Native-style window system whose wait sleeps for a fixed time
pub struct FakeWindowSystem {
    wait: Duration,
    fail_init: bool,
    log: Rc<RefCell<BackendLog>>,
}

impl FakeWindowSystem {
    pub fn new(wait: Duration) -> (Box<Self>, Rc<RefCell<BackendLog>>) {
        let log = Rc::new(RefCell::new(BackendLog::default()));
        let ws = Box::new(Self {
            wait,
            fail_init: false,
            log: Rc::clone(&log),
        });
        (ws, log)
    }

    pub fn failing() -> Box<Self> {
        let (mut ws, _) = Self::new(Duration::ZERO);
        ws.fail_init = true;
        ws
    }
}

impl WindowSystem for FakeWindowSystem {
    fn initialize(&mut self) -> Result<(), WindowSystemError> {
        if self.fail_init {
            return Err(WindowSystemError::InitializationFailed(
                "no display".to_string(),
            ));
        }
        self.log.borrow_mut().initialized += 1;
        Ok(())
    }

    fn uninitialize(&mut self) {
        self.log.borrow_mut().uninitialized += 1;
    }

    fn wait_events_timeout(&mut self, _timeout: Duration) {
        self.log.borrow_mut().waits += 1;
        if !self.wait.is_zero() {
            std::thread::sleep(self.wait);
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// What a [`FakeRemoteWindowSystem`] was asked to do, shared across threads
#[derive(Default)]
pub struct RemoteState {
    pub mouse_callback: Option<MouseEventCallback>,
    pub redraw_callback: Option<RedrawCallback>,
    pub mouse_callback_sets: u32,
    pub redraw_callback_sets: u32,
    pub servers_started: u32,
    pub injected_mouse: Vec<(OsWindowHandle, MouseEvent)>,
    pub injected_redraws: Vec<OsWindowHandle>,
}

/// Handle a "server thread" uses to send client input to the application
#[derive(Clone)]
pub struct RemoteClient(pub Arc<Mutex<RemoteState>>);

impl RemoteClient {
    pub fn send_mouse(&self, uid: &str, event: MouseEvent) {
        let state = self.0.lock().unwrap();
        let callback = state.mouse_callback.as_ref().expect("mouse callback not wired");
        callback(uid, event);
    }

    pub fn request_redraw(&self, uid: &str) {
        let state = self.0.lock().unwrap();
        let callback = state.redraw_callback.as_ref().expect("redraw callback not wired");
        callback(uid);
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, RemoteState> {
        self.0.lock().unwrap()
    }
}

pub struct FakeRemoteWindowSystem {
    state: Arc<Mutex<RemoteState>>,
}

impl FakeRemoteWindowSystem {
    pub fn new() -> (Box<Self>, RemoteClient) {
        let state = Arc::new(Mutex::new(RemoteState::default()));
        let ws = Box::new(Self {
            state: Arc::clone(&state),
        });
        (ws, RemoteClient(state))
    }
}

impl WindowSystem for FakeRemoteWindowSystem {
    fn initialize(&mut self) -> Result<(), WindowSystemError> {
        Ok(())
    }

    fn uninitialize(&mut self) {}

    fn wait_events_timeout(&mut self, _timeout: Duration) {}

    fn as_remote(&mut self) -> Option<&mut dyn RemoteWindowSystem> {
        Some(self)
    }

    fn name(&self) -> &str {
        "fake-remote"
    }
}

impl RemoteWindowSystem for FakeRemoteWindowSystem {
    fn set_mouse_event_callback(&mut self, callback: MouseEventCallback) {
        let mut state = self.state.lock().unwrap();
        state.mouse_callback = Some(callback);
        state.mouse_callback_sets += 1;
    }

    fn set_redraw_callback(&mut self, callback: RedrawCallback) {
        let mut state = self.state.lock().unwrap();
        state.redraw_callback = Some(callback);
        state.redraw_callback_sets += 1;
    }

    fn start_server(&mut self) {
        self.state.lock().unwrap().servers_started += 1;
    }

    fn post_mouse_event(&mut self, window: OsWindowHandle, event: MouseEvent) {
        self.state.lock().unwrap().injected_mouse.push((window, event));
    }

    fn post_redraw_event(&mut self, window: OsWindowHandle) {
        self.state.lock().unwrap().injected_redraws.push(window);
    }
}

// ---------------------------------------------------------------------------
// Host lock
// ---------------------------------------------------------------------------

/// A non-reentrant global lock like an interpreter lock, held across calls
#[derive(Default)]
pub struct HostLock {
    held: Mutex<bool>,
    released: Condvar,
}

impl HostLock {
    pub fn acquire(&self) {
        let mut held = self.held.lock().unwrap();
        while *held {
            held = self.released.wait(held).unwrap();
        }
        *held = true;
    }

    pub fn release(&self) {
        *self.held.lock().unwrap() = false;
        self.released.notify_all();
    }
}

/// Releases the host lock while the run loop blocks or waits on its own locks
pub struct HostLockUnlocker {
    pub lock: Arc<HostLock>,
    pub unlocks: u32,
}

impl HostLockUnlocker {
    pub fn new(lock: Arc<HostLock>) -> Self {
        Self { lock, unlocks: 0 }
    }
}

impl EnvUnlocker for HostLockUnlocker {
    fn unlock(&mut self) {
        self.unlocks += 1;
        self.lock.release();
    }

    fn relock(&mut self) {
        self.lock.acquire();
    }
}

// ---------------------------------------------------------------------------
// Alerts and setup helpers
// ---------------------------------------------------------------------------

/// Collects alert messages instead of opening a dialog
#[derive(Clone, Default)]
pub struct RecordingAlert(pub Arc<Mutex<Vec<String>>>);

impl RecordingAlert {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl NativeAlert for RecordingAlert {
    fn show_alert(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

/// A resource directory containing the default UI font
pub fn temp_resources() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    std::fs::write(path.join("Roboto-Medium.ttf"), b"font").unwrap();
    (temp_dir, path)
}

/// Default settings with a 1 ms wait bound, so tests tick quickly
pub fn fast_settings() -> AppSettings {
    let mut settings = AppSettings::default();
    settings.run_loop.wait_timeout_ms = 1;
    settings
}

/// An initialized application on a fake window system that never blocks
pub fn test_app(resources: &Utf8PathBuf) -> (Application, RecordingAlert, Rc<RefCell<BackendLog>>) {
    let mut app = Application::new(fast_settings());
    let (ws, backend) = FakeWindowSystem::new(Duration::ZERO);
    app.set_window_system(ws);

    let alert = RecordingAlert::default();
    app.set_native_alert(Box::new(alert.clone()));
    app.initialize(resources).unwrap();
    (app, alert, backend)
}
