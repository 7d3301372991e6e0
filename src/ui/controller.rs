// Application controller - the run loop and window/task lifecycle
//
// This module contains the Application, which owns:
// - the live windows and the windows waiting for destruction
// - the queue of callbacks posted from other threads
// - the background tasks started from the main thread
// - the window-system and render-engine backends
//
// Each call to `run_one_tick` pumps native events, fires the periodic tick,
// drains posted callbacks, reaps finished tasks and destroys removed windows,
// in that order, then reports whether the loop should keep going.

use crate::error::{AppError, WindowSystemError};
use crate::metrics::RunLoopMetrics;
use crate::models::settings::DEFAULT_TICK_THRESHOLD;
use crate::models::{AppSettings, MenuItemId, Menubar, MouseEvent, TickEvent, UserFontInfo};
use crate::services::alert::{NativeAlert, RfdAlert};
use crate::services::resources::{find_font_path, find_resource_path};
use crate::state::{AppEvent, EventBus, RunState, RunStatus};
use crate::ui::bridge::{MainThreadPoster, Posted, PostedQueue};
use crate::ui::headless::HeadlessWindowSystem;
use crate::ui::task::{Task, TaskId};
use crate::ui::window::{OsWindowHandle, Window, WindowId};
use crate::ui::window_system::{
    EnvUnlocker, NoopUnlocker, NullRenderEngine, RenderEngine, WindowSystem,
};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Monotonic time since the first call in this process
pub fn process_time() -> Duration {
    PROCESS_START.get_or_init(Instant::now).elapsed()
}

/// Application controller that drives every window in the process
///
/// This is the main coordinator for the GUI layer. It:
/// - Keeps the set of live windows and delivers periodic ticks to them
/// - Defers window destruction to a fixed point inside the run loop
/// - Runs callbacks posted from any thread (see [`MainThreadPoster`])
/// - Tracks background [`Task`]s and joins them when they finish
/// - Prepares and tears down the window-system and render-engine backends
///
/// `Application` is deliberately not `Send`: all of the above is main-thread
/// state. Other threads interact with it only through [`MainThreadPoster`].
///
/// # Example
/// ```ignore
/// let mut app = Application::new(AppSettings::default());
/// app.initialize("resources")?;
///
/// let id = app.add_window(Box::new(HeadlessWindow::new("main")));
/// let poster = app.poster();
/// std::thread::spawn(move || {
///     poster.post(None, move |app| app.remove_window(id));
/// });
///
/// app.run(); // returns once the last window is gone
/// ```
pub struct Application {
    settings: AppSettings,

    /// Resource path and font resolved by `initialize`
    initialized: bool,
    resource_path: Option<Utf8PathBuf>,
    font_path: Option<Utf8PathBuf>,
    fonts: Vec<UserFontInfo>,
    menubar: Option<Menubar>,

    run_state: RunState,

    /// Set when the live set becomes empty, cleared when a tick reports done
    should_quit: bool,

    /// Time of the last periodic tick; `None` until the first one
    last_tick: Option<Duration>,

    window_system: Option<Box<dyn WindowSystem>>,
    window_system_initialized: bool,
    render_engine: Box<dyn RenderEngine>,
    render_engine_prepared: bool,

    /// Remote backend callbacks are installed once per process
    remote_wired: bool,

    alert: Box<dyn NativeAlert>,

    windows: IndexMap<WindowId, Box<dyn Window>>,
    pending_destruction: Vec<(WindowId, Box<dyn Window>)>,
    next_window_id: u64,

    posted: Arc<PostedQueue>,

    running_tasks: Vec<Task>,
    next_task_id: u64,

    events: EventBus,
    metrics: Arc<RunLoopMetrics>,
}

impl Application {
    /// Create a controller with no windows and no backends prepared
    ///
    /// The window system defaults to [`HeadlessWindowSystem`] and the render
    /// engine to [`NullRenderEngine`] unless replaced before `initialize`.
    pub fn new(mut settings: AppSettings) -> Self {
        // Anchor process time no later than the first controller
        let _ = process_time();

        if !settings.run_loop.tick_threshold.is_finite() {
            tracing::warn!(
                "Invalid tick_threshold {}, using {}",
                settings.run_loop.tick_threshold,
                DEFAULT_TICK_THRESHOLD
            );
            settings.run_loop.tick_threshold = DEFAULT_TICK_THRESHOLD;
        }

        Self {
            settings,
            initialized: false,
            resource_path: None,
            font_path: None,
            fonts: Vec::new(),
            menubar: None,
            run_state: RunState::NotStarted,
            should_quit: false,
            last_tick: None,
            window_system: None,
            window_system_initialized: false,
            render_engine: Box::new(NullRenderEngine),
            render_engine_prepared: false,
            remote_wired: false,
            alert: Box::new(RfdAlert::default()),
            windows: IndexMap::new(),
            pending_destruction: Vec::new(),
            next_window_id: 1,
            posted: Arc::new(PostedQueue::new()),
            running_tasks: Vec::new(),
            next_task_id: 1,
            events: EventBus::new(),
            metrics: Arc::new(RunLoopMetrics::new()),
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    // ------------------------------------------------------------------
    // Initialization and backends
    // ------------------------------------------------------------------

    /// Record the resource directory and prepare the backends
    ///
    /// Backends are prepared on every call, since the run loop may have been
    /// stopped and restarted since the last one. The resource path is only
    /// recorded the first time.
    ///
    /// A missing resource directory is logged here but only reported to the
    /// user when the run loop starts.
    pub fn initialize(&mut self, resource_path: impl AsRef<Utf8Path>) -> Result<(), AppError> {
        self.prepare_for_running()?;

        if self.initialized {
            return Ok(());
        }

        let resource_path = resource_path.as_ref().to_path_buf();
        if !resource_path.is_dir() {
            tracing::warn!("Resource directory does not exist: {}", resource_path);
        }

        self.render_engine.set_resource_path(&resource_path);
        self.font_path = Some(resource_path.join(&self.settings.resources.font_file));
        self.resource_path = Some(resource_path);
        self.initialized = true;

        tracing::info!(
            "Application initialized: resources={}, font={}",
            self.resource_path.as_deref().map(Utf8Path::as_str).unwrap_or_default(),
            self.font_path.as_deref().map(Utf8Path::as_str).unwrap_or_default()
        );
        Ok(())
    }

    /// Initialize with the resource directory found next to `argv0`
    pub fn initialize_from_args(&mut self, argv0: &str) -> Result<(), AppError> {
        let path = find_resource_path(argv0);
        self.initialize(path)
    }

    /// Initialize assuming the working directory holds the executable
    pub fn initialize_from_cwd(&mut self) -> Result<(), AppError> {
        let cwd = std::env::current_dir()
            .ok()
            .and_then(|p| Utf8PathBuf::try_from(p).ok())
            .unwrap_or_else(|| Utf8PathBuf::from("."));
        self.initialize_from_args(cwd.join("tickloop").as_str())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Fails with [`AppError::NotInitialized`] if `initialize` has not run
    pub fn verify_is_initialized(&self) -> Result<(), AppError> {
        if self.initialized {
            return Ok(());
        }
        tracing::warn!("Application::initialize() was not called");
        Err(AppError::NotInitialized)
    }

    pub fn resource_path(&self) -> Option<&Utf8Path> {
        self.resource_path.as_deref()
    }

    /// Full path of the UI font, known after `initialize`
    pub fn font_path(&self) -> Option<&Utf8Path> {
        self.font_path.as_deref()
    }

    pub fn window_system(&self) -> Option<&dyn WindowSystem> {
        self.window_system.as_deref()
    }

    /// Install the window-system backend
    ///
    /// # Panics
    ///
    /// Panics if a window system is already installed, including the default one
    /// created by `initialize`. Replacing a live backend would orphan its windows.
    pub fn set_window_system(&mut self, window_system: Box<dyn WindowSystem>) {
        assert!(
            self.window_system.is_none(),
            "set_window_system() called after a window system was already set"
        );
        tracing::info!("Window system set: {}", window_system.name());
        self.window_system = Some(window_system);
        self.window_system_initialized = false;
    }

    pub fn set_render_engine(&mut self, engine: Box<dyn RenderEngine>) {
        self.render_engine = engine;
        self.render_engine_prepared = false;
    }

    pub fn set_native_alert(&mut self, alert: Box<dyn NativeAlert>) {
        self.alert = alert;
    }

    fn init_window_system(&mut self) -> Result<(), WindowSystemError> {
        let window_system = self.window_system.get_or_insert_with(|| {
            tracing::info!("No window system set, using headless");
            Box::new(HeadlessWindowSystem::new())
        });

        if !self.window_system_initialized {
            window_system.initialize()?;
            self.window_system_initialized = true;
            tracing::debug!("Window system '{}' initialized", window_system.name());
        }
        Ok(())
    }

    fn prepare_for_running(&mut self) -> Result<(), AppError> {
        self.init_window_system()?;

        if !self.render_engine_prepared {
            self.render_engine.select_backend();
            self.render_engine_prepared = true;
        }
        Ok(())
    }

    /// Tear down the render engine and window system if they were prepared
    fn cleanup_after_running(&mut self) {
        if self.render_engine_prepared {
            self.render_engine.destroy_instance();
            self.render_engine_prepared = false;
        }

        if self.window_system_initialized {
            if let Some(window_system) = self.window_system.as_deref_mut() {
                window_system.uninitialize();
            }
            self.window_system_initialized = false;
        }
    }

    // ------------------------------------------------------------------
    // Fonts and menus
    // ------------------------------------------------------------------

    /// Use `font` for text in language `lang_code`
    ///
    /// Fonts that cannot be found are logged and ignored.
    pub fn set_font_for_language(&mut self, font: &str, lang_code: &str) {
        let Some(path) = find_font_path(font) else {
            tracing::warn!("Could not find font '{}'", font);
            return;
        };
        self.fonts.push(UserFontInfo {
            path,
            lang: lang_code.to_string(),
            code_points: Vec::new(),
        });
    }

    /// Use `font` for the given Unicode code points
    pub fn set_font_for_code_points(&mut self, font: &str, code_points: &[u32]) {
        let Some(path) = find_font_path(font) else {
            tracing::warn!("Could not find font '{}'", font);
            return;
        };
        self.fonts.push(UserFontInfo {
            path,
            lang: String::new(),
            code_points: code_points.to_vec(),
        });
    }

    pub fn user_font_info(&self) -> &[UserFontInfo] {
        &self.fonts
    }

    pub fn menubar(&self) -> Option<&Menubar> {
        self.menubar.as_ref()
    }

    /// Install or remove the menubar
    ///
    /// Adding or removing a menubar changes the content area of every window,
    /// so each live window is resized.
    pub fn set_menubar(&mut self, menubar: Option<Menubar>) {
        let had_menubar = self.menubar.is_some();
        let has_menubar = menubar.is_some();
        self.menubar = menubar;

        if had_menubar != has_menubar {
            for window in self.windows.values_mut() {
                window.on_resize();
            }
        }
    }

    /// Route a native menu selection to the active window
    pub fn on_menu_item_selected(&mut self, item: MenuItemId) {
        let Some(window) = self.windows.values_mut().find(|w| w.is_active_window()) else {
            tracing::debug!("Menu item {} selected with no active window", item);
            return;
        };

        window.on_menu_item_selected(item);
        // A dialog opened by the item can take two layout passes to settle,
        // and two plain redraws would be coalesced.
        window.set_needs_layout();
        window.post_redraw();
    }

    /// Seconds since process start
    pub fn now(&self) -> f64 {
        process_time().as_secs_f64()
    }

    // ------------------------------------------------------------------
    // Window lifecycle
    // ------------------------------------------------------------------

    /// Show `window` and add it to the live set
    ///
    /// The window gets one `on_resize` for its initial layout, then `show(true)`.
    /// With a remote window system, the first call also wires the backend's
    /// input and redraw callbacks and starts its server.
    pub fn add_window(&mut self, mut window: Box<dyn Window>) -> WindowId {
        self.wire_remote_backend();

        window.on_resize();
        window.show(true);

        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;

        let uid = window.uid().to_string();
        tracing::debug!("Adding window '{}' as {}", uid, id);
        self.windows.insert(id, window);

        self.metrics.record_window_added();
        self.events.emit(AppEvent::WindowAdded { id, uid });
        id
    }

    /// Hide a live window and schedule it for destruction
    ///
    /// The window is destroyed at the end of the next tick, never inside this
    /// call, so it is safe to remove a window from one of its own callbacks.
    /// Removing the last live window requests quit. Unknown or already removed
    /// ids are ignored.
    pub fn remove_window(&mut self, id: WindowId) {
        let Some(mut window) = self.windows.swap_remove(&id) else {
            tracing::debug!("remove_window: {} is not live", id);
            return;
        };

        window.show(false);
        self.pending_destruction.push((id, window));
        self.events.emit(AppEvent::WindowRemoved { id });

        if self.windows.is_empty() {
            tracing::info!("Last window removed, quitting run loop");
            self.should_quit = true;
            self.events.emit(AppEvent::QuitRequested);
        }
    }

    /// Remove every live window; the run loop finishes on its next tick
    pub fn quit(&mut self) {
        while let Some(id) = self.windows.keys().next().copied() {
            self.remove_window(id);
        }
    }

    /// Identity strings of the live windows, in no particular order
    pub fn window_uids(&self) -> Vec<String> {
        self.windows.values().map(|w| w.uid().to_string()).collect()
    }

    pub fn find_window_by_uid(&self, uid: &str) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|(_, window)| window.uid() == uid)
            .map(|(id, _)| *id)
    }

    pub fn window(&self, id: WindowId) -> Option<&dyn Window> {
        self.windows.get(&id).map(|w| w.as_ref())
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut (dyn Window + 'static)> {
        self.windows.get_mut(&id).map(|w| w.as_mut())
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Windows removed but not yet destroyed
    pub fn pending_destruction_ids(&self) -> Vec<WindowId> {
        self.pending_destruction.iter().map(|(id, _)| *id).collect()
    }

    /// Live window first, then a window awaiting destruction
    fn window_entry_mut(&mut self, id: WindowId) -> Option<&mut (dyn Window + 'static)> {
        match self.windows.get_mut(&id) {
            Some(window) => Some(window.as_mut()),
            None => self
                .pending_destruction
                .iter_mut()
                .find(|(pending_id, _)| *pending_id == id)
                .map(|(_, window)| window.as_mut()),
        }
    }

    fn os_window_for_uid(&self, uid: &str) -> Option<OsWindowHandle> {
        self.windows
            .values()
            .find(|w| w.uid() == uid)
            .map(|w| w.os_window())
    }

    /// Install remote-backend callbacks once per process
    ///
    /// The callbacks run on the backend's server thread, so they only post to
    /// the main thread; uid lookup and injection happen there.
    fn wire_remote_backend(&mut self) {
        if self.remote_wired {
            return;
        }

        let poster = self.poster();
        let Some(remote) = self
            .window_system
            .as_deref_mut()
            .and_then(|ws| ws.as_remote())
        else {
            return;
        };

        let mouse_poster = poster.clone();
        remote.set_mouse_event_callback(Box::new(move |uid: &str, event: MouseEvent| {
            let uid = uid.to_string();
            mouse_poster.post(None, move |app| app.forward_remote_mouse_event(&uid, event));
        }));

        remote.set_redraw_callback(Box::new(move |uid: &str| {
            let uid = uid.to_string();
            poster.post(None, move |app| app.forward_remote_redraw(&uid));
        }));

        remote.start_server();
        self.remote_wired = true;
        tracing::info!("Remote window system wired and server started");
    }

    fn forward_remote_mouse_event(&mut self, uid: &str, event: MouseEvent) {
        let Some(os_window) = self.os_window_for_uid(uid) else {
            tracing::debug!("Mouse event for unknown window '{}'", uid);
            return;
        };
        if let Some(remote) = self
            .window_system
            .as_deref_mut()
            .and_then(|ws| ws.as_remote())
        {
            remote.post_mouse_event(os_window, event);
        }
    }

    fn forward_remote_redraw(&mut self, uid: &str) {
        let Some(os_window) = self.os_window_for_uid(uid) else {
            tracing::debug!("Redraw request for unknown window '{}'", uid);
            return;
        };
        if let Some(remote) = self
            .window_system
            .as_deref_mut()
            .and_then(|ws| ws.as_remote())
        {
            remote.post_redraw_event(os_window);
        }
    }

    // ------------------------------------------------------------------
    // Posting and background tasks
    // ------------------------------------------------------------------

    /// Handle for posting to this controller from any thread
    pub fn poster(&self) -> MainThreadPoster {
        MainThreadPoster::new(Arc::clone(&self.posted), Arc::clone(&self.metrics))
    }

    /// Queue `callback` for the next tick. See [`MainThreadPoster::post`].
    pub fn post_to_main_thread<F>(&self, window: Option<WindowId>, callback: F)
    where
        F: FnOnce(&mut Application) + Send + 'static,
    {
        self.posted.push(Posted {
            window,
            callback: Box::new(callback),
        });
        self.metrics.record_posted();
    }

    /// Start `func` on a background task right away
    ///
    /// The task is reaped on the first tick after it finishes, and joined when
    /// the run loop stops.
    pub fn run_in_thread<F>(&mut self, func: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = TaskId(self.next_task_id);
        self.next_task_id += 1;

        let mut task = Task::new(id, func);
        task.run();
        self.running_tasks.push(task);

        self.metrics.record_task_started();
        self.events.emit(AppEvent::TaskStarted { id });
        id
    }

    pub fn running_task_count(&self) -> usize {
        self.running_tasks.len()
    }

    // ------------------------------------------------------------------
    // Run loop
    // ------------------------------------------------------------------

    /// Run until the last window is closed
    pub fn run(&mut self) {
        let mut unlocker = NoopUnlocker;
        let cleanup = self.settings.run_loop.cleanup_if_no_windows;
        while self.run_one_tick(&mut unlocker, cleanup) {}
    }

    /// Perform one iteration of the run loop
    ///
    /// The first call after construction (or after a full stop) verifies that
    /// `initialize` ran and that the resource directory and UI font exist. On
    /// failure a native alert is shown and `false` is returned without starting.
    ///
    /// Returns `false` once the tick observes that the last window was removed.
    /// With `cleanup_if_no_windows`, that tick also joins every background task
    /// and tears down the backends, so the loop can be started again later.
    pub fn run_one_tick(
        &mut self,
        unlocker: &mut dyn EnvUnlocker,
        cleanup_if_no_windows: bool,
    ) -> bool {
        if self.run_state == RunState::NotStarted {
            if let Err(e) = self.start_running() {
                tracing::error!("Cannot start run loop: {}", e);
                self.alert.show_alert(&e.to_string());
                return false;
            }
        }

        let status = self.process_queued_events(unlocker);

        if status == RunStatus::Done {
            if cleanup_if_no_windows {
                self.stop_running();
            }
            // Otherwise the next call would be done immediately, too
            self.should_quit = false;
        }

        status == RunStatus::Continue
    }

    fn start_running(&mut self) -> Result<(), AppError> {
        self.verify_startup()?;
        self.prepare_for_running()?;

        self.run_state = RunState::Running;
        self.events.emit(AppEvent::RunLoopStarted);
        tracing::info!("Run loop started");
        Ok(())
    }

    fn verify_startup(&self) -> Result<(), AppError> {
        self.verify_is_initialized()?;

        let (Some(resource_path), Some(font_path)) = (&self.resource_path, &self.font_path) else {
            return Err(AppError::NotInitialized);
        };

        if !resource_path.is_dir() {
            return Err(AppError::MissingResourceDirectory(resource_path.clone()));
        }
        if !font_path.is_file() {
            return Err(AppError::MissingFont(font_path.clone()));
        }
        Ok(())
    }

    fn stop_running(&mut self) {
        if !self.running_tasks.is_empty() {
            tracing::info!(
                "Waiting for {} background task(s) to finish",
                self.running_tasks.len()
            );
        }

        let tasks = std::mem::take(&mut self.running_tasks);
        let joined = tasks.len();
        for task in tasks {
            let id = task.id();
            drop(task);
            self.events.emit(AppEvent::TaskFinished { id });
        }
        self.metrics.record_tasks_reaped(joined);

        self.run_state = RunState::NotStarted;
        // A restarted loop ticks its windows right away
        self.last_tick = None;
        self.cleanup_after_running();

        self.events.emit(AppEvent::RunLoopStopped);
        tracing::info!("Run loop stopped");
        self.metrics.log_summary();
    }

    /// The steady-state tick
    fn process_queued_events(&mut self, unlocker: &mut dyn EnvUnlocker) -> RunStatus {
        self.metrics.record_iteration();

        // Don't hold the host lock while blocked in the OS
        unlocker.unlock();
        let timeout = self.settings.run_loop.wait_timeout();
        if let Some(window_system) = self.window_system.as_deref_mut() {
            window_system.wait_events_timeout(timeout);
        }
        unlocker.relock();

        self.dispatch_periodic_tick();
        self.drain_posted(unlocker);
        self.reap_finished_tasks();

        // The only place windows are destroyed during normal operation
        self.destroy_pending_windows();

        if self.should_quit {
            RunStatus::Done
        } else {
            RunStatus::Continue
        }
    }

    fn dispatch_periodic_tick(&mut self) {
        let now = process_time();
        let interval = self.settings.run_loop.tick_interval();
        let due = self
            .last_tick
            .is_none_or(|last| now.saturating_sub(last) >= interval);
        if !due {
            return;
        }

        let event = TickEvent { timestamp: now };
        for window in self.windows.values_mut() {
            window.on_tick_event(&event);
        }
        self.last_tick = Some(now);
        self.metrics.record_periodic_tick();
    }

    fn drain_posted(&mut self, unlocker: &mut dyn EnvUnlocker) {
        // A producer may hold the host lock while it waits for the queue lock,
        // so the host lock is released around the swap and the queue lock is
        // released before the host lock is taken back.
        unlocker.unlock();
        let posted = self.posted.take_all();
        unlocker.relock();

        for Posted { window, callback } in posted {
            let Some(id) = window else {
                callback(&mut *self);
                self.metrics.record_callback_run();
                continue;
            };

            let previous = match self.windows.get_mut(&id) {
                Some(window) => window.make_draw_context_current(),
                None => {
                    tracing::debug!("Skipping callback for {}: window is gone", id);
                    self.metrics.record_callback_skipped();
                    continue;
                }
            };

            callback(&mut *self);
            self.metrics.record_callback_run();

            // The callback may have removed its own window, which is then still
            // alive in pending destruction.
            if let Some(window) = self.window_entry_mut(id) {
                window.restore_draw_context(previous);
                window.post_redraw();
            }
        }
    }

    fn reap_finished_tasks(&mut self) {
        if self.running_tasks.is_empty() {
            return;
        }

        let (finished, running): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.running_tasks)
            .into_iter()
            .partition(Task::is_finished);
        self.running_tasks = running;

        let reaped = finished.len();
        for task in finished {
            let id = task.id();
            drop(task);
            self.events.emit(AppEvent::TaskFinished { id });
        }
        self.metrics.record_tasks_reaped(reaped);
    }

    fn destroy_pending_windows(&mut self) {
        let pending = std::mem::take(&mut self.pending_destruction);
        for (id, mut window) in pending {
            tracing::debug!("Destroying {} ('{}')", id, window.uid());
            window.destroy_window();
            drop(window);

            self.metrics.record_window_destroyed();
            self.events.emit(AppEvent::WindowDestroyed { id });
        }
    }

    /// Full shutdown, safe to call any number of times
    ///
    /// Removes and destroys every remaining window immediately (the run loop may
    /// no longer be ticking), then tears down the backends. Intended for process
    /// exit, including abnormal exit from an embedding host.
    ///
    /// Background tasks are not joined here, since a task may still be waiting on
    /// the host. They stay in `running_task_count()` and are joined when the
    /// `Application` is dropped.
    pub fn on_terminate(&mut self) {
        self.quit();
        self.destroy_pending_windows();
        self.cleanup_after_running();
        self.run_state = RunState::NotStarted;

        self.events.emit(AppEvent::Terminated);
        tracing::debug!("Application terminated");
        self.metrics.log_summary();
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    pub fn metrics(&self) -> &RunLoopMetrics {
        &self.metrics
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.on_terminate();
    }
}
