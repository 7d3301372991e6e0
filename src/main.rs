//! tickloop - headless demo of the application run loop
//!
//! # Overview
//!
//! This binary exercises the library end to end without a native GUI:
//! - Loads settings from `tickloop.yaml` (plus `TICKLOOP__*` environment overrides)
//! - Initializes logging (file rotation + console output)
//! - Creates an [`Application`] on the headless window system
//! - Opens one window and starts a background task that closes it again from
//!   another thread, through the main-thread poster
//! - Runs the loop until the last window is gone
//!
//! # Execution Flow
//!
//! 1. Load settings from the working directory
//! 2. Initialize logging → logs/tickloop.<date>
//! 3. Locate resources (settings, or next to the executable)
//! 4. Add a headless window, start the background task
//! 5. Run the loop (returns once the window is removed)
//! 6. Log run-loop metrics

use anyhow::{Context, Result};
use std::time::Duration;
use tickloop::models::AppSettings;
use tickloop::ui::{Application, HeadlessWindow, HeadlessWindowSystem};
use tickloop::{APP_NAME, ConfigManager, VERSION};

/// How long the demo window stays open
const DEMO_DURATION: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    let config_manager = ConfigManager::new(".")?;
    let settings = config_manager.load_settings()?;

    let _log_guard = tickloop::logging::setup_logging(&settings.logging)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let mut app = build_application(settings)?;

    let window_id = app.add_window(Box::new(HeadlessWindow::new("main")));
    tracing::info!("Opened {}", window_id);

    // Close the window from a worker thread; the removal itself runs on the main thread
    let poster = app.poster();
    app.run_in_thread(move || {
        std::thread::sleep(DEMO_DURATION);
        tracing::info!("Demo finished, closing {}", window_id);
        poster.post(Some(window_id), move |app| app.remove_window(window_id));
    });

    app.run();

    let metrics = app.metrics();
    tracing::info!(
        "Run loop exited after {:.2}s",
        metrics.uptime().as_secs_f64()
    );
    Ok(())
}

fn build_application(settings: AppSettings) -> Result<Application> {
    let resource_path = settings.resources.resource_path.clone();

    let mut app = Application::new(settings);
    app.set_window_system(Box::new(HeadlessWindowSystem::new()));

    match resource_path {
        Some(path) => app.initialize(path.as_str()),
        None => {
            let argv0 = std::env::args().next().unwrap_or_default();
            app.initialize_from_args(&argv0)
        }
    }
    .context("Failed to initialize application")?;

    Ok(app)
}
