// tickloop - application run loop for desktop GUI toolkits
//
// This is the library crate containing the run loop, window lifecycle and
// main-thread posting. The binary crate (main.rs) drives a headless demo.

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use error::{AppError, WindowSystemError};
pub use models::AppSettings;
pub use state::{AppEvent, EventBus};
pub use ui::{Application, MainThreadPoster, Window, WindowId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
