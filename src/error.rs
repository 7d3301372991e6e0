use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised by a window-system backend
#[derive(Error, Debug)]
pub enum WindowSystemError {
    #[error("Window system failed to initialize: {0}")]
    InitializationFailed(String),
}

/// Errors that stop the run loop from starting
///
/// The `Display` text is what the native alert shows, so it is written for end users.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Internal error: Application::initialize() was not called")]
    NotInitialized,

    #[error("Could not find resource directory:\n'{0}' does not exist")]
    MissingResourceDirectory(Utf8PathBuf),

    #[error("Could not load UI font:\n'{0}' does not exist")]
    MissingFont(Utf8PathBuf),

    #[error(transparent)]
    WindowSystem(#[from] WindowSystemError),
}
