use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Blocking OS-level message display
///
/// Only used when the run loop cannot start, so no UI of our own is available.
pub trait NativeAlert {
    fn show_alert(&self, message: &str);
}

/// Native alert backed by the platform message box
#[derive(Debug, Clone)]
pub struct RfdAlert {
    title: String,
}

impl RfdAlert {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for RfdAlert {
    fn default() -> Self {
        Self::new("Error")
    }
}

impl NativeAlert for RfdAlert {
    fn show_alert(&self, message: &str) {
        // stderr may not be visible when launched as an app bundle, log it too
        tracing::error!("{}", message);

        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(self.title.as_str())
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
