use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upper bound for one native event wait, in milliseconds.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10;

/// Fraction of the wait bound that must elapse before the next periodic tick.
pub const DEFAULT_TICK_THRESHOLD: f64 = 0.95;

/// Settings loaded from `tickloop.yaml`
///
/// Every section is optional in the file; missing keys fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub run_loop: RunLoopSettings,

    #[serde(default)]
    pub resources: ResourceSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Timing of the run loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLoopSettings {
    /// Upper bound for a single native event wait
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    /// Periodic ticks fire once `elapsed >= tick_threshold * wait_timeout`
    #[serde(default = "default_tick_threshold")]
    pub tick_threshold: f64,

    /// Join background tasks and tear down backends when the last window closes
    #[serde(default = "default_true")]
    pub cleanup_if_no_windows: bool,
}

impl RunLoopSettings {
    /// The bounded native event wait as a [`Duration`].
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    /// Minimum time between two periodic tick dispatches.
    ///
    /// A non-finite threshold (e.g. `.nan` in the YAML file) falls back to
    /// [`DEFAULT_TICK_THRESHOLD`].
    pub fn tick_interval(&self) -> Duration {
        let threshold = if self.tick_threshold.is_finite() {
            self.tick_threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_TICK_THRESHOLD
        };
        self.wait_timeout().mul_f64(threshold)
    }
}

impl Default for RunLoopSettings {
    fn default() -> Self {
        Self {
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            tick_threshold: DEFAULT_TICK_THRESHOLD,
            cleanup_if_no_windows: true,
        }
    }
}

/// Where UI resources live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSettings {
    /// Resource directory. When unset the binary searches next to the executable.
    #[serde(default)]
    pub resource_path: Option<String>,

    /// UI font, relative to the resource directory
    #[serde(default = "default_font_file")]
    pub font_file: String,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            resource_path: None,
            font_file: default_font_file(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_true")]
    pub console: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            debug: false,
            console: true,
        }
    }
}

fn default_wait_timeout_ms() -> u64 {
    DEFAULT_WAIT_TIMEOUT_MS
}

fn default_tick_threshold() -> f64 {
    DEFAULT_TICK_THRESHOLD
}

fn default_true() -> bool {
    true
}

fn default_font_file() -> String {
    "Roboto-Medium.ttf".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "tickloop".to_string()
}
