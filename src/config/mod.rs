use crate::models::AppSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use std::fs;

/// Settings file name inside the configuration directory
pub const SETTINGS_FILE: &str = "tickloop.yaml";

/// Prefix for environment overrides, e.g. `TICKLOOP__RUN_LOOP__WAIT_TIMEOUT_MS=20`
pub const ENV_PREFIX: &str = "TICKLOOP";

/// Configuration manager for loading and saving `tickloop.yaml`.
///
/// Settings are layered, later sources winning:
/// 1. Built-in defaults ([`AppSettings::default`])
/// 2. `tickloop.yaml` in the configuration directory, if present
/// 3. `TICKLOOP__<SECTION>__<KEY>` environment variables
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing `tickloop.yaml` (created if missing)
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            config_dir,
        })
    }

    /// Load settings from the file and the process environment.
    ///
    /// # Returns
    /// The merged AppSettings; defaults if neither source sets anything
    pub fn load_settings(&self) -> Result<AppSettings> {
        self.load_settings_with(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    fn load_settings_with(&self, environment: Environment) -> Result<AppSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings = Config::builder()
            .add_source(File::new(self.settings_path.as_str(), FileFormat::Yaml).required(false))
            .add_source(environment)
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?
            .try_deserialize::<AppSettings>()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!(
            "Loaded settings: wait_timeout={}ms, tick_threshold={}, cleanup_if_no_windows={}",
            settings.run_loop.wait_timeout_ms,
            settings.run_loop.tick_threshold,
            settings.run_loop.cleanup_if_no_windows
        );
        Ok(settings)
    }

    /// Save settings to `tickloop.yaml`.
    ///
    /// # Arguments
    /// * `settings` - The AppSettings to save
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn test_create_config_manager() {
        let (manager, _temp_dir) = create_test_config_manager();
        assert!(manager.settings_path().ends_with(SETTINGS_FILE));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = manager.load_settings_with(env_with(&[])).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_load_save_settings() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut settings = AppSettings::default();
        settings.run_loop.wait_timeout_ms = 25;
        settings.resources.resource_path = Some("/opt/app/resources".to_string());
        manager.save_settings(&settings).unwrap();

        let loaded = manager.load_settings_with(env_with(&[])).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_environment_overrides_file() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(
            manager.settings_path(),
            "run_loop:\n  wait_timeout_ms: 25\n  cleanup_if_no_windows: true\n",
        )
        .unwrap();

        let settings = manager
            .load_settings_with(env_with(&[
                ("TICKLOOP__RUN_LOOP__WAIT_TIMEOUT_MS", "40"),
                ("TICKLOOP__RUN_LOOP__CLEANUP_IF_NO_WINDOWS", "false"),
            ]))
            .unwrap();

        assert_eq!(settings.run_loop.wait_timeout_ms, 40);
        assert!(!settings.run_loop.cleanup_if_no_windows);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(manager.settings_path(), "run_loop: [not, a, map").unwrap();

        assert!(manager.load_settings_with(env_with(&[])).is_err());
    }
}
