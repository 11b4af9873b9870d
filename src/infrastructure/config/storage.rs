//! Persistence of settings to the platform config directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{info, warn};

use super::settings::AppSettings;

const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "rerurate";
const APP_NAME: &str = "bannerpick";
const SETTINGS_FILE_NAME: &str = "config.toml";

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Settings could not be serialized.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Loads and saves [`AppSettings`] as TOML.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Creates a manager rooted at the platform config directory.
    ///
    /// # Errors
    /// Returns [`ConfigError::ConfigDirNotFound`] if the directory cannot be
    /// determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a manager with a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if !self.config_dir.exists() {
            info!("Creating configuration directory at {:?}", self.config_dir);
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Loads the settings, creating a default file when none exists.
    ///
    /// A malformed file is left untouched and defaults are used instead.
    /// Loaded values are sanitized into their valid ranges.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or created.
    pub fn load_settings(&self, path_override: Option<&Path>) -> Result<AppSettings, ConfigError> {
        self.ensure_config_dir()?;
        let settings_path = path_override.map_or_else(
            || self.config_dir.join(SETTINGS_FILE_NAME),
            std::path::Path::to_path_buf,
        );

        if !settings_path.exists() {
            info!(
                "Settings file not found at {:?}, creating default.",
                settings_path
            );
            let defaults = AppSettings::default();
            if let Some(parent) = settings_path.parent() {
                fs::create_dir_all(parent)?;
            }
            Self::save_to_file(&settings_path, &defaults)?;
            return Ok(defaults);
        }

        let content = fs::read_to_string(&settings_path)?;
        match toml::from_str::<AppSettings>(&content) {
            Ok(settings) => Ok(settings.sanitized()),
            Err(e) => {
                warn!("Failed to parse settings file: {}. Using defaults.", e);
                Ok(AppSettings::default())
            }
        }
    }

    /// Saves the settings.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_settings(&self, settings: &AppSettings) -> Result<(), ConfigError> {
        self.ensure_config_dir()?;
        let settings_path = self.config_dir.join(SETTINGS_FILE_NAME);
        Self::save_to_file(&settings_path, settings)
    }

    fn save_to_file(path: &Path, settings: &AppSettings) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(settings)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_default_if_missing() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let settings = manager.load_settings(None).unwrap();
        assert_eq!(settings, AppSettings::default());

        let settings_file = dir.path().join(SETTINGS_FILE_NAME);
        assert!(settings_file.exists());
    }

    #[test]
    fn test_load_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let settings_file = dir.path().join(SETTINGS_FILE_NAME);

        fs::write(&settings_file, "invalid_toml = [").unwrap();

        let settings = manager.load_settings(None).unwrap();
        assert_eq!(settings, AppSettings::default());
        // The broken file is preserved for the user to inspect.
        let content = fs::read_to_string(&settings_file).unwrap();
        assert_eq!(content, "invalid_toml = [");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let settings = AppSettings {
            metadata_key: "cover".to_string(),
            page_size: 24,
        };
        manager.save_settings(&settings).unwrap();

        let loaded = manager.load_settings(None).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_loaded_values_are_sanitized() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let settings_file = dir.path().join(SETTINGS_FILE_NAME);

        fs::write(&settings_file, "page_size = 0").unwrap();

        let settings = manager.load_settings(None).unwrap();
        assert_eq!(settings.page_size, 1);
    }

    #[test]
    fn test_path_override_is_respected() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");

        fs::write(&custom, "page_size = 30").unwrap();

        let settings = manager.load_settings(Some(&custom)).unwrap();
        assert_eq!(settings.page_size, 30);
    }
}
