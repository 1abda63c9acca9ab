//! Settings loading.
//!
//! `settings.toml` is looked up in this order:
//! 1. the path in `ADVIPORT_SETTINGS`
//! 2. the working directory and up to five of its parents
//! 3. the per-user config directory (`~/.config/adviport/settings.toml`)
//!
//! A missing settings file is a not-found error; the application does not
//! start without one.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use adviport_core::config::AppSettings;
use adviport_core::error::{AdviPortError, Result};
use tracing::debug;

use crate::paths::AdviPortPaths;

/// Overrides the settings file location.
pub const SETTINGS_ENV: &str = "ADVIPORT_SETTINGS";
/// Overrides `cipher_passphrase`.
pub const CIPHER_KEY_ENV: &str = "ADVIPORT_CIPHER_KEY";
/// Tracing filter directive; takes precedence over `log_level`.
pub const LOG_ENV: &str = "ADVIPORT_LOG";

/// Settings together with the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub path: PathBuf,
    pub settings: AppSettings,
}

/// Locates and parses `settings.toml`.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    start_dir: PathBuf,
    explicit_path: Option<PathBuf>,
    cipher_passphrase: Option<String>,
    search_user_dir: bool,
}

impl SettingsLoader {
    /// Loader that only searches upwards from `start_dir`.
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            explicit_path: None,
            cipher_passphrase: None,
            search_user_dir: false,
        }
    }

    /// Loader configured from the process environment.
    pub fn from_env(start_dir: impl Into<PathBuf>) -> Self {
        let mut loader = Self::new(start_dir);
        loader.search_user_dir = true;
        if let Some(path) = env::var_os(SETTINGS_ENV).filter(|p| !p.is_empty()) {
            loader.explicit_path = Some(PathBuf::from(path));
        }
        if let Ok(passphrase) = env::var(CIPHER_KEY_ENV) {
            loader.cipher_passphrase = Some(passphrase);
        }
        loader
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// Passphrase that wins over the one in the file.
    pub fn with_cipher_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.cipher_passphrase = Some(passphrase.into());
        self
    }

    /// Finds the settings file without reading it.
    pub fn locate(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit_path {
            if path.is_file() {
                return Ok(path.clone());
            }
            return Err(AdviPortError::not_found("settings file", path.display().to_string()));
        }

        AdviPortPaths::find_settings_file(&self.start_dir)
            .or_else(|| {
                self.search_user_dir
                    .then(AdviPortPaths::user_settings_file)
                    .flatten()
                    .filter(|path| path.is_file())
            })
            .ok_or_else(|| {
                AdviPortError::not_found(
                    "settings file",
                    format!("{}/settings.toml", self.start_dir.display()),
                )
            })
    }

    /// Reads, parses and post-processes the settings file.
    pub fn load(&self) -> Result<LoadedSettings> {
        let path = self.locate()?;
        debug!("Loading settings from {}", path.display());

        let content = fs::read_to_string(&path)?;
        let mut settings: AppSettings = toml::from_str(&content)?;

        if settings.available_plugins.is_empty() {
            return Err(AdviPortError::config("No plugins are configured in available_plugins"));
        }

        if let Some(passphrase) = &self.cipher_passphrase {
            settings.cipher_passphrase = Some(passphrase.clone());
        }

        if let Some(about) = settings.about_file.take() {
            settings.about_file = Some(resolve_relative(&path, about));
        }

        Ok(LoadedSettings { path, settings })
    }
}

/// Resolves `relative` against the directory containing `settings_path`.
fn resolve_relative(settings_path: &Path, relative: PathBuf) -> PathBuf {
    if relative.is_absolute() {
        return relative;
    }
    match settings_path.parent() {
        Some(dir) => dir.join(relative),
        None => relative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adviport_core::config::ProviderKind;
    use tempfile::TempDir;

    fn write_settings(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("settings.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_settings_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = SettingsLoader::new(temp_dir.path()).load().unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_config());
    }

    #[test]
    fn test_found_in_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_settings(temp_dir.path(), "provider = \"mock\"\n");
        let nested = temp_dir.path().join("bin/debug");
        fs::create_dir_all(&nested).unwrap();

        let loaded = SettingsLoader::new(&nested).load().unwrap();
        assert_eq!(loaded.path, path);
        assert_eq!(loaded.settings.provider, ProviderKind::Mock);
    }

    #[test]
    fn test_explicit_path_wins() {
        let temp_dir = TempDir::new().unwrap();
        write_settings(temp_dir.path(), "log_level = \"warn\"\n");
        let other = temp_dir.path().join("other.toml");
        fs::write(&other, "log_level = \"debug\"\n").unwrap();

        let loaded = SettingsLoader::new(temp_dir.path())
            .with_path(&other)
            .load()
            .unwrap();
        assert_eq!(loaded.settings.log_level.as_deref(), Some("debug"));

        let missing =
            SettingsLoader::new(temp_dir.path()).with_path(temp_dir.path().join("nope.toml"));
        assert!(missing.load().unwrap_err().is_not_found());
    }

    #[test]
    fn test_about_file_resolved_against_settings_dir() {
        let temp_dir = TempDir::new().unwrap();
        write_settings(temp_dir.path(), "about_file = \"about.txt\"\n");

        let loaded = SettingsLoader::new(temp_dir.path()).load().unwrap();
        assert_eq!(
            loaded.settings.about_file,
            Some(temp_dir.path().join("about.txt"))
        );
    }

    #[test]
    fn test_passphrase_override() {
        let temp_dir = TempDir::new().unwrap();
        write_settings(temp_dir.path(), "cipher_passphrase = \"from-file\"\n");

        let loaded = SettingsLoader::new(temp_dir.path())
            .with_cipher_passphrase("from-env")
            .load()
            .unwrap();
        assert_eq!(loaded.settings.cipher_passphrase.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_empty_plugin_list_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_settings(temp_dir.path(), "available_plugins = []\n");
        let err = SettingsLoader::new(temp_dir.path()).load().unwrap_err();
        assert!(err.is_config());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        write_settings(temp_dir.path(), "provider = \"carrier-pigeon\"\n");
        assert!(SettingsLoader::new(temp_dir.path()).load().unwrap_err().is_serialization());
    }
}
