//! Path discovery for AdviPort data files.
//!
//! Profiles and settings live next to the application rather than in a
//! per-user config directory: both are found by walking up from the working
//! directory.
//!
//! # Directory Structure
//!
//! ```text
//! <app dir>/
//! ├── settings.toml                # Application settings
//! ├── about.txt                    # Optional about text
//! └── profiles/                    # One file per registered user
//!     └── {username}_profile.toml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use adviport_core::error::Result;
use tracing::{debug, info};

/// How many parent directories above the start directory are searched.
pub const SEARCH_DEPTH: usize = 5;

pub const PROFILES_DIR_NAME: &str = "profiles";
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Path management for AdviPort.
pub struct AdviPortPaths;

impl AdviPortPaths {
    /// Searches `start` and up to [`SEARCH_DEPTH`] of its ancestors for an
    /// entry named `name`.
    ///
    /// # Returns
    ///
    /// The path of the nearest match, or `None`.
    pub fn find_upwards(start: &Path, name: &str, want_dir: bool) -> Option<PathBuf> {
        start
            .ancestors()
            .take(SEARCH_DEPTH + 1)
            .map(|dir| dir.join(name))
            .find(|candidate| {
                if want_dir {
                    candidate.is_dir()
                } else {
                    candidate.is_file()
                }
            })
    }

    /// Returns the profiles directory for `start`, creating `start/profiles`
    /// if none exists within the search depth.
    pub fn ensure_profiles_dir(start: &Path) -> Result<PathBuf> {
        if let Some(found) = Self::find_upwards(start, PROFILES_DIR_NAME, true) {
            debug!("Using profiles directory {}", found.display());
            return Ok(found);
        }

        let created = start.join(PROFILES_DIR_NAME);
        fs::create_dir_all(&created)?;
        info!("Created profiles directory {}", created.display());
        Ok(created)
    }

    /// Nearest `settings.toml` above `start`.
    pub fn find_settings_file(start: &Path) -> Option<PathBuf> {
        Self::find_upwards(start, SETTINGS_FILE_NAME, false)
    }

    /// Per-user fallback location of `settings.toml` (e.g. `~/.config/adviport/`).
    pub fn user_settings_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("adviport").join(SETTINGS_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_upwards_prefers_nearest() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(temp_dir.path().join("profiles")).unwrap();
        fs::create_dir_all(temp_dir.path().join("a/profiles")).unwrap();

        let found = AdviPortPaths::find_upwards(&nested, "profiles", true).unwrap();
        assert_eq!(found, temp_dir.path().join("a/profiles"));
    }

    #[test]
    fn test_find_upwards_respects_depth() {
        let temp_dir = TempDir::new().unwrap();
        let deep = temp_dir.path().join("1/2/3/4/5/6");
        fs::create_dir_all(&deep).unwrap();
        fs::write(temp_dir.path().join("settings.toml"), "").unwrap();

        assert!(AdviPortPaths::find_settings_file(&deep).is_none());
        let shallower = temp_dir.path().join("1/2/3/4/5");
        assert_eq!(
            AdviPortPaths::find_settings_file(&shallower).unwrap(),
            temp_dir.path().join("settings.toml")
        );
    }

    #[test]
    fn test_find_upwards_distinguishes_files_and_dirs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("profiles"), "not a dir").unwrap();
        assert!(AdviPortPaths::find_upwards(temp_dir.path(), "profiles", true).is_none());
        assert!(AdviPortPaths::find_upwards(temp_dir.path(), "profiles", false).is_some());
    }

    #[test]
    fn test_ensure_profiles_dir_creates_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let dir = AdviPortPaths::ensure_profiles_dir(temp_dir.path()).unwrap();
        assert_eq!(dir, temp_dir.path().join("profiles"));
        assert!(dir.is_dir());

        // Second call finds the same directory.
        assert_eq!(AdviPortPaths::ensure_profiles_dir(temp_dir.path()).unwrap(), dir);
    }
}
