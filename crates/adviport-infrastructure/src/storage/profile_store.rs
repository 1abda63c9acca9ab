//! File-system profile repository.
//!
//! Each user is one TOML file named `{username}_profile.toml` somewhere under
//! the profiles directory. Lookups scan the directory tree, so a record
//! duplicated into a subdirectory is detected rather than silently shadowed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use adviport_core::error::{AdviPortError, Result};
use adviport_core::secret::SecretCipher;
use adviport_core::user::{ProfileRepository, UserProfile};
use tracing::{debug, info, warn};

use super::atomic_toml::AtomicTomlFile;
use crate::paths::AdviPortPaths;

const PROFILE_SUFFIX: &str = "_profile.toml";

/// Canonical file name of a user's profile.
pub fn profile_file_name(username: &str) -> String {
    format!("{username}{PROFILE_SUFFIX}")
}

/// Rejects usernames that could not be used verbatim as part of a file name.
pub fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(AdviPortError::validation("The username must not be blank."));
    }
    if username
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control() || c == std::path::MAIN_SEPARATOR)
    {
        return Err(AdviPortError::validation(
            "The username must not contain path separators or control characters.",
        ));
    }
    if username == "." || username == ".." {
        return Err(AdviPortError::validation("The username is reserved."));
    }
    Ok(())
}

/// Profile repository backed by one TOML file per user.
pub struct FileSystemProfileStore {
    root: PathBuf,
    cipher: Arc<dyn SecretCipher>,
}

impl FileSystemProfileStore {
    /// Creates a store rooted at an existing profiles directory.
    pub fn new(root: impl Into<PathBuf>, cipher: Arc<dyn SecretCipher>) -> Self {
        Self {
            root: root.into(),
            cipher,
        }
    }

    /// Locates (or creates) the profiles directory above `start` and opens it.
    pub fn discover(start: &Path, cipher: Arc<dyn SecretCipher>) -> Result<Self> {
        let root = AdviPortPaths::ensure_profiles_dir(start)?;
        Ok(Self::new(root, cipher))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a profile of `username` is written to.
    pub fn profile_path(&self, username: &str) -> PathBuf {
        self.root.join(profile_file_name(username))
    }

    /// All files under the root whose name equals the canonical file name.
    fn find_profile_files(&self, username: &str) -> Result<Vec<PathBuf>> {
        let file_name = profile_file_name(username);
        let mut found = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if dir == self.root => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                    continue;
                }
            };
            for entry in entries {
                let entry = entry?;
                let path = entry.path();
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() && entry.file_name().to_string_lossy() == file_name {
                    found.push(path);
                }
            }
        }

        Ok(found)
    }

    /// The single file holding `username`'s profile.
    fn locate(&self, username: &str) -> Result<PathBuf> {
        let mut matches = self.find_profile_files(username)?;
        match matches.len() {
            0 => Err(AdviPortError::not_found("profile", username)),
            1 => Ok(matches.remove(0)),
            n => Err(AdviPortError::data_access(format!(
                "{n} profile files found for user '{username}'"
            ))),
        }
    }
}

impl ProfileRepository for FileSystemProfileStore {
    fn user_exists(&self, username: &str) -> bool {
        if validate_username(username).is_err() {
            return false;
        }
        match self.find_profile_files(username) {
            Ok(matches) => matches.len() == 1,
            Err(e) => {
                warn!("Failed to scan profiles directory: {}", e);
                false
            }
        }
    }

    fn get_profile(&self, username: &str) -> Result<UserProfile> {
        validate_username(username)?;
        let path = self.locate(username)?;
        debug!("Loading profile from {}", path.display());

        AtomicTomlFile::<UserProfile>::new(path.clone())
            .load()?
            .ok_or_else(|| {
                AdviPortError::data_access(format!("Profile file {} is empty", path.display()))
            })
    }

    fn create_profile(&self, username: &str, password: &str, api_key: &str) -> Result<UserProfile> {
        validate_username(username)?;
        if api_key.trim().is_empty() {
            return Err(AdviPortError::validation("The API key must not be blank."));
        }
        if !self.find_profile_files(username)?.is_empty() {
            return Err(AdviPortError::validation(format!(
                "A user with name {username} already exists."
            )));
        }

        let encrypted_password = self
            .cipher
            .encrypt(password)
            .ok_or_else(|| AdviPortError::security("Failed to encrypt the password"))?;
        let encrypted_api_key = self
            .cipher
            .encrypt(api_key.trim())
            .ok_or_else(|| AdviPortError::security("Failed to encrypt the API key"))?;

        let profile = UserProfile::new(username, encrypted_password, encrypted_api_key);
        self.write_profile(&profile)?;
        info!("Registered user '{}'", username);
        Ok(profile)
    }

    fn write_profile(&self, profile: &UserProfile) -> Result<()> {
        validate_username(&profile.username)?;
        // Keep updating a record wherever it lives; new records go to the root.
        let path = match self.locate(&profile.username) {
            Ok(path) => path,
            Err(e) if e.is_not_found() => self.profile_path(&profile.username),
            Err(e) => return Err(e),
        };

        AtomicTomlFile::<UserProfile>::new(path.clone()).save(profile)?;
        debug!("Wrote profile to {}", path.display());
        Ok(())
    }
}
