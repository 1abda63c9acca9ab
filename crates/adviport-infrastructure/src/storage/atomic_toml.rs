//! Atomic TOML file operations.
//!
//! Writes go to a hidden temporary file next to the target, are fsynced, and
//! then renamed over the target. A reader never sees a half-written file.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use adviport_core::error::{AdviPortError, Result};
use tracing::warn;

/// A handle to a TOML file that is replaced atomically on save.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic TOML file handle.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the TOML file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the TOML file and deserializes it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the TOML file atomically.
    ///
    /// On failure the temporary file is removed and the previous contents of
    /// the target stay untouched.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Successfully saved
    /// - `Err`: Failed to serialize or write the file
    pub fn save(&self, data: &T) -> Result<()> {
        // Serialize before touching the filesystem
        let toml_string = toml::to_string_pretty(data)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path()?;
        let result = Self::write_and_rename(&tmp_path, &self.path, toml_string.as_bytes());
        if result.is_err() && tmp_path.exists() {
            if let Err(e) = fs::remove_file(&tmp_path) {
                warn!("Failed to remove temporary file {}: {}", tmp_path.display(), e);
            }
        }
        result
    }

    fn write_and_rename(tmp_path: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
        let mut tmp_file = File::create(tmp_path)?;
        tmp_file.write_all(bytes)?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(tmp_path, target)?;
        Ok(())
    }

    /// Gets the temporary file path for atomic writes (`.{name}.tmp`).
    pub fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AdviPortError::io(format!("Path has no file name: {}", self.path.display()))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(match self.path.parent() {
            Some(parent) => parent.join(tmp_name),
            None => PathBuf::from(tmp_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.toml");
        let atomic_file = AtomicTomlFile::<TestRecord>::new(file_path);

        let record = TestRecord {
            name: "test".to_string(),
            count: 42,
        };

        atomic_file.save(&record).unwrap();

        let loaded = atomic_file.load().unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nonexistent.toml");
        let atomic_file = AtomicTomlFile::<TestRecord>::new(file_path);

        assert!(atomic_file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.toml");
        fs::write(&file_path, "name = ").unwrap();

        let err = AtomicTomlFile::<TestRecord>::new(file_path).load().unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.toml");
        let atomic_file = AtomicTomlFile::<TestRecord>::new(file_path.clone());

        atomic_file
            .save(&TestRecord {
                name: "test".to_string(),
                count: 42,
            })
            .unwrap();

        assert!(!temp_dir.path().join(".test.toml.tmp").exists());
        assert!(file_path.exists());
    }

    #[test]
    fn test_failed_rename_cleans_up_and_keeps_target() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in place of the target makes the rename fail.
        let file_path = temp_dir.path().join("occupied.toml");
        fs::create_dir(&file_path).unwrap();
        fs::write(file_path.join("keep"), "x").unwrap();

        let atomic_file = AtomicTomlFile::<TestRecord>::new(file_path.clone());
        let result = atomic_file.save(&TestRecord {
            name: "test".to_string(),
            count: 1,
        });

        assert!(result.is_err());
        assert!(!temp_dir.path().join(".occupied.toml.tmp").exists());
        assert!(file_path.join("keep").exists());
    }
}
