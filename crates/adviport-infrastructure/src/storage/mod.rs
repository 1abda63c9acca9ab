//! Storage layer.
//!
//! - `atomic_toml`: tmp-file + rename TOML persistence
//! - `profile_store`: one-file-per-user profile repository

pub mod atomic_toml;
pub mod profile_store;

pub use atomic_toml::AtomicTomlFile;
pub use profile_store::{FileSystemProfileStore, profile_file_name, validate_username};
