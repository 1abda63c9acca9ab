//! Infrastructure layer of AdviPort: the AES profile cipher, file-system
//! profile storage, settings discovery, and airport data providers.

pub mod cipher;
pub mod paths;
pub mod providers;
pub mod settings;
pub mod storage;

pub use cipher::{AesSecretCipher, CipherKey};
pub use paths::AdviPortPaths;
pub use providers::{AeroDataBoxProvider, MockInfoProvider, build_provider};
pub use settings::{LoadedSettings, SettingsLoader};
pub use storage::{AtomicTomlFile, FileSystemProfileStore};
