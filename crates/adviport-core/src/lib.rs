//! Domain model and pure logic of AdviPort.
//!
//! Sessions, profiles, plugin dispatch and menu presentation live here;
//! storage, cryptography and network access are behind traits implemented
//! by `adviport-infrastructure`.

pub mod aviation;
pub mod config;
pub mod error;
pub mod menu;
pub mod plugin;
pub mod secret;
pub mod session;
pub mod ui;
pub mod user;

// Re-export common error type
pub use error::{AdviPortError, Result};
