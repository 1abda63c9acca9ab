//! Application settings.
//!
//! Loaded from `settings.toml` by the infrastructure layer. Every field is
//! optional in the file; missing fields take the defaults below.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::plugin::default_plugin_tokens;
use crate::user::MainPageStyle;

/// Source of airport and flight data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    /// Canned offline data.
    #[default]
    Mock,
    /// The AeroDataBox REST API (needs a RapidAPI key).
    #[serde(rename = "aerodatabox")]
    #[strum(serialize = "aerodatabox")]
    AeroDataBox,
}

fn default_retry_delay_ms() -> u64 {
    350
}

/// Root of `settings.toml`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Ordered plugin tokens shown in the main menu.
    pub available_plugins: Vec<String>,
    /// Style used when the logged-in user has none (or nobody is logged in).
    pub main_page_style: Option<MainPageStyle>,
    pub provider: ProviderKind,
    /// Text file printed by the about plugin.
    pub about_file: Option<PathBuf>,
    /// Passphrase the at-rest cipher key is derived from.
    pub cipher_passphrase: Option<String>,
    /// Default tracing filter directive (e.g. `info`, `adviport=debug`).
    pub log_level: Option<String>,
    /// Pause after a wrong password, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub login_retry_delay_ms: u64,
}

impl AppSettings {
    pub fn login_retry_delay(&self) -> Duration {
        Duration::from_millis(self.login_retry_delay_ms)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            available_plugins: default_plugin_tokens(),
            main_page_style: None,
            provider: ProviderKind::default(),
            about_file: None,
            cipher_passphrase: None,
            log_level: None,
            login_retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("available_plugins", &self.available_plugins)
            .field("main_page_style", &self.main_page_style)
            .field("provider", &self.provider)
            .field("about_file", &self.about_file)
            .field(
                "cipher_passphrase",
                &self.cipher_passphrase.as_ref().map(|_| "[REDACTED]"),
            )
            .field("log_level", &self.log_level)
            .field("login_retry_delay_ms", &self.login_retry_delay_ms)
            .finish()
    }
}
