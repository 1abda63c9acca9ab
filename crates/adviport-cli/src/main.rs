use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use adviport_application::{AuthenticationFlow, MainMenu, PluginServices, default_registry};
use adviport_core::aviation::InfoProvider;
use adviport_core::error::AdviPortError;
use adviport_core::plugin::builtin_plugins;
use adviport_core::secret::SecretCipher;
use adviport_core::session::Session;
use adviport_infrastructure::settings::LOG_ENV;
use adviport_infrastructure::{
    AesSecretCipher, CipherKey, FileSystemProfileStore, SettingsLoader, build_provider,
};

mod terminal;

use terminal::{CliHelper, TerminalInterface};

/// `ADVIPORT_LOG` wins over the `log_level` setting; `warn` otherwise.
fn init_tracing(configured: Option<&str>) {
    let env_filter = match env::var(LOG_ENV).ok().filter(|value| !value.trim().is_empty()) {
        Some(directive) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(directive),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(configured.unwrap_or_default()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Line shown before exiting when the settings cannot be loaded.
fn settings_error_message(err: &AdviPortError) -> String {
    if err.is_not_found() {
        "A required settings file has not been found.".to_string()
    } else {
        format!("The settings file could not be loaded: {err}")
    }
}

fn main() -> Result<()> {
    let cwd = env::current_dir().context("Failed to determine the working directory")?;

    let loaded = match SettingsLoader::from_env(&cwd).load() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", settings_error_message(&e).red());
            return Err(e).context("Failed to load settings");
        }
    };
    let settings = loaded.settings;
    init_tracing(settings.log_level.as_deref());
    info!("Loaded settings from {}", loaded.path.display());

    let cipher: Arc<dyn SecretCipher> = Arc::new(AesSecretCipher::new(CipherKey::resolve(
        settings.cipher_passphrase.as_deref(),
    )));
    let profiles = Arc::new(
        FileSystemProfileStore::discover(&cwd, cipher.clone())
            .context("Failed to open the profiles directory")?,
    );
    let provider: Arc<dyn InfoProvider> = Arc::from(build_provider(settings.provider)?);
    let auth = AuthenticationFlow::new(profiles.clone(), cipher.clone())
        .with_retry_delay(settings.login_retry_delay());

    let registry = default_registry(Arc::new(PluginServices {
        profiles,
        cipher,
        provider,
        auth,
        about_file: settings.about_file.clone(),
    }));

    let words = builtin_plugins()
        .iter()
        .filter(|plugin| settings.available_plugins.iter().any(|t| t == plugin.token))
        .map(|plugin| plugin.descriptor().selection_key())
        .collect();
    let mut ui = TerminalInterface::new(CliHelper::new(words))?;
    let mut session = Session::new();

    MainMenu::new(&registry, &settings).run(&mut session, &mut ui)?;
    Ok(())
}
