use std::fs;
use std::sync::Arc;

use adviport_core::error::{AdviPortError, Result};
use adviport_core::plugin::{EXIT_TOKEN, Plugin, PluginContext, PluginDescriptor};
use adviport_core::session::Session;
use tracing::warn;

use super::{PluginServices, catalog_descriptor};
use crate::auth::{LogoutOutcome, logout};

const ABOUT_TEXT: &str = "\
ADVIPORT - the aviation data console

Browse airports, departure and arrival boards and individual flights from
the terminal. Register with the API key of your data provider, log in, and
keep a list of favourite airports in your own profile.

Every menu entry can be selected by its number or by the first word of its
name. Type 'exit' or 'quit' at any time to leave the application.";

pub struct AboutPlugin {
    services: Arc<PluginServices>,
}

impl AboutPlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for AboutPlugin {
    fn token(&self) -> &str {
        "about"
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        let Some(path) = &self.services.about_file else {
            ctx.ui.info(ABOUT_TEXT);
            return Ok(());
        };

        match fs::read_to_string(path) {
            Ok(text) => {
                ctx.ui.info(text.trim_end());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to read about file {}: {}", path.display(), e);
                ctx.ui.error("Specification file could not be found.");
                Err(AdviPortError::not_found("about file", path.display().to_string()))
            }
        }
    }
}

/// Leaves the application, logging the current user out first.
pub struct ExitPlugin;

impl Plugin for ExitPlugin {
    fn token(&self) -> &str {
        EXIT_TOKEN
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        if logout(ctx.session) == LogoutOutcome::LoggedOut {
            ctx.ui.info(LogoutOutcome::LoggedOut.message());
        }
        ctx.ui.info("Exiting ADVIPORT application.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::testing::Fixture;
    use adviport_core::ui::ScriptedInterface;

    fn about_with_file(fixture: &Fixture, file: &str) -> AboutPlugin {
        let services = PluginServices {
            profiles: fixture.services.profiles.clone(),
            cipher: fixture.services.cipher.clone(),
            provider: fixture.services.provider.clone(),
            auth: fixture.services.auth.clone(),
            about_file: Some(fixture.dir.path().join(file)),
        };
        AboutPlugin::new(Arc::new(services))
    }

    #[test]
    fn test_about_prints_builtin_text() {
        let fixture = Fixture::new();
        let mut session = Session::new();
        let mut ui = ScriptedInterface::new(Vec::<String>::new());

        AboutPlugin::new(fixture.services.clone())
            .invoke(&mut PluginContext::new(&mut session, &mut ui))
            .unwrap();
        assert!(ui.infos()[0].starts_with("ADVIPORT"));
    }

    #[test]
    fn test_about_reads_configured_file() {
        let fixture = Fixture::new();
        fs::write(fixture.dir.path().join("about.txt"), "Custom about\n").unwrap();
        let mut session = Session::new();
        let mut ui = ScriptedInterface::new(Vec::<String>::new());

        about_with_file(&fixture, "about.txt")
            .invoke(&mut PluginContext::new(&mut session, &mut ui))
            .unwrap();
        assert_eq!(ui.infos(), &["Custom about"]);
    }

    #[test]
    fn test_about_missing_file_fails() {
        let fixture = Fixture::new();
        let mut session = Session::new();
        let mut ui = ScriptedInterface::new(Vec::<String>::new());

        let err = about_with_file(&fixture, "missing.txt")
            .invoke(&mut PluginContext::new(&mut session, &mut ui))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ui.errors(), &["Specification file could not be found."]);
    }

    #[test]
    fn test_exit_logs_out_first() {
        let fixture = Fixture::new();
        let mut session = fixture.logged_in();
        let mut ui = ScriptedInterface::new(Vec::<String>::new());

        ExitPlugin
            .invoke(&mut PluginContext::new(&mut session, &mut ui))
            .unwrap();
        assert!(!session.is_logged_in());
        assert_eq!(
            ui.infos(),
            &["Logged out successfully.", "Exiting ADVIPORT application."]
        );
    }
}
