use std::sync::{Arc, OnceLock};

use adviport_core::error::{AdviPortError, Result};
use adviport_core::plugin::{LOGIN_TOKEN, Plugin, PluginContext, PluginDescriptor};
use adviport_core::session::Session;
use adviport_core::ui::UserInterface;
use regex::Regex;

use super::{PluginServices, catalog_descriptor};
use crate::auth::logout;

const PASSWORD_RULE: &str = "at least 8 characters - letters and numbers only";

fn password_policy() -> &'static Regex {
    static POLICY: OnceLock<Regex> = OnceLock::new();
    POLICY.get_or_init(|| Regex::new("^[a-zA-Z0-9]{8,}$").expect("static password pattern"))
}

/// Whether `password` satisfies the registration policy.
pub fn is_acceptable_password(password: &str) -> bool {
    password_policy().is_match(password)
}

/// Asks for a new password and its confirmation until both are valid.
///
/// Returns `None` once input is closed.
fn read_new_password(ui: &mut dyn UserInterface) -> Option<String> {
    loop {
        let password = ui.read_secret(&format!(
            "Please enter password you want to use ({PASSWORD_RULE}): "
        ))?;
        if !is_acceptable_password(&password) {
            ui.error(&format!(
                "Please make sure your password contains {PASSWORD_RULE}."
            ));
            continue;
        }

        let confirmation = ui.read_secret("Please type your password again: ")?;
        if confirmation != password {
            ui.error("Passwords do not match. Please try again.");
            continue;
        }
        return Some(password);
    }
}

/// Registers a new user together with their API key.
pub struct RegisterPlugin {
    services: Arc<PluginServices>,
}

impl RegisterPlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for RegisterPlugin {
    fn token(&self) -> &str {
        "register"
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        let username = ctx
            .ui
            .read_line("Please enter a name you want to register: ")
            .unwrap_or_default();

        if username.trim().is_empty() {
            let message = "User with empty name cannot be registered. \
                Please use at least one non-whitespace character.";
            ctx.ui.error(message);
            return Err(AdviPortError::validation(message));
        }
        if self.services.profiles.user_exists(&username) {
            let message =
                format!("A user with name {username} already exists. Please choose another name.");
            ctx.ui.error(&message);
            return Err(AdviPortError::validation(message));
        }

        let password = read_new_password(ctx.ui)
            .ok_or_else(|| AdviPortError::input("Registration cancelled"))?;

        let api_key = ctx
            .ui
            .read_secret("Please enter the API key you want to use in the application: ")
            .ok_or_else(|| AdviPortError::input("Registration cancelled"))?;

        if let Err(e) = self.services.profiles.create_profile(&username, &password, &api_key) {
            ctx.ui.error(&e.to_string());
            return Err(e);
        }
        ctx.ui.info("Registration of a new user is successful.");
        Ok(())
    }
}

pub struct LoginPlugin {
    services: Arc<PluginServices>,
}

impl LoginPlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for LoginPlugin {
    fn token(&self) -> &str {
        LOGIN_TOKEN
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        self.services.auth.login(ctx.session, ctx.ui)
    }
}

pub struct LogoutPlugin;

impl Plugin for LogoutPlugin {
    fn token(&self) -> &str {
        "logout"
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        let outcome = logout(ctx.session);
        ctx.ui.info(outcome.message());
        Ok(())
    }
}
