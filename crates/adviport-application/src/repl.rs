//! The main menu loop.
//!
//! Each turn renders the menu for the current login state, reads one line,
//! resolves it and runs the selected plugin. An ambiguous first word
//! narrows the candidates; the narrowed list is what the next turn shows
//! and resolves against, until a plugin runs or the input is blank.

use adviport_core::config::AppSettings;
use adviport_core::error::Result;
use adviport_core::menu::presenter_for;
use adviport_core::plugin::{
    AvailablePlugin, EXIT_TOKEN, PluginContext, PluginRegistry, Resolution, resolve,
};
use adviport_core::session::Session;
use adviport_core::ui::UserInterface;
use tracing::{debug, warn};

/// Printed whenever a plugin reports a failure.
pub const PLUGIN_FAILURE: &str = "An error occurred during the execution of chosen plugin.";

/// What the loop does after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Continue,
    Exit,
}

/// Drives the menu over a registry with the configured plugin order.
pub struct MainMenu<'a> {
    registry: &'a PluginRegistry,
    settings: &'a AppSettings,
    narrowed: Option<Vec<AvailablePlugin>>,
}

impl<'a> MainMenu<'a> {
    pub fn new(registry: &'a PluginRegistry, settings: &'a AppSettings) -> Self {
        Self {
            registry,
            settings,
            narrowed: None,
        }
    }

    /// Candidates the next input resolves against.
    pub fn candidates(&self, session: &Session) -> Vec<AvailablePlugin> {
        match &self.narrowed {
            Some(narrowed) => narrowed.clone(),
            None => self.registry.available(&self.settings.available_plugins, session),
        }
    }

    /// Runs until the exit plugin succeeds or input is closed.
    pub fn run(&mut self, session: &mut Session, ui: &mut dyn UserInterface) -> Result<()> {
        while self.turn(session, ui) == Turn::Continue {}
        Ok(())
    }

    /// Renders the menu, reads one choice and acts on it.
    pub fn turn(&mut self, session: &mut Session, ui: &mut dyn UserInterface) -> Turn {
        let candidates = self.candidates(session);
        let presenter = presenter_for(session, self.settings.main_page_style);
        ui.info(&presenter.render(&candidates));

        let prompt = format!("{}Please enter your choice: ", presenter.prompt_prefix());
        let Some(input) = ui.read_line(&prompt) else {
            debug!("Input closed, leaving the main menu");
            self.run_exit(session, ui);
            return Turn::Exit;
        };

        let resolution = resolve(&input, &candidates);
        if let Some(message) = resolution.message() {
            ui.error(&message);
        }

        match resolution {
            Resolution::Empty => {
                self.narrowed = None;
                Turn::Continue
            }
            Resolution::Exit => {
                self.narrowed = None;
                self.run_exit(session, ui)
            }
            Resolution::Selected(plugin) => {
                self.narrowed = None;
                self.run_plugin(&plugin.token, session, ui)
            }
            Resolution::Ambiguous(narrowed) => {
                self.narrowed = Some(narrowed);
                Turn::Continue
            }
            Resolution::OutOfRange { .. } | Resolution::NoMatch => Turn::Continue,
        }
    }

    fn run_exit(&self, session: &mut Session, ui: &mut dyn UserInterface) -> Turn {
        if self.registry.exit_plugin().is_none() {
            return Turn::Exit;
        }
        self.run_plugin(EXIT_TOKEN, session, ui)
    }

    fn run_plugin(&self, token: &str, session: &mut Session, ui: &mut dyn UserInterface) -> Turn {
        let Some(plugin) = self.registry.get(token) else {
            warn!("Selected plugin '{}' is not registered", token);
            ui.error(PLUGIN_FAILURE);
            return Turn::Continue;
        };

        debug!("Invoking plugin '{}'", token);
        match plugin.invoke(&mut PluginContext::new(session, ui)) {
            Ok(()) if token == EXIT_TOKEN => Turn::Exit,
            Ok(()) => Turn::Continue,
            Err(e) => {
                warn!("Plugin '{}' failed: {}", token, e);
                ui.error(PLUGIN_FAILURE);
                Turn::Continue
            }
        }
    }
}
