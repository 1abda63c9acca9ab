//! Plugin trait and the token → plugin registry.

use tracing::{debug, warn};

use super::builtin::EXIT_TOKEN;
use super::model::PluginDescriptor;
use crate::error::Result;
use crate::session::Session;
use crate::ui::UserInterface;

/// Mutable state lent to a running plugin.
pub struct PluginContext<'a> {
    pub session: &'a mut Session,
    pub ui: &'a mut dyn UserInterface,
}

impl<'a> PluginContext<'a> {
    pub fn new(session: &'a mut Session, ui: &'a mut dyn UserInterface) -> Self {
        Self { session, ui }
    }
}

/// A named, invokable unit of menu functionality.
pub trait Plugin {
    /// Configuration token this plugin is registered under.
    fn token(&self) -> &str;

    /// Menu presentation. May depend on the session (e.g. the last search).
    fn descriptor(&self, session: &Session) -> PluginDescriptor;

    /// Runs the plugin. `Ok(())` is success; the REPL reports any error
    /// generically and keeps going.
    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()>;
}

/// A plugin that passed the capability filter, with its current descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailablePlugin {
    pub token: String,
    pub descriptor: PluginDescriptor,
}

/// Maps configuration tokens to plugin instances.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `plugin`, replacing a previous plugin with the same token.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        let token = plugin.token().to_string();
        debug!("Registering plugin '{}'", token);
        self.plugins.retain(|existing| existing.token() != token);
        self.plugins.push(plugin);
    }

    pub fn get(&self, token: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.token() == token)
            .map(|plugin| plugin.as_ref())
    }

    /// The plugin `exit`/`quit` resolve to, if one is registered.
    pub fn exit_plugin(&self) -> Option<&dyn Plugin> {
        self.get(EXIT_TOKEN)
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.token()).collect()
    }

    /// Plugins visible in the current login state, in configured order.
    ///
    /// Unknown tokens are skipped with a warning.
    pub fn available(&self, configured: &[String], session: &Session) -> Vec<AvailablePlugin> {
        let logged_in = session.is_logged_in();
        configured
            .iter()
            .filter_map(|token| {
                let plugin = self.get(token);
                if plugin.is_none() {
                    warn!("Skipping unknown plugin '{}'", token);
                }
                plugin
            })
            .map(|plugin| AvailablePlugin {
                token: plugin.token().to_string(),
                descriptor: plugin.descriptor(session),
            })
            .filter(|available| available.descriptor.is_visible(logged_in))
            .collect()
    }
}
