//! Builtin plugins provided by the system.
//!
//! These are the tokens accepted in the `available_plugins` setting. The
//! catalog is built once on first access and cached for the lifetime of the
//! application.

use serde::Serialize;
use std::sync::OnceLock;

use super::model::{Capability, PluginDescriptor};

/// Token of the plugin that `exit`/`quit` always resolve to.
pub const EXIT_TOKEN: &str = "exit";

/// Token of the login plugin, which the logged-in menu never shows.
pub const LOGIN_TOKEN: &str = "login";

const ANY_STATE: &[Capability] = &[Capability::RequiresLogin, Capability::LoggedOutOnly];
const LOGGED_IN: &[Capability] = &[Capability::RequiresLogin];
const LOGGED_OUT: &[Capability] = &[Capability::LoggedOutOnly];

/// A builtin plugin definition.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltinPlugin {
    /// Configuration token (e.g. `add_favourite`)
    pub token: &'static str,
    /// Menu name; its first word selects the plugin
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Visibility tags
    pub capabilities: &'static [Capability],
}

impl BuiltinPlugin {
    /// Creates a new builtin plugin definition.
    pub const fn new(
        token: &'static str,
        name: &'static str,
        description: &'static str,
        capabilities: &'static [Capability],
    ) -> Self {
        Self {
            token,
            name,
            description,
            capabilities,
        }
    }

    /// Owned descriptor for menu rendering.
    pub fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new(self.name, self.description, self.capabilities)
    }
}

/// Static storage for builtin plugins (initialized once).
static BUILTIN_PLUGINS: OnceLock<Vec<BuiltinPlugin>> = OnceLock::new();

/// Returns a reference to all builtin plugin definitions.
pub fn builtin_plugins() -> &'static [BuiltinPlugin] {
    BUILTIN_PLUGINS.get_or_init(|| {
        vec![
            BuiltinPlugin::new(
                "about",
                "About Application",
                "Prints information about the application.",
                ANY_STATE,
            ),
            BuiltinPlugin::new(
                EXIT_TOKEN,
                "Exit Application",
                "Quits the application.",
                ANY_STATE,
            ),
            BuiltinPlugin::new(
                "register",
                "Register API key",
                "Registers a new user and their API key.",
                LOGGED_OUT,
            ),
            BuiltinPlugin::new(
                LOGIN_TOKEN,
                "Login to the application",
                "Logs in as user.",
                LOGGED_OUT,
            ),
            BuiltinPlugin::new(
                "logout",
                "Log out",
                "Logs out the current user.",
                LOGGED_IN,
            ),
            BuiltinPlugin::new(
                "add_favourite",
                "Add a favourite airport",
                "Adds an airport into the current account's bookmarks.",
                LOGGED_IN,
            ),
            BuiltinPlugin::new(
                "remove_favourite",
                "Remove a favourite airport",
                "Removes an airport from the current account's bookmarks.",
                LOGGED_IN,
            ),
            BuiltinPlugin::new(
                "print_schedule",
                "Print the flights schedule of a selected airport",
                "Prints the arrivals and departures board of an airport.",
                LOGGED_IN,
            ),
            BuiltinPlugin::new(
                "search_by_flight",
                "Search for a flight by the flight number",
                "Searches for a concrete flight.",
                LOGGED_IN,
            ),
            BuiltinPlugin::new(
                "airport_info",
                "Print basic information about a specified airport",
                "Prints available information about an airport.",
                LOGGED_IN,
            ),
            BuiltinPlugin::new(
                "change_style",
                "Change the design of the main page",
                "Changes the style of the main page to the next predefined style.",
                LOGGED_IN,
            ),
        ]
    })
}

/// Find a builtin plugin by token.
pub fn find_builtin_plugin(token: &str) -> Option<&'static BuiltinPlugin> {
    builtin_plugins().iter().find(|plugin| plugin.token == token)
}

/// Tokens of all builtin plugins, in catalog order.
pub fn default_plugin_tokens() -> Vec<String> {
    builtin_plugins()
        .iter()
        .map(|plugin| plugin.token.to_string())
        .collect()
}
